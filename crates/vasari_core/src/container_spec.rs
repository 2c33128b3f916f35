//! Container creation requests and their wire fields.

use crate::{ContainerId, MediaKind, MediaReference};

/// One container-creation call.
///
/// [`ContainerSpec::form_fields`] yields the form fields the platform expects,
/// minus the access token which the gateway adds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerSpec {
    /// A single image published on its own.
    Image {
        /// Image URL
        image_url: MediaReference,
        /// Caption, sent only when non-empty
        caption: Option<String>,
        /// Location tag
        location_id: Option<String>,
    },
    /// A bare image destined for a carousel parent.
    CarouselItem {
        /// Image URL
        image_url: MediaReference,
    },
    /// The carousel parent listing its children in display order.
    Carousel {
        /// Child container ids, in display order
        children: Vec<ContainerId>,
        /// Caption, may be empty
        caption: String,
        /// Location tag
        location_id: Option<String>,
    },
    /// A reel.
    Reels {
        /// Video URL
        video_url: MediaReference,
        /// Caption, may be empty
        caption: String,
        /// Cover image URL
        cover_url: Option<String>,
        /// Also show in the main feed
        share_to_feed: bool,
        /// Location tag
        location_id: Option<String>,
    },
    /// A story; image or video by the reference's suffix.
    Stories {
        /// Image or video URL
        media: MediaReference,
    },
}

impl ContainerSpec {
    /// The `media_type` discriminator sent to the platform.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Image { .. } | Self::CarouselItem { .. } => "IMAGE",
            Self::Carousel { .. } => "CAROUSEL",
            Self::Reels { .. } => "REELS",
            Self::Stories { .. } => "STORIES",
        }
    }

    /// Human-readable name used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Image { .. } => "image",
            Self::CarouselItem { .. } => "carousel item",
            Self::Carousel { .. } => "carousel",
            Self::Reels { .. } => "Reels",
            Self::Stories { .. } => "Stories",
        }
    }

    /// Form fields for the creation call, excluding `access_token`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vasari_core::{ContainerId, ContainerSpec};
    ///
    /// let spec = ContainerSpec::Carousel {
    ///     children: vec![ContainerId::new("1"), ContainerId::new("2")],
    ///     caption: "Two views".to_string(),
    ///     location_id: None,
    /// };
    /// let fields = spec.form_fields();
    /// assert!(fields.contains(&("children", "1,2".to_string())));
    /// assert!(fields.contains(&("media_type", "CAROUSEL".to_string())));
    /// ```
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();

        match self {
            Self::Image {
                image_url,
                caption,
                location_id,
            } => {
                fields.push(("image_url", image_url.to_string()));
                fields.push(("media_type", self.media_type().to_string()));
                fields.push(("is_carousel_item", "false".to_string()));
                if let Some(caption) = caption.as_ref().filter(|c| !c.is_empty()) {
                    fields.push(("caption", caption.clone()));
                }
                if let Some(location_id) = present(location_id) {
                    fields.push(("location_id", location_id.to_string()));
                }
            }
            Self::CarouselItem { image_url } => {
                fields.push(("image_url", image_url.to_string()));
                fields.push(("media_type", self.media_type().to_string()));
                fields.push(("is_carousel_item", "true".to_string()));
            }
            Self::Carousel {
                children,
                caption,
                location_id,
            } => {
                let children = children
                    .iter()
                    .map(ContainerId::as_str)
                    .collect::<Vec<_>>()
                    .join(",");
                fields.push(("media_type", self.media_type().to_string()));
                fields.push(("children", children));
                fields.push(("caption", caption.clone()));
                if let Some(location_id) = present(location_id) {
                    fields.push(("location_id", location_id.to_string()));
                }
            }
            Self::Reels {
                video_url,
                caption,
                cover_url,
                share_to_feed,
                location_id,
            } => {
                fields.push(("video_url", video_url.to_string()));
                fields.push(("media_type", self.media_type().to_string()));
                fields.push(("caption", caption.clone()));
                if let Some(cover_url) = present(cover_url) {
                    fields.push(("cover_url", cover_url.to_string()));
                }
                fields.push(("share_to_feed", share_to_feed.to_string()));
                if let Some(location_id) = present(location_id) {
                    fields.push(("location_id", location_id.to_string()));
                }
            }
            Self::Stories { media } => {
                fields.push(("media_type", self.media_type().to_string()));
                match media.kind() {
                    MediaKind::Video => fields.push(("video_url", media.to_string())),
                    MediaKind::Image => fields.push(("image_url", media.to_string())),
                }
            }
        }

        fields
    }
}

/// An optional field worth sending: present and not blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
