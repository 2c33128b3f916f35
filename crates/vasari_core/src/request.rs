//! Publish requests and content modes.

use crate::MediaReference;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Longest caption the platform accepts, in characters.
pub const MAX_CAPTION_CHARS: usize = 2200;

/// Most media references a single post may carry.
pub const MAX_MEDIA_ITEMS: usize = 10;

/// Mode label without mode-specific fields.
///
/// This is what callers send and what the ledger records.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaMode {
    /// One or more images, published as a single post or a carousel.
    #[default]
    Carousel,
    /// A single video published to the Reels surface.
    Reels,
    /// A single image or video published as a story.
    Stories,
}

/// Content mode with the fields that only make sense for that mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentMode {
    /// Images only; more than one becomes a carousel.
    Carousel {
        /// Location tag attached to the post
        location_id: Option<String>,
    },
    /// Exactly one video.
    Reels {
        /// Cover image shown before playback
        cover_url: Option<String>,
        /// Also show the reel in the main feed; unset means yes
        share_to_feed: Option<bool>,
        /// Location tag attached to the reel
        location_id: Option<String>,
    },
    /// Exactly one image or video; the platform takes no caption or location.
    Stories,
}

impl ContentMode {
    /// The label for this mode.
    pub fn mode(&self) -> MediaMode {
        match self {
            Self::Carousel { .. } => MediaMode::Carousel,
            Self::Reels { .. } => MediaMode::Reels,
            Self::Stories => MediaMode::Stories,
        }
    }
}

/// A single logical post to publish.
///
/// The request is not validated on construction; each mode checks the
/// request it receives before any remote call.
///
/// # Examples
///
/// ```
/// use vasari_core::{ContentMode, MediaMode, MediaReference, PublishRequest};
///
/// let request = PublishRequest::builder()
///     .caption("Opening night")
///     .media(vec![MediaReference::new("https://cdn.example.com/a.jpg")])
///     .mode(ContentMode::Carousel { location_id: None })
///     .build()
///     .unwrap();
///
/// assert_eq!(request.mode().mode(), MediaMode::Carousel);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct PublishRequest {
    /// Caption text
    #[builder(default)]
    caption: String,

    /// Media in display order
    media: Vec<MediaReference>,

    /// Content mode
    mode: ContentMode,
}

impl PublishRequest {
    /// Create a request from its parts.
    pub fn new(caption: impl Into<String>, media: Vec<MediaReference>, mode: ContentMode) -> Self {
        Self {
            caption: caption.into(),
            media,
            mode,
        }
    }

    /// Creates a new builder for `PublishRequest`.
    pub fn builder() -> PublishRequestBuilder {
        PublishRequestBuilder::default()
    }
}
