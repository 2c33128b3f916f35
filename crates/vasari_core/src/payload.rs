//! Caller-facing request shape.

use crate::{ContentMode, GroupRef, MediaMode, MediaReference, PublishRequest};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Publish request as submitted by a caller.
///
/// Field names also accept the camelCase names used by the web frontend
/// (`content`, `mediaUrls`, `mediaType`, ...).
///
/// # Examples
///
/// ```
/// use vasari_core::{ContentMode, PublishPayload};
///
/// let payload: PublishPayload = serde_json::from_str(
///     r#"{"content": "New cut", "mediaUrls": ["https://cdn.example.com/cut.mp4"], "mediaType": "REELS"}"#,
/// ).unwrap();
///
/// let (request, group) = payload.into_request();
/// assert!(group.is_none());
/// assert!(matches!(request.mode(), ContentMode::Reels { share_to_feed: None, .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct PublishPayload {
    /// Caption text
    #[serde(alias = "content", default)]
    #[builder(default)]
    caption: String,

    /// Media URLs in display order
    #[serde(alias = "mediaUrls", alias = "media_references")]
    media_urls: Vec<MediaReference>,

    /// Content mode; carousel when absent
    #[serde(alias = "mediaType", default)]
    #[builder(default)]
    mode: Option<MediaMode>,

    /// Reels cover image
    #[serde(alias = "coverUrl", default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    cover_url: Option<String>,

    /// Reels share-to-feed flag
    #[serde(alias = "shareToFeed", default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    share_to_feed: Option<bool>,

    /// Location tag
    #[serde(alias = "locationId", default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    location_id: Option<String>,

    /// Campaign to file the post under
    #[serde(alias = "groupId", default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    group_id: Option<GroupRef>,
}

impl PublishPayload {
    /// Creates a new builder for `PublishPayload`.
    pub fn builder() -> PublishPayloadBuilder {
        PublishPayloadBuilder::default()
    }

    /// Split into the typed request and the group reference.
    ///
    /// Fields that have no meaning for the chosen mode are dropped.
    pub fn into_request(self) -> (PublishRequest, Option<GroupRef>) {
        let mode = self.mode.unwrap_or_default();
        let cover_url = non_blank(self.cover_url, "cover_url");
        let location_id = non_blank(self.location_id, "location_id");

        let content_mode = match mode {
            MediaMode::Carousel => {
                if cover_url.is_some() || self.share_to_feed.is_some() {
                    warn!(%mode, "Ignoring Reels-only fields");
                }
                ContentMode::Carousel { location_id }
            }
            MediaMode::Reels => ContentMode::Reels {
                cover_url,
                share_to_feed: self.share_to_feed,
                location_id,
            },
            MediaMode::Stories => {
                if cover_url.is_some() || self.share_to_feed.is_some() || location_id.is_some() {
                    warn!(%mode, "Stories take no cover, feed or location fields; ignoring them");
                }
                ContentMode::Stories
            }
        };

        (
            PublishRequest::new(self.caption, self.media_urls, content_mode),
            self.group_id,
        )
    }
}

/// Treat a blank optional field as absent.
fn non_blank(value: Option<String>, field: &'static str) -> Option<String> {
    match value {
        Some(v) if v.trim().is_empty() => {
            warn!(field, "Ignoring blank field");
            None
        }
        other => other,
    }
}
