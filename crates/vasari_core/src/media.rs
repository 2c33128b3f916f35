//! Media references and their classification.

use serde::{Deserialize, Serialize};

/// Path suffixes treated as video.
pub const VIDEO_EXTENSIONS: [&str; 6] = [".mp4", ".mov", ".avi", ".mkv", ".webm", ".flv"];

/// Whether a reference points at a still image or a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    /// Still image (JPEG, PNG, ...)
    Image,
    /// Video (MP4, MOV, ...)
    Video,
}

/// Publicly reachable URL of a media file.
///
/// # Examples
///
/// ```
/// use vasari_core::{MediaKind, MediaReference};
///
/// let clip = MediaReference::new("https://cdn.example.com/clip.MP4?sig=abc");
/// assert_eq!(clip.kind(), MediaKind::Video);
///
/// let photo = MediaReference::new("https://cdn.example.com/photo.jpg");
/// assert_eq!(photo.kind(), MediaKind::Image);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct MediaReference(String);

impl MediaReference {
    /// Wrap a media URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The URL as sent to the platform.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Infer the media kind from the path suffix.
    ///
    /// Query string and fragment are ignored and the comparison is
    /// case-insensitive. Anything without a known video suffix is an image.
    pub fn kind(&self) -> MediaKind {
        let path = match self.0.find(['?', '#']) {
            Some(end) => &self.0[..end],
            None => self.0.as_str(),
        };
        let path = path.to_ascii_lowercase();

        if VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    /// Shorthand for `kind() == MediaKind::Video`.
    pub fn is_video(&self) -> bool {
        self.kind() == MediaKind::Video
    }
}

impl From<&str> for MediaReference {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for MediaReference {
    fn from(url: String) -> Self {
        Self(url)
    }
}
