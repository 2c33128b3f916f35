//! Result of a publish attempt.

use crate::RemoteMediaId;
use serde::{Deserialize, Serialize};
use vasari_error::{PublishError, PublishErrorKind};

/// Failure category carried by a failed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    /// Missing credential or account id
    Configuration,
    /// Malformed request
    Validation,
    /// Non-success response from the platform
    RemoteRejection,
    /// No remote answer was obtained
    Transport,
    /// Poll budget exhausted while the media was still processing
    ProcessingTimeout,
    /// Remote processing rejected the media
    ProcessingFailed,
}

impl From<&PublishErrorKind> for FailureKind {
    fn from(kind: &PublishErrorKind) -> Self {
        match kind {
            PublishErrorKind::Configuration(_) => Self::Configuration,
            PublishErrorKind::Validation(_) => Self::Validation,
            PublishErrorKind::RemoteRejection(_) => Self::RemoteRejection,
            PublishErrorKind::Transport(_) => Self::Transport,
            PublishErrorKind::ProcessingTimeout { .. } => Self::ProcessingTimeout,
            PublishErrorKind::ProcessingFailed { .. } => Self::ProcessingFailed,
        }
    }
}

/// Either the published media id or a typed failure; never both.
///
/// Serializes to `{"remote_media_id", "detail"}` or `{"error_kind", "message"}`.
///
/// # Examples
///
/// ```
/// use vasari_core::{PublishOutcome, RemoteMediaId};
///
/// let outcome = PublishOutcome::Published {
///     remote_media_id: RemoteMediaId::new("17912345"),
///     detail: "Instagram post published successfully".to_string(),
/// };
/// let json = serde_json::to_value(&outcome).unwrap();
/// assert_eq!(json["remote_media_id"], "17912345");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublishOutcome {
    /// The post is live.
    Published {
        /// Published media id
        remote_media_id: RemoteMediaId,
        /// Mode-specific success message
        detail: String,
    },
    /// The attempt failed.
    Failed {
        /// Failure category
        error_kind: FailureKind,
        /// Human-readable reason, prefixed with the category
        message: String,
    },
}

impl PublishOutcome {
    /// Failed outcome for an error caught at the orchestrator boundary.
    pub fn failed(error: &PublishError) -> Self {
        Self::Failed {
            error_kind: FailureKind::from(error.kind()),
            message: error.kind().to_string(),
        }
    }

    /// Whether the post was published.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }

    /// Published media id, if any.
    pub fn remote_media_id(&self) -> Option<&RemoteMediaId> {
        match self {
            Self::Published {
                remote_media_id, ..
            } => Some(remote_media_id),
            Self::Failed { .. } => None,
        }
    }

    /// Failure category, if any.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Published { .. } => None,
            Self::Failed { error_kind, .. } => Some(*error_kind),
        }
    }

    /// The detail or failure message.
    pub fn message(&self) -> &str {
        match self {
            Self::Published { detail, .. } => detail,
            Self::Failed { message, .. } => message,
        }
    }
}
