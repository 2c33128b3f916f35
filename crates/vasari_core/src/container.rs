//! Remote containers and their lifecycle.

use serde::{Deserialize, Serialize};

/// Identifier the platform assigns to a media container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct ContainerId(String);

impl ContainerId {
    /// Wrap a remote container id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of published media on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct RemoteMediaId(String);

impl RemoteMediaId {
    /// Wrap a remote media id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Processing status reported by the platform for a container.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum ContainerStatus {
    /// Ready to publish
    Finished,
    /// Still transcoding or validating
    InProgress,
    /// Processing rejected the media
    Error,
    /// Container was not published in time and is gone
    Expired,
    /// Status missing or not recognized
    #[serde(other)]
    Unknown,
}

impl ContainerStatus {
    /// Parse a `status_code` value; anything unrecognized is `Unknown`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vasari_core::ContainerStatus;
    ///
    /// assert_eq!(ContainerStatus::from_code("IN_PROGRESS"), ContainerStatus::InProgress);
    /// assert_eq!(ContainerStatus::from_code("PUBLISHED"), ContainerStatus::Unknown);
    /// ```
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or(Self::Unknown)
    }

    /// Whether polling should stop on this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Error | Self::Expired)
    }
}

/// Locally tracked lifecycle of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ContainerState {
    /// Remote id obtained, not yet polled
    Created,
    /// Status checks in flight
    Polling,
    /// Ready to publish
    Ready,
    /// Rejected by remote processing, or abandoned after the poll budget
    Failed,
    /// Expired on the remote side
    Expired,
}

impl ContainerState {
    /// Whether the container may no longer be polled.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed | Self::Expired)
    }
}

/// A container created during one publish attempt.
///
/// The id never changes once obtained; the state only moves forward and
/// stops at the first terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaContainer {
    id: ContainerId,
    state: ContainerState,
}

impl MediaContainer {
    /// Track a freshly created container.
    pub fn new(id: ContainerId) -> Self {
        Self {
            id,
            state: ContainerState::Created,
        }
    }

    /// Remote identifier.
    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    /// Current local state.
    pub fn state(&self) -> ContainerState {
        self.state
    }

    /// Enter the polling state. Returns false if the container is terminal.
    pub fn begin_polling(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = ContainerState::Polling;
        true
    }

    /// Fold a remote status into the local state.
    pub fn observe(&mut self, status: ContainerStatus) -> ContainerState {
        if self.state.is_terminal() {
            return self.state;
        }
        self.state = match status {
            ContainerStatus::Finished => ContainerState::Ready,
            ContainerStatus::Error => ContainerState::Failed,
            ContainerStatus::Expired => ContainerState::Expired,
            ContainerStatus::InProgress | ContainerStatus::Unknown => ContainerState::Polling,
        };
        self.state
    }

    /// Treat the container as ready without polling.
    pub fn mark_ready(&mut self) {
        if !self.state.is_terminal() {
            self.state = ContainerState::Ready;
        }
    }

    /// Give up on the container.
    pub fn mark_failed(&mut self) {
        if !self.state.is_terminal() {
            self.state = ContainerState::Failed;
        }
    }
}
