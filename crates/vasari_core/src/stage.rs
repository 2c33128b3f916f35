//! Stages of a single publish attempt.

use serde::{Deserialize, Serialize};

/// Where a publish attempt currently is.
///
/// Stages run strictly in declaration order. `Failed` is reachable from any
/// non-terminal stage, `Succeeded` only from `Publishing`, and no stage is
/// entered twice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
pub enum PublishStage {
    /// Checking configuration and request shape
    Validating,
    /// Issuing container-creation calls
    CreatingContainers,
    /// Waiting for containers to finish processing
    Polling,
    /// Resolving the publish target
    Finalizing,
    /// Issuing the publish call
    Publishing,
    /// Post is live
    Succeeded,
    /// Attempt abandoned
    Failed,
}

impl PublishStage {
    /// Whether the attempt is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// The stage that follows on success, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Validating => Some(Self::CreatingContainers),
            Self::CreatingContainers => Some(Self::Polling),
            Self::Polling => Some(Self::Finalizing),
            Self::Finalizing => Some(Self::Publishing),
            Self::Publishing => Some(Self::Succeeded),
            Self::Succeeded | Self::Failed => None,
        }
    }

    /// Whether `to` may directly follow this stage.
    ///
    /// # Examples
    ///
    /// ```
    /// use vasari_core::PublishStage;
    ///
    /// assert!(PublishStage::Polling.can_advance_to(PublishStage::Failed));
    /// assert!(!PublishStage::Polling.can_advance_to(PublishStage::Succeeded));
    /// assert!(!PublishStage::Failed.can_advance_to(PublishStage::Validating));
    /// ```
    pub fn can_advance_to(&self, to: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        to == Self::Failed || self.next() == Some(to)
    }
}
