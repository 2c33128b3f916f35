//! Publishing error types.
//!
//! The kinds below are the failure taxonomy of a publish attempt. Every kind
//! renders with its taxonomy prefix so the kind survives conversion into a
//! plain failure message.

/// Result type for publishing operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Publishing failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// Credential or account id missing; never retried.
    #[display("Configuration error: {}", _0)]
    Configuration(String),

    /// Malformed request, rejected before any remote call.
    #[display("Validation error: {}", _0)]
    Validation(String),

    /// The platform answered with a non-success response.
    #[display("Instagram API error: {}", _0)]
    RemoteRejection(String),

    /// The request never produced a remote answer (connect, TLS, decode).
    #[display("Transport error: {}", _0)]
    Transport(String),

    /// Status stayed non-terminal for the whole attempt budget.
    #[display(
        "Processing timeout: Container {} did not become ready within {} attempts. \
         This may indicate the media is still processing. Please try again later.",
        container,
        attempts
    )]
    ProcessingTimeout {
        /// Remote container identifier
        container: String,
        /// Status checks performed
        attempts: u32,
    },

    /// Remote processing rejected the media.
    #[display("Processing failed: Container {} failed with status: {}", container, status)]
    ProcessingFailed {
        /// Remote container identifier
        container: String,
        /// Terminal status reported by the platform
        status: String,
    },
}

impl PublishErrorKind {
    /// Whether a later attempt with the same request may reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProcessingTimeout { .. } | Self::Transport(_))
    }

    /// Whether the failure happened before any remote call was issued.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Validation(_))
    }
}

/// Publishing error with source location tracking.
///
/// # Examples
///
/// ```
/// use vasari_error::{PublishError, PublishErrorKind};
///
/// let err = PublishError::new(PublishErrorKind::Validation(
///     "Carousel posts can have maximum 10 items".to_string(),
/// ));
/// assert!(err.kind().is_local());
/// assert!(format!("{}", err).contains("maximum 10 items"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    kind: PublishErrorKind,
    line: u32,
    file: &'static str,
}

impl PublishError {
    /// Create a new PublishError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a validation failure.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(PublishErrorKind::Validation(message.into()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PublishErrorKind {
        &self.kind
    }

    /// Line where the error was created.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// File where the error was created.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

impl From<PublishErrorKind> for PublishError {
    #[track_caller]
    fn from(kind: PublishErrorKind) -> Self {
        Self::new(kind)
    }
}
