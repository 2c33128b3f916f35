//! Post ledger error types.

use std::path::PathBuf;

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LedgerErrorKind {
    /// No record exists for the post.
    #[display("Post not found: {}", _0)]
    NotFound(String),

    /// Backing file could not be read or written.
    #[display("Ledger I/O error: {} ({})", path.display(), message)]
    Io {
        /// Path of the ledger file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Ledger contents could not be (de)serialized.
    #[display("Ledger JSON error: {}", _0)]
    Json(String),
}

/// Ledger error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Ledger Error: {} at line {} in {}", kind, line, file)]
pub struct LedgerError {
    /// Error kind
    pub kind: LedgerErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl LedgerError {
    /// Create a new ledger error.
    #[track_caller]
    pub fn new(kind: LedgerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    #[track_caller]
    fn from(e: serde_json::Error) -> Self {
        Self::new(LedgerErrorKind::Json(e.to_string()))
    }
}
