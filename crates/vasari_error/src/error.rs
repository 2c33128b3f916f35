//! Top-level error wrapper types.

use crate::{ConfigError, LedgerError, PublishError};

/// Every error the Vasari crates can surface.
///
/// # Examples
///
/// ```
/// use vasari_error::{ConfigError, VasariError};
///
/// let config_err = ConfigError::new("Missing user id");
/// let err: VasariError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VasariErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Publishing error
    #[from(PublishError)]
    Publish(PublishError),
    /// Post ledger error
    #[from(LedgerError)]
    Ledger(LedgerError),
}

/// Vasari error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vasari_error::{ConfigError, VasariResult};
///
/// fn might_fail() -> VasariResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vasari Error: {}", _0)]
pub struct VasariError(Box<VasariErrorKind>);

impl VasariError {
    /// Create a new error from a kind.
    pub fn new(kind: VasariErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VasariErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to VasariErrorKind
impl<T> From<T> for VasariError
where
    T: Into<VasariErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vasari operations.
pub type VasariResult<T> = std::result::Result<T, VasariError>;
