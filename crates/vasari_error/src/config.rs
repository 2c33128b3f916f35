//! Errors raised while loading Instagram settings.

/// Settings could not be loaded, or lack the credentials needed to publish.
///
/// Raised when a `vasari.toml` layer fails to parse, when an `INSTAGRAM_*`
/// override is rejected, and by `vasari check-config` when the access token or
/// account id is absent.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} (raised at {}:{})", message, file, line)]
pub struct ConfigError {
    /// What is wrong with the settings
    pub message: String,
    /// Source line that raised it
    pub line: u32,
    /// Source file that raised it
    pub file: &'static str,
}

impl ConfigError {
    /// Settings problem described by `message`, located at the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use vasari_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to parse configuration: invalid type for polling.max_attempts");
    /// assert!(err.message.starts_with("Failed to parse"));
    /// assert!(err.to_string().contains("polling.max_attempts"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Credentials named in `missing` are absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use vasari_error::ConfigError;
    ///
    /// let err = ConfigError::missing_credentials(&["Instagram User ID"]);
    /// assert_eq!(
    ///     err.message,
    ///     "Instagram configuration is missing: Instagram User ID (set INSTAGRAM_USER_ID)"
    /// );
    /// ```
    #[track_caller]
    pub fn missing_credentials(missing: &[&str]) -> Self {
        let hints: Vec<&str> = missing
            .iter()
            .filter_map(|item| match *item {
                "access token" => Some("INSTAGRAM_ACCESS_TOKEN"),
                "Instagram User ID" => Some("INSTAGRAM_USER_ID"),
                _ => None,
            })
            .collect();

        let mut message = format!("Instagram configuration is missing: {}", missing.join(", "));
        if !hints.is_empty() {
            message.push_str(&format!(" (set {})", hints.join(", ")));
        }
        Self::new(message)
    }
}
