//! Instagram platform configuration.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};
use vasari_error::{ConfigError, VasariError, VasariResult};
use vasari_interface::PlatformConfig;

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../vasari.toml");

/// Environment variables that override file settings.
const ENV_OVERRIDES: [(&str, &str); 3] = [
    ("INSTAGRAM_ACCESS_TOKEN", "instagram.access_token"),
    ("INSTAGRAM_USER_ID", "instagram.user_id"),
    ("INSTAGRAM_GRAPH_URL", "instagram.graph_url"),
];

/// Readiness polling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
pub struct PollingConfig {
    /// Status checks before giving up.
    #[builder(default = "default_max_attempts()")]
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Wait between status checks in milliseconds.
    #[builder(default = "default_interval_ms()")]
    #[serde(default = "default_interval_ms")]
    interval_ms: u64,
}

fn default_max_attempts() -> u32 {
    30
}

fn default_interval_ms() -> u64 {
    2000
}

impl PollingConfig {
    /// Wait between status checks.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_ms: default_interval_ms(),
        }
    }
}

/// Credentials and endpoint for the Instagram Graph API.
#[derive(Clone, Serialize, Deserialize, Getters, derive_builder::Builder)]
pub struct InstagramConfig {
    /// Graph API base URL including version.
    #[getter(skip)]
    #[builder(setter(into), default = "default_graph_url()")]
    #[serde(default = "default_graph_url")]
    graph_url: String,

    /// Instagram Business Account id.
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    user_id: Option<String>,

    /// Page or user access token.
    #[getter(skip)]
    #[builder(setter(into, strip_option), default)]
    #[serde(default, skip_serializing)]
    access_token: Option<String>,

    /// Readiness polling settings.
    #[builder(default)]
    #[serde(default)]
    polling: PollingConfig,
}

fn default_graph_url() -> String {
    "https://graph.facebook.com/v21.0".to_string()
}

impl std::fmt::Debug for InstagramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstagramConfig")
            .field("graph_url", &self.graph_url)
            .field("user_id", &self.user_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("polling", &self.polling)
            .finish()
    }
}

impl InstagramConfig {
    /// Creates a new builder for `InstagramConfig`.
    pub fn builder() -> InstagramConfigBuilder {
        InstagramConfigBuilder::default()
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled default.
    ///
    /// Sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (vasari.toml shipped with the crate)
    /// 2. `~/.config/vasari/vasari.toml`
    /// 3. `./vasari.toml`
    /// 4. `INSTAGRAM_ACCESS_TOKEN`, `INSTAGRAM_USER_ID`, `INSTAGRAM_GRAPH_URL`
    ///
    /// Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed.
    #[instrument]
    pub fn load() -> VasariResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/vasari/vasari.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("vasari").required(false));

        Self::finish(with_env_overrides(builder, |var| std::env::var(var).ok())?)
    }

    /// Load configuration from a specific file on top of the bundled defaults.
    ///
    /// Environment overrides still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> VasariResult<Self> {
        debug!("Loading configuration from file");

        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::finish(with_env_overrides(builder, |var| std::env::var(var).ok())?)
    }

    /// Names of the credentials that are missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing_credentials(self)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> VasariResult<Self> {
        builder
            .build()
            .map_err(|e| {
                VasariError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .get::<Self>("instagram")
            .map_err(|e| {
                VasariError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

/// Apply environment overrides looked up through `lookup`.
fn with_env_overrides<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> VasariResult<ConfigBuilder<DefaultState>>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in ENV_OVERRIDES {
        if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
            debug!(var, "Applying environment override");
            builder = builder.set_override(key, value).map_err(|e| {
                VasariError::from(ConfigError::new(format!("Invalid override {}: {}", var, e)))
            })?;
        }
    }
    Ok(builder)
}

/// Names of the credentials `config` lacks.
pub fn missing_credentials(config: &dyn PlatformConfig) -> Vec<&'static str> {
    let absent = |value: Option<&str>| value.is_none_or(|v| v.trim().is_empty());

    let mut missing = Vec::new();
    if absent(config.access_token()) {
        missing.push("access token");
    }
    if absent(config.account_id()) {
        missing.push("Instagram User ID");
    }
    missing
}

impl PlatformConfig for InstagramConfig {
    fn graph_url(&self) -> &str {
        self.graph_url.trim_end_matches('/')
    }

    fn account_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}
