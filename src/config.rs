//! # Configuration
//!
//! Application configuration loading and management.
//!
//! # Configuration Sources
//!
//! Configuration is loaded in the following order (later sources override earlier):
//! 1. Default values
//! 2. Configuration file (if it exists)
//! 3. Environment variables
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ROUTER_CONFIG_FILE` | Path of the TOML file | `router.toml` |
//! | `ROUTER_LOG_LEVEL` | Log level | `info` |
//! | `ROUTER_LOG_FORMAT` | Log format (json/pretty) | `pretty` |
//! | `BINANCE_API_KEY` / `BINANCE_API_SECRET` | Binance credentials | - |
//! | `BINANCE_BASE_URL` | Binance REST endpoint | testnet |
//! | `OKX_API_KEY` / `OKX_API_SECRET` / `OKX_API_PASSPHRASE` | OKX credentials | - |
//! | `OKX_BASE_URL` | OKX REST endpoint | `https://www.okx.com` |
//! | `OKX_SIMULATED` | OKX demo trading (true/false) | `true` |
//!
//! A venue is configured when it appears in the file or when its API key
//! is set in the environment.
//!
//! # Examples
//!
//! ```
//! use crypto_order_router::config::AppConfig;
//!
//! let config = AppConfig::from_toml_str(r#"
//!     [routing]
//!     quote_timeout_ms = 2000
//!
//!     [venues.binance]
//!     api_key = "key"
//!     api_secret = "secret"
//! "#).unwrap();
//! assert_eq!(config.routing.quote_timeout_ms, 2000);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_FILE_ENV: &str = "ROUTER_CONFIG_FILE";

/// Configuration file used when [`CONFIG_FILE_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "router.toml";

/// Venue identifiers the router knows how to build adapters for.
pub const KNOWN_VENUES: [&str; 2] = ["binance", "okx"];

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse configuration.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Invalid configuration value.
    #[error("invalid config value for {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (structured logging).
    Json,
    /// Pretty format (human-readable).
    #[default]
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include target (module path) in logs.
    #[serde(default = "default_true")]
    pub include_target: bool,

    /// Unrecognised `ROUTER_LOG_FORMAT` value, reported by `validate`.
    #[serde(skip)]
    rejected_format: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            include_target: true,
            rejected_format: None,
        }
    }
}

// ============================================================================
// Routing Configuration
// ============================================================================

/// Deadlines used while routing one order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Per-venue deadline for a quote fetch, in milliseconds.
    #[serde(default = "default_quote_timeout")]
    pub quote_timeout_ms: u64,

    /// HTTP request timeout for every venue call, in milliseconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Wait before reading back an order's state on venues that do not
    /// report it at creation, in milliseconds.
    #[serde(default = "default_order_status_delay")]
    pub order_status_delay_ms: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            quote_timeout_ms: default_quote_timeout(),
            request_timeout_ms: default_request_timeout(),
            order_status_delay_ms: default_order_status_delay(),
        }
    }
}

// ============================================================================
// Venue Credentials
// ============================================================================

/// Credential bundle for one venue.
#[derive(Clone, Default, Deserialize)]
pub struct VenueCredentials {
    /// API key.
    #[serde(default)]
    pub api_key: String,

    /// API secret used for signing.
    #[serde(default)]
    pub api_secret: String,

    /// Passphrase (OKX only).
    #[serde(default)]
    pub api_passphrase: Option<String>,

    /// REST endpoint override.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Demo/simulated trading (OKX only).
    #[serde(default = "default_true")]
    pub simulated: bool,
}

impl VenueCredentials {
    /// Creates credentials with a key and secret.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_passphrase: None,
            base_url: None,
            simulated: true,
        }
    }

    /// Sets the passphrase.
    #[must_use]
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.api_passphrase = Some(passphrase.into());
        self
    }

    /// Sets the REST endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets simulated trading.
    #[must_use]
    pub fn with_simulated(mut self, simulated: bool) -> Self {
        self.simulated = simulated;
        self
    }
}

impl fmt::Debug for VenueCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |s: &str| if s.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("VenueCredentials")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field(
                "api_passphrase",
                &self.api_passphrase.as_deref().map(redact),
            )
            .field("base_url", &self.base_url)
            .field("simulated", &self.simulated)
            .finish()
    }
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,

    /// Routing deadlines.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Credentials keyed by venue identifier.
    #[serde(default)]
    pub venues: BTreeMap<String, VenueCredentials>,
}

impl AppConfig {
    /// Loads configuration from the process environment and optional config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `env` to look up variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load_with<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = env(CONFIG_FILE_ENV).unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(env);
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the text is not valid configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Applies environment variable overrides to the configuration.
    pub fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Logging configuration
        if let Some(level) = env("ROUTER_LOG_LEVEL") {
            self.log.level = level;
        }
        if let Some(format) = env("ROUTER_LOG_FORMAT") {
            self.log.rejected_format = None;
            match format.to_lowercase().as_str() {
                "json" => self.log.format = LogFormat::Json,
                "pretty" => self.log.format = LogFormat::Pretty,
                _ => self.log.rejected_format = Some(format),
            }
        }

        // Binance
        if let Some(key) = env("BINANCE_API_KEY") {
            self.venue_entry("binance").api_key = key;
        }
        if let Some(venue) = self.venues.get_mut("binance") {
            if let Some(secret) = env("BINANCE_API_SECRET") {
                venue.api_secret = secret;
            }
            if let Some(url) = env("BINANCE_BASE_URL") {
                venue.base_url = Some(url);
            }
        }

        // OKX
        if let Some(key) = env("OKX_API_KEY") {
            self.venue_entry("okx").api_key = key;
        }
        if let Some(venue) = self.venues.get_mut("okx") {
            if let Some(secret) = env("OKX_API_SECRET") {
                venue.api_secret = secret;
            }
            if let Some(passphrase) = env("OKX_API_PASSPHRASE") {
                venue.api_passphrase = Some(passphrase);
            }
            if let Some(url) = env("OKX_BASE_URL") {
                venue.base_url = Some(url);
            }
            if let Some(simulated) = env("OKX_SIMULATED")
                && let Some(flag) = parse_bool(&simulated)
            {
                venue.simulated = flag;
            }
        }
    }

    fn venue_entry(&mut self, venue: &str) -> &mut VenueCredentials {
        self.venues
            .entry(venue.to_string())
            .or_insert_with(|| VenueCredentials {
                simulated: true,
                ..VenueCredentials::default()
            })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "log.level",
                format!(
                    "invalid log level '{}', must be one of: {:?}",
                    self.log.level, valid_levels
                ),
            ));
        }

        if let Some(format) = &self.log.rejected_format {
            return Err(ConfigError::invalid(
                "log.format",
                format!("invalid log format '{format}', must be one of: [\"json\", \"pretty\"]"),
            ));
        }

        // Validate deadlines
        for (field, value) in [
            ("routing.quote_timeout_ms", self.routing.quote_timeout_ms),
            ("routing.request_timeout_ms", self.routing.request_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid(field, "must be greater than zero"));
            }
        }

        // Validate venues
        for (venue, credentials) in &self.venues {
            if !KNOWN_VENUES.contains(&venue.as_str()) {
                return Err(ConfigError::invalid(
                    format!("venues.{venue}"),
                    format!("unknown venue, must be one of: {KNOWN_VENUES:?}"),
                ));
            }
            if credentials.api_key.is_empty() || credentials.api_secret.is_empty() {
                return Err(ConfigError::invalid(
                    format!("venues.{venue}"),
                    "api_key and api_secret are required",
                ));
            }
            if venue == "okx"
                && credentials
                    .api_passphrase
                    .as_deref()
                    .is_none_or(str::is_empty)
            {
                return Err(ConfigError::invalid(
                    "venues.okx.api_passphrase",
                    "OKX requires an API passphrase",
                ));
            }
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Default Value Functions
// ============================================================================

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_quote_timeout() -> u64 {
    5000
}

fn default_request_timeout() -> u64 {
    10_000
}

fn default_order_status_delay() -> u64 {
    500
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Pretty);
        assert_eq!(config.routing.quote_timeout_ms, 5000);
        assert_eq!(config.routing.request_timeout_ms, 10_000);
        assert_eq!(config.routing.order_status_delay_ms, 500);
        assert!(config.venues.is_empty());
    }

    #[test]
    fn app_config_validate_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn app_config_validate_invalid_log_level() {
        let mut config = AppConfig::default();
        config.log.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.routing.quote_timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("routing.quote_timeout_ms"));
    }

    #[test]
    fn toml_venues_parse() {
        let config = AppConfig::from_toml_str(
            r#"
            [log]
            level = "debug"
            format = "json"

            [venues.okx]
            api_key = "k"
            api_secret = "s"
            api_passphrase = "p"
            simulated = false
            base_url = "http://localhost:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.log.format, LogFormat::Json);
        let okx = config.venues.get("okx").unwrap();
        assert!(!okx.simulated);
        assert_eq!(okx.base_url.as_deref(), Some("http://localhost:9000"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_venue_rejected() {
        let mut config = AppConfig::default();
        config
            .venues
            .insert("kraken".to_string(), VenueCredentials::new("k", "s"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("venues.kraken"));
    }

    #[test]
    fn okx_requires_passphrase() {
        let mut config = AppConfig::default();
        config
            .venues
            .insert("okx".to_string(), VenueCredentials::new("k", "s"));
        assert!(config.validate().is_err());

        config.venues.insert(
            "okx".to_string(),
            VenueCredentials::new("k", "s").with_passphrase("p"),
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_add_venues() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env_from(&[
            ("BINANCE_API_KEY", "bk"),
            ("BINANCE_API_SECRET", "bs"),
            ("OKX_API_KEY", "ok"),
            ("OKX_API_SECRET", "os"),
            ("OKX_API_PASSPHRASE", "op"),
            ("OKX_SIMULATED", "false"),
            ("ROUTER_LOG_LEVEL", "warn"),
            ("ROUTER_LOG_FORMAT", "json"),
        ]));

        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.venues["binance"].api_secret, "bs");
        assert!(config.venues["binance"].simulated);
        assert_eq!(config.venues["okx"].api_passphrase.as_deref(), Some("op"));
        assert!(!config.venues["okx"].simulated);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_env_log_format_rejected() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env_from(&[("ROUTER_LOG_FORMAT", "yaml")]));

        assert_eq!(config.log.format, LogFormat::Pretty);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log.format"));
        assert!(err.to_string().contains("yaml"));

        config.apply_env_overrides(env_from(&[("ROUTER_LOG_FORMAT", "JSON")]));
        assert_eq!(config.log.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn venue_names_are_case_sensitive() {
        let mut config = AppConfig::default();
        config
            .venues
            .insert("Binance".to_string(), VenueCredentials::new("k", "s"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("venues.Binance"));
    }

    #[test]
    fn secret_without_key_does_not_configure_venue() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env_from(&[("BINANCE_API_SECRET", "bs")]));
        assert!(config.venues.is_empty());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = AppConfig::from_toml_str(
            r#"
            [venues.binance]
            api_key = "file-key"
            api_secret = "file-secret"
            "#,
        )
        .unwrap();
        config.apply_env_overrides(env_from(&[
            ("BINANCE_API_SECRET", "env-secret"),
            ("BINANCE_BASE_URL", "http://127.0.0.1:1"),
        ]));
        let binance = &config.venues["binance"];
        assert_eq!(binance.api_key, "file-key");
        assert_eq!(binance.api_secret, "env-secret");
        assert_eq!(binance.base_url.as_deref(), Some("http://127.0.0.1:1"));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let config = AppConfig::load_with(env_from(&[(
            CONFIG_FILE_ENV,
            "/nonexistent/router-config-for-tests.toml",
        )]))
        .unwrap();
        assert!(config.venues.is_empty());
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let creds = VenueCredentials::new("visible-key", "visible-secret").with_passphrase("pp");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("visible-key"));
        assert!(!debug.contains("visible-secret"));
        assert!(!debug.contains("\"pp\""));
    }
}
