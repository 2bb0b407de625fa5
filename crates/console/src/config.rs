//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CONSOLE_BASE_URL` - Public URL for the console (https enables secure cookies)
//! - `TAVOLA_API_URL` - Base URL of the operations API
//!
//! ## Optional
//! - `CONSOLE_HOST` - Bind address (default: 127.0.0.1)
//! - `CONSOLE_PORT` - Listen port (default: 3000)
//! - `TAVOLA_API_TIMEOUT_SECS` - Timeout for data and auth calls (default: 10)
//! - `TAVOLA_HEALTH_TIMEOUT_SECS` - Timeout for the health probe (default: 3)
//! - `TAVOLA_JOIN_KEYS` - `static` or `remote` join-key validation (default: static)
//! - `TAVOLA_UNKNOWN_ROLE_POLICY` - `admin` or `reauth` (default: admin)
//! - `TAVOLA_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use tavola_core::UnknownRolePolicy;
use thiserror::Error;
use url::Url;

const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 3;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which join-key validator backs staff signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKeyMode {
    /// The fixed local key table.
    #[default]
    Static,
    /// Ask the operations API.
    Remote,
}

impl std::str::FromStr for JoinKeyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(Self::Static),
            "remote" => Ok(Self::Remote),
            _ => Err(format!("expected 'static' or 'remote', got '{s}'")),
        }
    }
}

/// Operations API connection settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL; endpoint paths are joined onto it.
    pub base_url: Url,
    /// Timeout for auth and data requests.
    pub timeout: Duration,
    /// Timeout for the health probe; kept short so offline pages render fast.
    pub health_timeout: Duration,
}

/// Console application configuration.
#[derive(Clone)]
pub struct ConsoleConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the console
    pub base_url: String,
    /// Operations API settings
    pub api: ApiConfig,
    /// Join-key validation backend
    pub join_keys: JoinKeyMode,
    /// Handling of persisted sessions with an unrecognized role
    pub unknown_role_policy: UnknownRolePolicy,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking (contains a key)
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl std::fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("api", &self.api)
            .field("join_keys", &self.join_keys)
            .field("unknown_role_policy", &self.unknown_role_policy)
            .field("log_json", &self.log_json)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish_non_exhaustive()
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("CONSOLE_HOST", "127.0.0.1")?;
        let port = parse_env("CONSOLE_PORT", "3000")?;
        let base_url = get_required_env("CONSOLE_BASE_URL")?;

        let api = ApiConfig {
            base_url: parse_api_url(&get_required_env("TAVOLA_API_URL")?)?,
            timeout: Duration::from_secs(parse_env(
                "TAVOLA_API_TIMEOUT_SECS",
                &DEFAULT_API_TIMEOUT_SECS.to_string(),
            )?),
            health_timeout: Duration::from_secs(parse_env(
                "TAVOLA_HEALTH_TIMEOUT_SECS",
                &DEFAULT_HEALTH_TIMEOUT_SECS.to_string(),
            )?),
        };

        Ok(Self {
            host,
            port,
            base_url,
            api,
            join_keys: parse_env("TAVOLA_JOIN_KEYS", "static")?,
            unknown_role_policy: parse_env("TAVOLA_UNKNOWN_ROLE_POLICY", "admin")?,
            log_json: get_optional_env("TAVOLA_LOG_JSON").is_some(),
            sentry_dsn: get_optional_env("SENTRY_DSN").map(SecretString::from),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_optional_env("SENTRY_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
            sentry_traces_sample_rate: get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.1),
        })
    }

    /// Configuration for tests and local tooling: static join keys, default
    /// timeouts, no Sentry.
    #[must_use]
    pub fn local(api_base_url: Url) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            api: ApiConfig {
                base_url: api_base_url,
                timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
                health_timeout: Duration::from_secs(DEFAULT_HEALTH_TIMEOUT_SECS),
            },
            join_keys: JoinKeyMode::Static,
            unknown_role_policy: UnknownRolePolicy::default(),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies must be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the API base URL, forcing a trailing slash so relative joins keep
/// any path prefix (`https://host/api` + `health` → `https://host/api/health`).
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or is not
/// http(s).
pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("TAVOLA_API_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "TAVOLA_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_adds_trailing_slash() {
        let url = parse_api_url("https://ops.example.com/api/v1").unwrap();
        assert_eq!(url.as_str(), "https://ops.example.com/api/v1/");
        assert_eq!(
            url.join("health").unwrap().as_str(),
            "https://ops.example.com/api/v1/health"
        );
    }

    #[test]
    fn test_parse_api_url_root() {
        let url = parse_api_url("http://localhost:8000").unwrap();
        assert_eq!(url.join("health").unwrap().as_str(), "http://localhost:8000/health");
    }

    #[test]
    fn test_parse_api_url_rejects_other_schemes() {
        assert!(matches!(
            parse_api_url("ftp://ops.example.com"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_join_key_mode_parse() {
        assert_eq!("remote".parse::<JoinKeyMode>().unwrap(), JoinKeyMode::Remote);
        assert!("ldap".parse::<JoinKeyMode>().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let mut config = ConsoleConfig::local(parse_api_url("http://localhost:8000").unwrap());
        config.port = 3100;

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3100);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_debug_redacts_sentry_dsn() {
        let mut config = ConsoleConfig::local(parse_api_url("http://localhost:8000").unwrap());
        config.sentry_dsn = Some(SecretString::from("https://abc123secret@o1.ingest.sentry.io/9"));

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("localhost:8000"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("abc123secret"));
    }
}
