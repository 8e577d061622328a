//! Configuration types for logslice

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use utoipa::ToSchema;

/// Top-level configuration
///
/// Everything has a sensible default: an unconfigured `Config` serves logs
/// from `./logs` and binds the API to `127.0.0.1:6789`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Directory holding the shared source log and all generated per-date
    /// files (default: "./logs")
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Artificial delay before a worker starts extraction, in seconds
    /// (default: 0)
    ///
    /// Lets operators stage load for demos or smoke tests without touching
    /// the extraction path. Zero means workers start immediately.
    #[serde(default, with = "duration_serde")]
    pub startup_delay: Duration,

    /// REST API settings
    #[serde(default)]
    pub server: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            startup_delay: Duration::ZERO,
            server: ApiConfig::default(),
        }
    }
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:6789)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Fixed file name of the shared source log inside `log_dir`
pub const COMMON_LOG_NAME: &str = "application.log";

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 6789))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

fn default_true() -> bool {
    true
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
