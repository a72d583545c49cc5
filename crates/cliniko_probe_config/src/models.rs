// --- File: crates/cliniko_probe_config/src/models.rs ---

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// UK2 shard; other shards are selected by overriding `api.base_url`.
pub const DEFAULT_BASE_URL: &str = "https://api.uk2.cliniko.com/v1";
pub const DEFAULT_USER_AGENT: &str = "Cliniko-API-Prober/1.0";

/// Marker that asks for a value to be read from the environment instead.
pub const SECRET_FROM_ENV: &str = "secret_from_env";

// --- API Config ---
// The key itself is normally not in a file; see env_vars for the lookup order.
#[derive(Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Unset keeps the HTTP client's own default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing)]
    pub key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: None,
            key: None,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

// --- Identifiers ---
// Account specific ids. All optional: missing ones are asked for interactively.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct IdsConfig {
    #[serde(default)]
    pub business_id: Option<String>,
    #[serde(default)]
    pub practitioner_id: Option<String>,
    /// Accepts a list in files, or a comma separated string from the environment.
    #[serde(default, deserialize_with = "one_or_many")]
    pub appointment_type_ids: Vec<String>,
}

// --- Date Window ---
// Optional YYYY-MM-DD bounds of the probed date range. Unset bounds are asked
// for interactively, and skipped ones fall back to today and today + 7 days.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct WindowConfig {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

// --- Output Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// Wrap saved bodies as {"endpoint", "params", "response"}.
    #[serde(default)]
    pub envelope: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            envelope: false,
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for a daily rolling log file, in addition to stderr.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ids: IdsConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<String>),
        One(String),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(ids) => ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect(),
        OneOrMany::One(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect(),
    })
}
