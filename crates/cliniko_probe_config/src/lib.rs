use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

/// Directory holding `default.toml` and the per-`RUN_ENV` overlays.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Loads the configuration from `CLINIKO_PROBE_CONFIG_DIR` (or `./config`),
/// overlaid with `config/{RUN_ENV}` and `CLINIKO_PROBE__*` environment variables.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CLINIKO_PROBE_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

    load_config_from(&config_dir, &run_env)
}

/// Loads the configuration from an explicit directory and run environment.
///
/// Both files are optional; every field has a default, so an empty directory
/// yields `AppConfig::default()` plus whatever the environment overrides.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let prefix = env_vars::get_config_prefix();
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!(
        "loading config: default={} env={}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(Environment::with_prefix(&prefix).separator(env_vars::CONFIG_SEPARATOR));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(apply_secret_overrides(raw_config))
}

/// Fills the API key from the environment when the files leave it unset or
/// carry the `secret_from_env` marker.
pub fn apply_secret_overrides(mut config: AppConfig) -> AppConfig {
    let needs_env = match config.api.key.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(value) => value == SECRET_FROM_ENV,
    };
    if needs_env {
        config.api.key = env_vars::get_secret_env_var("api.key");
    }
    config
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads `.env` (or the file named by `DOTENV_OVERRIDE`) into the process
/// environment once, returning the path that was tried.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod lib_test;
