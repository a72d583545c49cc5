//! Environment variable handling for the Cliniko prober.
//!
//! Configuration values use the `CLINIKO_PROBE__SECTION__KEY` pattern and are
//! picked up by the `config` builder. Secrets use the flat
//! `CLINIKO_PROBE_SECRET_SECTION_KEY` pattern, with a fallback to the
//! `CLINIKO_SECTION_KEY` names the older probing scripts read.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "CLINIKO_PROBE";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "CLINIKO_PROBE_SECRET";

/// The prefix of the legacy secret names (e.g. `CLINIKO_API_KEY`)
pub const LEGACY_PREFIX: &str = "CLINIKO";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("CLINIKO_PROBE_PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `api.base_url` becomes `CLINIKO_PROBE__API__BASE_URL`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `api.key` becomes `CLINIKO_PROBE_SECRET_API_KEY`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its legacy environment variable name
///
/// `api.key` becomes `CLINIKO_API_KEY`.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", LEGACY_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Get an environment variable for a secret path
///
/// Tries the prefixed name first and falls back to the legacy name.
/// Blank values count as unset.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    let lookup = |name: String| {
        env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    lookup(secret_path_to_env_var(path)).or_else(|| lookup(legacy_secret_path_to_env_var(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_to_env_var() {
        assert_eq!(
            config_path_to_env_var("api.base_url"),
            "CLINIKO_PROBE__API__BASE_URL"
        );
        assert_eq!(
            config_path_to_env_var("ids.business_id"),
            "CLINIKO_PROBE__IDS__BUSINESS_ID"
        );
    }

    #[test]
    fn test_secret_path_to_env_var() {
        assert_eq!(
            secret_path_to_env_var("api.key"),
            "CLINIKO_PROBE_SECRET_API_KEY"
        );
    }

    #[test]
    fn test_legacy_secret_path_to_env_var() {
        assert_eq!(legacy_secret_path_to_env_var("api.key"), "CLINIKO_API_KEY");
    }

    #[test]
    fn test_secret_lookup_prefers_prefixed_name() {
        env::set_var("CLINIKO_PROBE_SECRET_TEST_PREFERRED", "new-style");
        env::set_var("CLINIKO_TEST_PREFERRED", "old-style");
        assert_eq!(
            get_secret_env_var("test.preferred").as_deref(),
            Some("new-style")
        );
    }

    #[test]
    fn test_secret_lookup_falls_back_to_legacy_name() {
        env::set_var("CLINIKO_TEST_LEGACY_ONLY", "old-style");
        assert_eq!(
            get_secret_env_var("test.legacy_only").as_deref(),
            Some("old-style")
        );
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        env::set_var("CLINIKO_PROBE_SECRET_TEST_BLANK", "   ");
        assert_eq!(get_secret_env_var("test.blank"), None);
    }
}
