use crate::{apply_secret_overrides, load_config_from, AppConfig, DEFAULT_BASE_URL};
use std::fs;

#[test]
fn test_empty_config_dir_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(dir.path(), "debug").unwrap();

    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.api.timeout_secs, None);
    assert_eq!(config.output.dir, ".");
    assert!(!config.output.envelope);
    assert_eq!(config.logging.level, "info");
    assert!(config.ids.appointment_type_ids.is_empty());
}

#[test]
fn test_default_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        r#"
[api]
base_url = "https://api.au1.cliniko.com/v1"
timeout_secs = 15

[ids]
business_id = "111"
practitioner_id = "222"
appointment_type_ids = ["333", " 444 ", ""]

[window]
from = "2025-08-01"

[output]
dir = "artifacts"
envelope = true
"#,
    )
    .unwrap();

    let config = load_config_from(dir.path(), "debug").unwrap();

    assert_eq!(config.api.base_url, "https://api.au1.cliniko.com/v1");
    assert_eq!(config.api.timeout_secs, Some(15));
    assert_eq!(config.ids.business_id.as_deref(), Some("111"));
    assert_eq!(config.ids.practitioner_id.as_deref(), Some("222"));
    assert_eq!(config.ids.appointment_type_ids, vec!["333", "444"]);
    assert_eq!(config.window.from.as_deref(), Some("2025-08-01"));
    assert_eq!(config.window.to, None);
    assert_eq!(config.output.dir, "artifacts");
    assert!(config.output.envelope);
}

#[test]
fn test_run_env_file_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        "[logging]\nlevel = \"info\"\n[ids]\nbusiness_id = \"111\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("staging.toml"),
        "[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();

    let config = load_config_from(dir.path(), "staging").unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.ids.business_id.as_deref(), Some("111"));
}

#[test]
fn test_key_from_file_is_kept() {
    let mut config = AppConfig::default();
    config.api.key = Some("from-file".to_string());

    let config = apply_secret_overrides(config);

    assert_eq!(config.api.key.as_deref(), Some("from-file"));
}

#[test]
fn test_debug_output_redacts_key() {
    let mut config = AppConfig::default();
    config.api.key = Some("super-secret".to_string());

    let rendered = format!("{:?}", config);

    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("<redacted>"));
}
