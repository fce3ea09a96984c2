//! Configuration tests
//!
//! The template written by `to_toml` must always parse back through
//! `FileConfig`; when a field is added these tests fail until both sides
//! and the template agree.

use super::*;

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that the serialized default config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let file = parsed.unwrap();
    assert_eq!(file.bind_addr.as_deref(), Some("0.0.0.0:8083"));
    assert_eq!(file.api_url.as_deref(), Some("https://api.poe.com/bot"));
    assert_eq!(file.default_api_key.as_deref(), Some(""));
    assert!(file.logging.is_some());
}

/// Round-trip with a non-default credential and logging setup.
#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.default_api_key = "p0e-key".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    assert_eq!(parsed.default_api_key.as_deref(), Some("p0e-key"));

    let logging = LoggingConfig::from_file(parsed.logging);
    assert!(logging.file_enabled);
    assert_eq!(logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// File parsing
// ─────────────────────────────────────────────────────────────────────────────

/// A hand-written partial file: absent keys fall back to defaults.
#[test]
fn test_partial_file_config() {
    let file: FileConfig = toml::from_str(r#"api_url = "http://localhost:9000/bot""#).unwrap();

    assert_eq!(file.api_url.as_deref(), Some("http://localhost:9000/bot"));
    assert!(file.bind_addr.is_none());
    assert!(file.default_api_key.is_none());

    let logging = LoggingConfig::from_file(file.logging);
    assert_eq!(logging.level, "info");
    assert!(!logging.file_enabled);
    assert_eq!(logging.file_prefix, "poegate");
}

#[test]
fn test_logging_section_overrides() {
    let file: FileConfig = toml::from_str(
        r#"
[logging]
level = "debug"
file_enabled = true
file_dir = "/var/log/poegate"
file_rotation = "never"
"#,
    )
    .unwrap();

    let logging = LoggingConfig::from_file(file.logging);
    assert_eq!(logging.level, "debug");
    assert!(logging.file_enabled);
    assert_eq!(logging.file_dir, PathBuf::from("/var/log/poegate"));
    assert_eq!(logging.file_rotation, LogRotation::Never);
    // Not set in the file, so the default prefix survives
    assert_eq!(logging.file_prefix, "poegate");
}

// ─────────────────────────────────────────────────────────────────────────────
// Rotation parsing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_rotation_parsing() {
    assert_eq!(LogRotation::from_str("hourly"), LogRotation::Hourly);
    assert_eq!(LogRotation::from_str("DAILY"), LogRotation::Daily);
    assert_eq!(LogRotation::from_str("never"), LogRotation::Never);
    // Unknown values fall back to daily
    assert_eq!(LogRotation::from_str("weekly"), LogRotation::Daily);
}

#[test]
fn test_rotation_as_str_round_trips() {
    for rotation in [LogRotation::Hourly, LogRotation::Daily, LogRotation::Never] {
        assert_eq!(LogRotation::from_str(rotation.as_str()), rotation);
    }
}
