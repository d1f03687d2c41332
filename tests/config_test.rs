//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Every layer REPLACES individual flags it specifies and keeps the rest:
//! defaults → global file → local file → `IDNCONV_*` environment.
//!
//! Note: These tests never read the real global config or process environment;
//! paths come from temp directories and the environment from a fixed map.

use std::collections::HashMap;
use std::fs;

use config::Environment;
use tempfile::TempDir;

use idnconv::config::{local_config_path, Settings};
use idnconv::ProcessingOptions;

fn env(vars: &[(&str, &str)]) -> Environment {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Environment::default().source(Some(map))
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
[idna]
transitional = true
check_bidi = false
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load_from(None, Some(dir.path()), env(&[])).expect("load settings");

    // Assert
    assert!(settings.idna.transitional);
    assert!(!settings.idna.check_bidi);
    assert!(settings.idna.check_hyphens, "unspecified flag keeps default");
    assert!(!settings.output.json);
}

#[test]
fn given_global_and_local_config_when_load_then_local_wins() {
    let global_dir = TempDir::new().unwrap();
    let global_path = global_dir.path().join("idnconv.toml");
    fs::write(
        &global_path,
        r#"
[idna]
use_std3_ascii_rules = false
transitional = true

[output]
json = true
"#,
    )
    .unwrap();

    let local_dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(local_dir.path()),
        r#"
[idna]
transitional = false
"#,
    )
    .unwrap();

    let settings = Settings::load_from(Some(&global_path), Some(local_dir.path()), env(&[]))
        .expect("load settings");

    assert!(!settings.idna.transitional, "local overrides global");
    assert!(!settings.idna.use_std3_ascii_rules, "global survives");
    assert!(settings.output.json, "global survives");
}

#[test]
fn given_env_vars_when_load_then_override_files() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
[idna]
verify_dns_length = true
"#,
    )
    .unwrap();

    let settings = Settings::load_from(
        None,
        Some(dir.path()),
        env(&[("IDNCONV_IDNA__VERIFY_DNS_LENGTH", "false")]),
    )
    .expect("load settings");

    assert!(!settings.idna.verify_dns_length);
}

#[test]
fn given_missing_files_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let settings =
        Settings::load_from(Some(&missing), Some(dir.path()), env(&[])).expect("load settings");

    assert_eq!(settings.idna, ProcessingOptions::default());
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[idna\ntransitional = ").unwrap();

    let err = Settings::load_from(None, Some(dir.path()), env(&[])).unwrap_err();

    assert!(err.to_string().starts_with("config error:"), "{err}");
}

#[test]
fn given_wrong_value_type_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
[idna]
transitional = "yes"
"#,
    )
    .unwrap();

    assert!(Settings::load_from(None, Some(dir.path()), env(&[])).is_err());
}
