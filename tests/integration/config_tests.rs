//! Integration tests for the layered configuration.

use clap::Parser;
use fgroups::cli::{Cli, OutputFormat};
use fgroups::config::{Config, ConfigError};
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clear all FGROUPS_* environment variables to avoid interference.
fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("FGROUPS_") {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn test_config_load_from_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "max_fingerprint_len = 64\nmax_name_len = 4095\noutput = \"json\"\n",
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();
    assert_eq!(config.max_fingerprint_len, 64);
    assert_eq!(config.max_name_len, 4095);
    assert_eq!(config.output, OutputFormat::Json);
}

#[test]
fn test_config_missing_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();

    let config = Config::load_from_path(temp_dir.path().join("nonexistent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("missing.toml");

    match Config::load(Some(missing.as_path())) {
        Err(ConfigError::NotFound(path)) => assert_eq!(path, missing),
        other => panic!("Expected NotFound, got: {:?}", other),
    }
}

#[test]
fn test_config_hierarchy_file_env_cli() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    // 1. Config file overrides defaults
    fs::write(&config_path, "max_fingerprint_len = 64\nmax_name_len = 100\n").unwrap();

    // 2. Environment variables override config file
    std::env::set_var("FGROUPS_MAX_NAME_LEN", "200");

    let mut config = Config::load(Some(config_path.as_path())).unwrap();
    assert_eq!(config.max_fingerprint_len, 64);
    assert_eq!(config.max_name_len, 200);

    // 3. CLI flags override environment variables
    let cli = Cli::try_parse_from(["fgroups", "--max-name-len", "300", "-o", "json"]).unwrap();
    config.merge_cli(&cli).unwrap();
    assert_eq!(config.max_fingerprint_len, 64);
    assert_eq!(config.max_name_len, 300);
    assert_eq!(config.output, OutputFormat::Json);

    std::env::remove_var("FGROUPS_MAX_NAME_LEN");
}

#[test]
fn test_invalid_toml_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "max_name_len = \"lots\"\n").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Figment(_)));
}

#[test]
fn test_zero_limit_from_cli_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let mut config = Config::default();
    let cli = Cli::try_parse_from(["fgroups", "--max-fingerprint-len", "0"]).unwrap();

    let err = config.merge_cli(&cli).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidLimit {
            key: "max_fingerprint_len",
            value: 0
        }
    ));
}
