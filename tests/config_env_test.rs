//! SALESTREE_* environment overrides
//!
//! The process environment is shared across test threads, so every test here
//! holds `ENV_LOCK` while it touches SALESTREE_* variables.

use std::fs;
use std::sync::Mutex;

use tempfile::TempDir;

use salestree::application::ApplicationError;
use salestree::config::Settings;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: [&str; 3] = [
    "SALESTREE_HIERARCHY",
    "SALESTREE_PRECISION",
    "SALESTREE_SKIP_UNASSIGNABLE",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn given_env_vars_when_loading_then_override_every_file_layer() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    // Arrange
    let temp = TempDir::new().unwrap();
    let explicit = temp.path().join("local.toml");
    fs::write(
        &explicit,
        "hierarchy = \"0{File|Loser}\"\nprecision = 5\nskip_unassignable = false\n",
    )
    .unwrap();
    std::env::set_var("SALESTREE_HIERARCHY", "0{Env|Clueless}");
    std::env::set_var("SALESTREE_PRECISION", "1");
    std::env::set_var("SALESTREE_SKIP_UNASSIGNABLE", "true");

    // Act
    let settings = Settings::load_from(None, Some(&explicit));
    clear_env();

    // Assert
    let settings = settings.unwrap();
    assert_eq!(settings.hierarchy.as_deref(), Some("0{Env|Clueless}"));
    assert_eq!(settings.precision, 1);
    assert!(settings.skip_unassignable);
}

#[test]
fn given_non_numeric_precision_in_env_when_loading_then_config_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    std::env::set_var("SALESTREE_PRECISION", "abc");
    let result = Settings::load_from(None, None);
    clear_env();

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_non_boolean_skip_flag_in_env_when_loading_then_config_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    std::env::set_var("SALESTREE_SKIP_UNASSIGNABLE", "maybe");
    let result = Settings::load_from(None, None);
    clear_env();

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_negative_precision_in_env_when_loading_then_config_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    std::env::set_var("SALESTREE_PRECISION", "-3");
    let result = Settings::load_from(None, None);
    clear_env();

    assert!(matches!(result, Err(ApplicationError::Config { message }) if message.contains("negative")));
}
