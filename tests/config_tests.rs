use std::path::PathBuf;

use llm_tester::cli::Cli;
use llm_tester::config::{AppConfig, ConfigError};
use llm_tester::theme::{AppearanceMode, ColorTheme};

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert_eq!(config.appearance.mode, AppearanceMode::Dark);
    assert_eq!(config.appearance.theme, ColorTheme::Blue);
    assert!(config.credentials.path.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_parse_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("llm-tester.toml");
    std::fs::write(
        &path,
        r#"
[appearance]
mode = "light"
theme = "dark-blue"

[credentials]
path = "keys.json"
"#,
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.appearance.mode, AppearanceMode::Light);
    assert_eq!(config.appearance.theme, ColorTheme::DarkBlue);
    assert_eq!(config.credentials_path(), PathBuf::from("keys.json"));
    // Sections absent from the file keep their defaults
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn test_invalid_value_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[appearance]\nmode = \"sepia\"\n").unwrap();

    assert!(matches!(
        AppConfig::load(&path),
        Err(ConfigError::Extract(_))
    ));
}

#[test]
fn test_cli_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("llm-tester.toml");
    std::fs::write(&path, "[appearance]\nmode = \"light\"\n[logging]\nlevel = \"warn\"\n").unwrap();

    let cli = Cli {
        config: Some(path),
        appearance: Some(AppearanceMode::Dark),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    let config = AppConfig::resolve(&cli).unwrap();
    assert_eq!(config.appearance.mode, AppearanceMode::Dark);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = AppConfig::default();
    config.appearance.theme = ColorTheme::Green;
    config.save(&path).unwrap();

    let loaded = AppConfig::load(&path).unwrap();
    assert_eq!(loaded.appearance.theme, ColorTheme::Green);
}
