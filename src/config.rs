//! Layered application configuration: defaults, TOML file, CLI overrides.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;
use crate::credentials::CredentialStore;
use crate::theme::{AppearanceMode, ColorTheme, RenderContext};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "llm-tester.toml";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "llm-tester.log";

/// Error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub appearance: AppearanceConfig,
    pub credentials: CredentialsConfig,
    pub logging: LoggingConfig,
}

/// Appearance settings, turned into a [`RenderContext`] at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub mode: AppearanceMode,
    pub theme: ColorTheme,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Sidecar file; the application root's `config.json` when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults merged with the TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Ok(Self::figment(path).extract().map_err(Box::new)?)
    }

    /// Resolve the effective configuration for a CLI invocation.
    ///
    /// An explicit `--config` must exist; the implicit `llm-tester.toml` is
    /// optional.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::figment(Path::new(DEFAULT_CONFIG_FILE))
                .extract()
                .map_err(Box::new)?,
        };
        config.apply_cli(cli);
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::file(file))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(mode) = cli.appearance {
            self.appearance.mode = mode;
        }
        if let Some(theme) = cli.theme {
            self.appearance.theme = theme;
        }
        if let Some(ref path) = cli.credentials {
            self.credentials.path = Some(path.clone());
        }
        if let Some(ref path) = cli.log_file {
            self.logging.file = path.clone();
        }
        if let Some(ref level) = cli.log_level {
            self.logging.level = level.clone();
        }
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.appearance.mode, self.appearance.theme)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.credentials
            .path
            .clone()
            .unwrap_or_else(CredentialStore::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_dark_blue_info() {
        let config = AppConfig::default();
        assert_eq!(config.appearance.mode, AppearanceMode::Dark);
        assert_eq!(config.appearance.theme, ColorTheme::Blue);
        assert_eq!(config.logging.level, "info");
        assert!(config.credentials.path.is_none());
    }

    #[test]
    fn cli_overrides_file_values() {
        use clap::Parser;

        let cli = Cli::parse_from([
            "llm-tester",
            "--appearance",
            "light",
            "--credentials",
            "keys.json",
            "--log-level",
            "debug",
        ]);
        let mut config = AppConfig::default();
        config.apply_cli(&cli);

        assert_eq!(config.appearance.mode, AppearanceMode::Light);
        assert_eq!(config.credentials_path(), PathBuf::from("keys.json"));
        assert_eq!(config.logging.level, "debug");
    }
}
