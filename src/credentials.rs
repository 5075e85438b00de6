//! API credential storage backed by a JSON sidecar file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// File name of the sidecar, resolved against the application root.
pub const SIDECAR_FILE_NAME: &str = "config.json";

/// Error type for credential file operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize credentials: {0}")]
    Serialize(serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Providers with a stored secret. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Azure,
    Claude,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Self::OpenAi, Self::Azure, Self::Claude];

    /// Key used in the JSON file.
    pub fn key(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Azure => "azure",
            Self::Claude => "claude",
        }
    }

    /// Field label in the options form.
    pub fn label(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI API Key:",
            Self::Azure => "Azure API Key:",
            Self::Claude => "Claude API Key:",
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::OpenAi => 0,
            Self::Azure => 1,
            Self::Claude => 2,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Secrets for every provider. Missing keys deserialize to empty strings and
/// unknown keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialRecord {
    pub openai: String,
    pub azure: String,
    pub claude: String,
}

impl CredentialRecord {
    pub fn get(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenAi => &self.openai,
            Provider::Azure => &self.azure,
            Provider::Claude => &self.claude,
        }
    }

    pub fn set(&mut self, provider: Provider, value: impl Into<String>) {
        let value = value.into();
        match provider {
            Provider::OpenAi => self.openai = value,
            Provider::Azure => self.azure = value,
            Provider::Claude => self.claude = value,
        }
    }

    /// Providers with a non-empty secret.
    pub fn configured(&self) -> impl Iterator<Item = Provider> + '_ {
        Provider::ALL
            .into_iter()
            .filter(|p| !self.get(*p).is_empty())
    }
}

/// In-memory credential record and its on-disk mirror.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    record: CredentialRecord,
}

impl CredentialStore {
    /// Store with the default (empty) record. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            record: CredentialRecord::default(),
        }
    }

    /// Store at `path`, loading it if present. Load failures are logged and
    /// leave the default record in place.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(path);
        let _ = store.load();
        store
    }

    /// Sidecar path in the application root (the launch directory).
    pub fn default_path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(SIDECAR_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> &CredentialRecord {
        &self.record
    }

    /// Reload the record from disk.
    ///
    /// A missing file is not an error. Read or parse failures are logged and
    /// returned, and the in-memory record is left untouched.
    pub fn load(&mut self) -> Result<(), CredentialError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no credential file, keeping defaults");
            return Ok(());
        }

        match read_record(&self.path) {
            Ok(record) => {
                self.record = record;
                info!(path = %self.path.display(), "loaded credentials");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load credentials");
                Err(e)
            }
        }
    }

    /// Write `record` to disk, overwriting the file. The in-memory record is
    /// replaced only if the write succeeds.
    pub fn save(&mut self, record: CredentialRecord) -> Result<(), CredentialError> {
        let content = serde_json::to_string_pretty(&record).map_err(CredentialError::Serialize)?;
        std::fs::write(&self.path, content).map_err(|source| CredentialError::Write {
            path: self.path.clone(),
            source,
        })?;

        self.record = record;
        info!(path = %self.path.display(), "saved credentials");
        Ok(())
    }
}

fn read_record(path: &Path) -> Result<CredentialRecord, CredentialError> {
    let content = std::fs::read_to_string(path).map_err(|source| CredentialError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| CredentialError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(object) = value.as_object() {
        for key in object.keys() {
            if !Provider::ALL.iter().any(|p| p.key() == key) {
                debug!(key = %key, "ignoring unknown credential key");
            }
        }
    }

    serde_json::from_value(value).map_err(|source| CredentialError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Edits applied to a [`CredentialForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Edit(Provider, String),
    ToggleReveal(Provider),
    Reset(CredentialRecord),
}

/// View-model behind the options form: a draft record plus which fields are
/// shown in clear text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialForm {
    draft: CredentialRecord,
    revealed: [bool; 3],
}

impl CredentialForm {
    pub fn new(record: CredentialRecord) -> Self {
        Self {
            draft: record,
            revealed: [false; 3],
        }
    }

    pub fn draft(&self) -> &CredentialRecord {
        &self.draft
    }

    pub fn is_revealed(&self, provider: Provider) -> bool {
        self.revealed[provider.slot()]
    }

    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::Edit(provider, text) => self.draft.set(provider, text),
            FormAction::ToggleReveal(provider) => {
                let slot = &mut self.revealed[provider.slot()];
                *slot = !*slot;
            }
            FormAction::Reset(record) => {
                self.draft = record;
                self.revealed = [false; 3];
            }
        }
    }

    /// Field text as shown on screen, masked unless revealed.
    pub fn display_value(&self, provider: Provider) -> String {
        let value = self.draft.get(provider);
        if self.is_revealed(provider) {
            value.to_string()
        } else {
            "*".repeat(value.chars().count())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_two_space_indent() {
        let record = CredentialRecord {
            openai: "sk-abc".to_string(),
            azure: String::new(),
            claude: "xyz".to_string(),
        };
        let json = serde_json::to_string_pretty(&record).unwrap();
        assert_eq!(
            json,
            "{\n  \"openai\": \"sk-abc\",\n  \"azure\": \"\",\n  \"claude\": \"xyz\"\n}"
        );
    }

    #[test]
    fn partial_record_fills_missing_keys() {
        let record: CredentialRecord =
            serde_json::from_str(r#"{"claude": "c", "gemini": "g"}"#).unwrap();
        assert_eq!(record.openai, "");
        assert_eq!(record.azure, "");
        assert_eq!(record.claude, "c");
    }

    #[test]
    fn reveal_toggle_flips_one_field() {
        let mut form = CredentialForm::new(CredentialRecord {
            openai: "secret".to_string(),
            ..Default::default()
        });
        assert_eq!(form.display_value(Provider::OpenAi), "******");

        form.apply(FormAction::ToggleReveal(Provider::OpenAi));
        assert!(form.is_revealed(Provider::OpenAi));
        assert!(!form.is_revealed(Provider::Azure));
        assert_eq!(form.display_value(Provider::OpenAi), "secret");

        form.apply(FormAction::ToggleReveal(Provider::OpenAi));
        assert_eq!(form.display_value(Provider::OpenAi), "******");
    }

    #[test]
    fn reset_hides_everything() {
        let mut form = CredentialForm::default();
        form.apply(FormAction::ToggleReveal(Provider::Claude));
        form.apply(FormAction::Edit(Provider::Claude, "draft".to_string()));
        form.apply(FormAction::Reset(CredentialRecord::default()));
        assert_eq!(form, CredentialForm::default());
    }

    #[test]
    fn configured_lists_non_empty() {
        let record = CredentialRecord {
            azure: "a".to_string(),
            ..Default::default()
        };
        assert_eq!(record.configured().collect::<Vec<_>>(), vec![Provider::Azure]);
    }
}
