use std::fs;

use llm_tester::credentials::{CredentialError, CredentialRecord, CredentialStore, Provider};

fn record(openai: &str, azure: &str, claude: &str) -> CredentialRecord {
    CredentialRecord {
        openai: openai.to_string(),
        azure: azure.to_string(),
        claude: claude.to_string(),
    }
}

#[test]
fn test_save_then_reload_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut store = CredentialStore::new(&path);
    store.save(record("sk-abc", "", "xyz")).unwrap();

    let reloaded = CredentialStore::open(&path);
    assert_eq!(reloaded.record(), &record("sk-abc", "", "xyz"));
    assert_eq!(reloaded.record().get(Provider::Claude), "xyz");
}

#[test]
fn test_saved_file_is_pretty_printed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut store = CredentialStore::new(&path);
    store.save(record("sk-abc", "", "xyz")).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "{\n  \"openai\": \"sk-abc\",\n  \"azure\": \"\",\n  \"claude\": \"xyz\"\n}"
    );
}

#[test]
fn test_missing_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CredentialStore::new(dir.path().join("absent.json"));

    assert!(store.load().is_ok());
    assert_eq!(store.record(), &CredentialRecord::default());
    assert_eq!(store.record().configured().count(), 0);
}

#[test]
fn test_malformed_file_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut store = CredentialStore::new(&path);
    store.save(record("keep-me", "", "")).unwrap();

    fs::write(&path, "{ not json").unwrap();
    let err = store.load().unwrap_err();
    assert!(matches!(err, CredentialError::Parse { .. }));
    assert_eq!(store.record(), &record("keep-me", "", ""));
}

#[test]
fn test_non_string_value_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"openai": 42}"#).unwrap();

    let mut store = CredentialStore::new(&path);
    assert!(store.load().is_err());
    assert_eq!(store.record(), &CredentialRecord::default());
}

#[test]
fn test_unknown_keys_ignored_and_missing_keys_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"azure": "az-1", "gemini": "ignored"}"#).unwrap();

    let mut store = CredentialStore::open(&path);
    assert_eq!(store.record(), &record("", "az-1", ""));

    // Unknown keys are dropped on the next save
    store.save(store.record().clone()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("gemini"));
}

#[test]
fn test_failed_save_keeps_previous_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CredentialStore::new(dir.path().join("no-such-dir").join("config.json"));

    let err = store.save(record("sk", "", "")).unwrap_err();
    assert!(matches!(err, CredentialError::Write { .. }));
    assert_eq!(store.record(), &CredentialRecord::default());
}
