use super::*;

#[test]
fn keys_are_prefixed_per_module() {
    assert_eq!(progress_key("module1"), "quizProgress_module1");
    assert_eq!(progress_key("module2"), "quizProgress_module2");
}

#[test]
fn keys_are_sanitized() {
    assert_eq!(sanitize_key("module1"), "module1");
    assert_eq!(sanitize_key("word_2"), "word_2");
    assert_eq!(sanitize_key("Module Một"), "module-mot-a5394b0f");
    assert_eq!(sanitize_key("../etc/passwd"), "etcpasswd-62dab22f");
    assert_eq!(sanitize_key("  word_2  "), "word_2-a480a304");
}

#[test]
fn altered_names_keep_distinct_keys() {
    assert_eq!(progress_key("Module1"), "quizProgress_module1-a54bfc64");
    assert_ne!(progress_key("Module1"), progress_key("module1"));
    assert_ne!(progress_key("module 1"), progress_key("module-1"));
    assert_eq!(progress_key("!!!"), "quizProgress_2d53a722");
    assert_ne!(progress_key("!!!"), progress_key("???"));
}

#[test]
fn memory_store_round_trip() {
    let store = MemoryStore::new();
    assert_eq!(store.load("a").unwrap(), None);
    store.save("a", "{}").unwrap();
    assert_eq!(store.load("a").unwrap(), Some("{}".to_owned()));

    let shared = store.clone();
    shared.remove("a").unwrap();
    assert!(!store.contains("a"));
}

#[test]
fn file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("progress"));
    assert_eq!(store.load("quizProgress_module1").unwrap(), None);

    store.save("quizProgress_module1", "{\"score\":1}").unwrap();
    assert!(dir.path().join("progress/quizProgress_module1.json").exists());
    assert_eq!(
        store.load("quizProgress_module1").unwrap(),
        Some("{\"score\":1}".to_owned())
    );

    store.remove("quizProgress_module1").unwrap();
    assert_eq!(store.load("quizProgress_module1").unwrap(), None);
    store.remove("quizProgress_module1").unwrap();
}

#[test]
fn file_store_reports_write_failures() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let store = FileStore::new(blocker);
    assert!(store.save("quizProgress_module1", "{}").is_err());
}
