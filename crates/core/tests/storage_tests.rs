// ═══════════════════════════════════════════════════════════════════
// Storage Tests — preference stores, PreferenceManager
// ═══════════════════════════════════════════════════════════════════

use xrp_earnings_core::errors::CoreError;
use xrp_earnings_core::storage::manager::{PreferenceManager, DARK_MODE_KEY};
use xrp_earnings_core::storage::store::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
};

// ═══════════════════════════════════════════════════════════════════
// MemoryPreferenceStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn absent_key_is_none() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get("darkMode").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let mut store = MemoryPreferenceStore::new();
        store.set("darkMode", "true").unwrap();
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn set_overwrites() {
        let mut store = MemoryPreferenceStore::new();
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FilePreferenceStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("nope.json"));
        assert_eq!(store.get("darkMode").unwrap(), None);
    }

    #[test]
    fn empty_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "").unwrap();
        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.get("darkMode").unwrap(), None);
    }

    #[test]
    fn writes_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = FilePreferenceStore::new(&path);
        store.set("darkMode", "true").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["darkMode"], "true");
    }

    #[test]
    fn values_visible_to_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        FilePreferenceStore::new(&path).set("darkMode", "false").unwrap();

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(reopened.get("darkMode").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn other_keys_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = FilePreferenceStore::new(&path);
        store.set("other", "x").unwrap();
        store.set("darkMode", "true").unwrap();
        assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/prefs.json");
        let mut store = FilePreferenceStore::new(&path);
        store.set("darkMode", "true").unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        FilePreferenceStore::new(&path).set("darkMode", "true").unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn corrupt_file_is_a_deserialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FilePreferenceStore::new(&path);
        assert!(matches!(store.get("darkMode"), Err(CoreError::Deserialization(_))));
    }

    #[test]
    fn corrupt_file_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        let mut store = FilePreferenceStore::new(&path);
        store.set("darkMode", "true").unwrap();
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// PreferenceManager
// ═══════════════════════════════════════════════════════════════════

mod manager {
    use super::*;

    fn with_value(value: &str) -> PreferenceManager {
        let mut store = MemoryPreferenceStore::new();
        store.set(DARK_MODE_KEY, value).unwrap();
        PreferenceManager::new(Box::new(store))
    }

    #[test]
    fn key_name() {
        assert_eq!(DARK_MODE_KEY, "darkMode");
    }

    #[test]
    fn absent_defaults_to_false() {
        let manager = PreferenceManager::new(Box::new(MemoryPreferenceStore::new()));
        assert!(!manager.load_dark_mode());
    }

    #[test]
    fn reads_true_and_false() {
        assert!(with_value("true").load_dark_mode());
        assert!(!with_value("false").load_dark_mode());
    }

    #[test]
    fn unparseable_value_defaults_to_false() {
        assert!(!with_value("yes").load_dark_mode());
        assert!(!with_value("TRUE ").load_dark_mode());
    }

    #[test]
    fn unreadable_file_defaults_to_false() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "[]garbage").unwrap();
        let manager = PreferenceManager::new(Box::new(FilePreferenceStore::new(&path)));
        assert!(!manager.load_dark_mode());
    }

    #[test]
    fn save_writes_string_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut manager = PreferenceManager::new(Box::new(FilePreferenceStore::new(&path)));
        manager.save_dark_mode(true).unwrap();
        assert_eq!(
            FilePreferenceStore::new(&path).get(DARK_MODE_KEY).unwrap().as_deref(),
            Some("true")
        );
        manager.save_dark_mode(false).unwrap();
        assert!(!manager.load_dark_mode());
    }
}
