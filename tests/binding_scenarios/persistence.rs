//! Bindings over a FileStore, reopened from disk

use std::collections::HashMap;
use std::sync::Arc;

use prefstore::{FileStore, FileStoreConfig, Storable, CONFIG_FILE_NAME};

use crate::common::{file_store, now, Note, TestEnum};

#[test]
fn values_survive_reopen_in_every_format() {
    for format in ["json", "msgpack", "bincode"] {
        let (_dir, config, store) = file_store(format);
        let at = now();
        let mut dates = HashMap::new();
        dates.insert("A".to_string(), at);
        let note = Note {
            name: "saved".to_string(),
            date: at,
        };

        Storable::new("Score", 0i64, store.clone()).set(7);
        Storable::new("Theme", TestEnum::Value1, store.clone()).set(TestEnum::Value2);
        Storable::new("Dates", HashMap::new(), store.clone()).set(dates.clone());
        Storable::new("Note", None, store.clone()).set(Some(note.clone()));
        store.flush().unwrap();
        drop(store);

        let reopened = Arc::new(FileStore::open(&config).unwrap());
        assert_eq!(Storable::new("Score", 0i64, reopened.clone()).get(), 7, "{format}");
        assert_eq!(
            Storable::new("Theme", TestEnum::Value1, reopened.clone()).get(),
            TestEnum::Value2
        );
        assert_eq!(Storable::new("Dates", HashMap::new(), reopened.clone()).get(), dates);
        assert_eq!(Storable::new("Note", None, reopened).get(), Some(note));
    }
}

#[test]
fn registered_default_is_not_written_to_disk() {
    let (_dir, config, store) = file_store("json");
    let volume = Storable::new("Volume", 5u8, store.clone());
    volume.set(9);
    volume.remove();
    assert_eq!(volume.stored_value(), Some(5));
    assert_eq!(volume.get(), 5);
    store.flush().unwrap();
    drop(volume);
    drop(store);

    let reopened = Arc::new(FileStore::open(&config).unwrap());
    assert!(reopened.keys().is_empty());
}

#[test]
fn config_file_drives_store() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    let prefs_path = dir.path().join("prefs.msgpack");
    FileStoreConfig::new(&prefs_path)
        .with_format("msgpack")
        .with_flush_on_write(true)
        .write_to_file(&config_path)
        .unwrap();

    let config = FileStoreConfig::from_file(&config_path).unwrap();
    let store = Arc::new(FileStore::open(&config).unwrap());
    Storable::new("Flag", false, store.clone()).set(true);
    assert!(prefs_path.exists());
    assert!(!store.is_dirty());
}
