//! Shared fixtures for the binding scenarios

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use prefstore::{
    storable_codable, storable_raw, FileStore, FileStoreConfig, MemoryStore, RawRepresentable,
};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestEnum {
    Value1,
    Value2,
}

impl RawRepresentable for TestEnum {
    type Raw = String;

    fn raw_value(&self) -> String {
        match self {
            TestEnum::Value1 => "value1".to_string(),
            TestEnum::Value2 => "value2".to_string(),
        }
    }

    fn from_raw(raw: &String) -> Option<Self> {
        match raw.as_str() {
            "value1" => Some(TestEnum::Value1),
            "value2" => Some(TestEnum::Value2),
            _ => None,
        }
    }
}

storable_raw!(TestEnum);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub name: String,
    pub date: DateTime<Utc>,
}

storable_codable!(Note);

/// Current time at the precision dates are stored with
pub fn now() -> DateTime<Utc> {
    let micros = Utc::now().timestamp_micros();
    DateTime::<Utc>::from_timestamp_micros(micros).expect("current time in range")
}

pub fn memory() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

pub fn registering_memory() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_default_registration())
}

/// A file store in a fresh directory; keep the `TempDir` alive
pub fn file_store(format: &str) -> (TempDir, FileStoreConfig, Arc<FileStore>) {
    let dir = TempDir::new().expect("temp dir");
    let config = FileStoreConfig::new(dir.path().join("preferences")).with_format(format);
    let store = Arc::new(FileStore::open(&config).expect("open file store"));
    (dir, config, store)
}
