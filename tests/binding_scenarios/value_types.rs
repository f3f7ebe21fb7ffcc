//! One binding per value category, each starting from its default

use std::collections::{HashMap, HashSet};

use prefstore::{Blob, ConversionError, KeyValueStore, Storable, Value};
use url::Url;

use crate::common::{memory, now, registering_memory, Note, TestEnum};

#[test]
fn string_binding() {
    let store = registering_memory();
    let string = Storable::new("TestString", String::new(), store);
    assert_eq!(string.get(), "");

    string.set("Test".to_string());
    assert_eq!(string.get(), "Test");
    assert!(string.stored_value().is_some());
}

#[test]
fn score_default_write_remove() {
    let store = memory();
    let score = Storable::new("Score", 0i64, store.clone());
    assert_eq!(score.get(), 0);

    score.set(42);
    assert_eq!(score.get(), 42);
    assert_eq!(store.get("Score"), Some(Value::I64(42)));

    score.remove();
    assert_eq!(score.get(), 0);
    assert_eq!(score.stored_value(), None);
}

#[test]
fn optional_date_binding() {
    let date = Storable::new("TestDate", None, memory());
    assert_eq!(date.get(), None);

    let at = now();
    date.set(Some(at));
    assert_eq!(date.get(), Some(at));
    assert!(matches!(date.stored_raw(), Some(Value::Date(_))));
}

#[test]
fn optional_array_binding() {
    let array: Storable<Option<Vec<String>>> = Storable::new("TestArray", None, memory());
    assert_eq!(array.get(), None);

    let a = vec!["a".to_string(), "b".to_string()];
    array.set(Some(a.clone()));
    assert_eq!(array.get(), Some(a));
    assert!(array.stored_value().is_some());

    array.set(None);
    assert_eq!(array.get(), None);
    assert_eq!(array.stored_raw(), None);
}

#[test]
fn dictionary_of_dates_binding() {
    let dict = Storable::new("TestDictionary", None, memory());
    assert_eq!(dict.get(), None);

    let mut d = HashMap::new();
    d.insert("A".to_string(), now());
    d.insert("B".to_string(), now());
    dict.set(Some(d.clone()));
    assert_eq!(dict.get(), Some(d));
    assert!(matches!(dict.stored_raw(), Some(Value::Object(_))));
}

#[test]
fn set_binding() {
    let set = Storable::new("TestSet", None, memory());
    assert_eq!(set.get(), None);

    let s: HashSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    set.set(Some(s.clone()));
    assert_eq!(set.get(), Some(s));
    assert!(matches!(set.stored_raw(), Some(Value::Set(items)) if items.len() == 3));
}

#[test]
fn optional_url_binding() {
    let url: Storable<Option<Url>> = Storable::new("TestURL", None, memory());
    assert_eq!(url.get(), None);

    let u = Url::parse("https://www.example.com/path?q=1").unwrap();
    url.set(Some(u.clone()));
    assert_eq!(url.get(), Some(u.clone()));
    assert_eq!(url.stored_raw(), Some(Value::from(u.as_str())));
}

#[test]
fn non_optional_url_falls_back_after_remove() {
    let fallback = Url::parse("https://www.example.com").unwrap();
    let a_url = Storable::new("TestAURL", fallback.clone(), memory());
    assert_eq!(a_url.get(), fallback);

    let u = Url::parse("https://other.example.org").unwrap();
    a_url.set(u.clone());
    assert_eq!(a_url.get(), u);
    assert!(a_url.stored_value().is_some());

    a_url.remove();
    assert_eq!(a_url.get(), fallback);
}

#[test]
fn enum_binding() {
    let store = memory();
    let the_enum = Storable::new("TestEnum", TestEnum::Value1, store.clone());
    assert_eq!(the_enum.get(), TestEnum::Value1);

    the_enum.set(TestEnum::Value2);
    assert_eq!(the_enum.get(), TestEnum::Value2);
    assert_eq!(store.get("TestEnum"), Some(Value::from("value2")));
}

#[test]
fn codable_binding() {
    let codable: Storable<Option<Note>> = Storable::new("TestCodable", None, memory());
    assert_eq!(codable.get(), None);

    let at = now();
    let note = Note {
        name: "hi".to_string(),
        date: at,
    };
    codable.set(Some(note.clone()));
    let read = codable.get().unwrap();
    assert_eq!(read, note);
    assert_eq!(read.name, "hi");
    assert_eq!(read.date, at);
    assert!(matches!(codable.stored_raw(), Some(Value::Bytes(_))));
}

#[test]
#[should_panic(expected = "TestCodable")]
fn corrupted_codable_bytes_abort_read() {
    let store = memory();
    store.set("TestCodable", Some(Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef])));
    let codable: Storable<Option<Note>> = Storable::new("TestCodable", None, store);
    codable.get();
}

#[test]
fn corrupted_codable_bytes_reported_by_try_get() {
    let store = memory();
    store.set("TestCodable", Some(Value::Bytes(vec![0xde, 0xad])));
    let codable: Storable<Option<Note>> = Storable::new("TestCodable", None, store);
    assert!(matches!(
        codable.try_get(),
        Err(ConversionError::Decode { .. })
    ));
}

#[test]
fn blob_binding() {
    let bytes = Storable::new("Bytes", Blob::default(), memory());
    bytes.set(Blob::from(vec![0u8, 255, 7]));
    assert_eq!(bytes.get().into_vec(), vec![0, 255, 7]);
}

#[test]
fn collections_read_back_every_element() {
    let store = memory();
    let groups: Storable<HashMap<String, Vec<String>>> =
        Storable::new("Groups", HashMap::new(), store.clone());
    let mut written = HashMap::new();
    written.insert("admins".to_string(), vec!["ann".to_string(), "ann".to_string()]);
    written.insert("guests".to_string(), Vec::new());
    groups.set(written.clone());
    assert_eq!(groups.get(), written);

    let recent = Storable::new("Recent", Some(vec![9i32]), store);
    recent.set(Some(Vec::new()));
    assert_eq!(recent.get(), Some(Vec::new()));
    assert_eq!(recent.stored_raw(), Some(Value::Array(Vec::new())));
}

#[test]
fn nil_write_clears_value() {
    let date = Storable::new("TestDate", None, memory());
    date.set(Some(now()));
    assert!(date.stored_value().is_some());

    date.set(None);
    assert_eq!(date.get(), None);
    assert_eq!(date.stored_raw(), None);
}

#[test]
fn remove_keeps_registered_default() {
    let string = Storable::new("TestString", String::new(), registering_memory());
    string.set("Test".to_string());
    assert!(string.stored_value().is_some());

    string.remove();
    assert_eq!(string.get(), *string.default_value());
    assert!(string.stored_value().is_some());
}

#[test]
fn remove_clears_optional_value() {
    let date = Storable::new("TestDate", None, registering_memory());
    date.set(Some(now()));
    assert!(date.stored_value().is_some());

    date.remove();
    assert_eq!(date.get(), None);
    assert_eq!(date.stored_value(), None);
}

proptest::proptest! {
    #[test]
    fn collections_roundtrip_through_binding(
        list in proptest::collection::vec(proptest::num::u32::ANY, 0..16),
        set in proptest::collection::hash_set("[a-z]{1,6}", 0..8),
    ) {
        let store = memory();
        let list_binding = Storable::new("List", Vec::new(), store.clone());
        let set_binding = Storable::new("Set", HashSet::new(), store);

        list_binding.set(list.clone());
        set_binding.set(set.clone());

        proptest::prop_assert_eq!(list_binding.get(), list);
        proptest::prop_assert_eq!(set_binding.get(), set);
    }
}
