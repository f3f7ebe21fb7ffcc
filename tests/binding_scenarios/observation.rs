//! Will-change / did-change ordering seen from observers

use std::sync::Arc;

use parking_lot::Mutex;
use prefstore::{main_queue, BindingOptions, DidChangeDelivery, NotificationCenter, Storable};

use crate::common::{memory, Note};

#[test]
fn observers_see_old_then_new_value() {
    let score = Arc::new(Storable::new("Score", 0i64, memory()));
    let log = Arc::new(Mutex::new(Vec::new()));

    let (reader, sink) = (Arc::clone(&score), Arc::clone(&log));
    score.on_will_change(move |name| sink.lock().push((name.to_string(), reader.get())));
    let (reader, sink) = (Arc::clone(&score), Arc::clone(&log));
    score.on_did_change(move |name| sink.lock().push((name.to_string(), reader.get())));

    score.set(42);
    score.remove();

    assert_eq!(
        *log.lock(),
        vec![
            ("ScoreWillChange".to_string(), 0),
            ("ScoreDidChange".to_string(), 42),
            ("ScoreWillChange".to_string(), 42),
            ("ScoreDidChange".to_string(), 0),
        ]
    );
}

#[test]
fn prefixed_names_on_shared_center() {
    let center = Arc::new(NotificationCenter::new());
    let options = BindingOptions::new()
        .with_notifications_prefix("settings.")
        .with_notification_center(Arc::clone(&center));
    let note: Storable<Option<Note>> = Storable::with_options("note", None, memory(), options);

    assert_eq!(note.will_change_notification().as_str(), "settings.NoteWillChange");
    assert_eq!(note.did_change_notification().as_str(), "settings.NoteDidChange");
    assert!(Arc::ptr_eq(note.notifications(), &center));
}

#[test]
fn queued_did_change_trails_the_write() {
    let (queue, runner) = main_queue();
    let score = Arc::new(Storable::with_options(
        "Score",
        0i64,
        memory(),
        BindingOptions::new().with_did_change_delivery(DidChangeDelivery::Queued(queue)),
    ));
    let observed = Arc::new(Mutex::new(Vec::new()));
    let (reader, sink) = (Arc::clone(&score), Arc::clone(&observed));
    score.on_did_change(move |_| sink.lock().push(reader.get()));

    score.set(1);
    score.set(2);
    assert_eq!(score.get(), 2);
    assert!(observed.lock().is_empty());

    assert_eq!(runner.run_pending(), 2);
    assert_eq!(*observed.lock(), vec![2, 2]);
}

#[test]
fn failed_try_set_posts_nothing() {
    use prefstore::StorableValue;
    use serde::ser::Error as _;
    use serde::{Serialize, Serializer};

    #[derive(Debug, Clone, PartialEq, serde::Deserialize)]
    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to encode"))
        }
    }

    prefstore::storable_codable!(Unencodable);

    let store = memory();
    let binding = Storable::with_options(
        "bad",
        None::<Unencodable>,
        store.clone(),
        BindingOptions::new(),
    );
    let posts = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&posts);
    binding.on_will_change(move |_| *sink.lock() += 1);

    assert!(binding.try_set(Some(Unencodable)).is_err());
    assert_eq!(*posts.lock(), 0);
    assert_eq!(binding.stored_raw(), None);
    assert!(Unencodable.try_to_stored().is_err());
}
