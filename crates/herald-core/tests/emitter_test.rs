// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use herald_core::{args, Emitter, EmitterError, EventName, Listener};

fn counting_listener(counter: &Arc<AtomicUsize>) -> Listener {
    let counter = Arc::clone(counter);
    Listener::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

fn recording_listener(log: &Arc<Mutex<Vec<usize>>>, tag: usize) -> Listener {
    let log = Arc::clone(log);
    Listener::new(move |_| log.lock().unwrap().push(tag))
}

#[test]
fn listener_count_matches_total_added() {
    let emitter = Emitter::new();
    let counter = Arc::new(AtomicUsize::new(0));

    for batch in 1..=4 {
        let listeners: Vec<Listener> = (0..batch).map(|_| counting_listener(&counter)).collect();
        emitter.add_listener("sum", listeners);
    }
    emitter.on("other", [counting_listener(&counter)]);

    assert_eq!(emitter.listener_count("sum"), 1 + 2 + 3 + 4);
    assert_eq!(emitter.listener_count("other"), 1);
    assert_eq!(emitter.listener_count("absent"), 0);
}

#[test]
fn emit_follows_insertion_order() {
    // --- 1. ARRANGE ---
    let emitter = Emitter::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    for tag in 0..10 {
        emitter.on("ordered", [recording_listener(&log, tag)]);
    }

    // --- 2. ACT ---
    emitter.emit("ordered", &[]);

    // --- 3. ASSERT ---
    assert_eq!(*log.lock().unwrap(), (0..10).collect::<Vec<_>>());
}

#[test]
fn remove_listener_removes_only_first_match() {
    // --- 1. ARRANGE ---
    // The same handle is registered three times, sandwiched between two others.
    let emitter = Emitter::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let repeated = recording_listener(&log, 7);
    emitter.on("dup", [recording_listener(&log, 1)]);
    emitter.on("dup", [repeated.clone(), repeated.clone(), repeated.clone()]);
    emitter.on("dup", [recording_listener(&log, 2)]);
    assert_eq!(emitter.listener_count("dup"), 5);

    // --- 2. ACT ---
    let removed = emitter.remove_listener("dup", &repeated);

    // --- 3. ASSERT ---
    assert!(removed);
    assert_eq!(emitter.listener_count("dup"), 4);
    emitter.emit("dup", &[]);
    assert_eq!(*log.lock().unwrap(), vec![1, 7, 7, 2]);
}

#[test]
fn distinct_closures_do_not_match_on_removal() {
    let emitter = Emitter::new();
    let registered = Listener::new(|_| {});
    let lookalike = Listener::new(|_| {});
    emitter.on("identity", [registered.clone()]);

    assert!(!emitter.remove_listener("identity", &lookalike));
    assert_eq!(emitter.listener_count("identity"), 1);
    assert!(emitter.remove_listener("identity", &registered));
}

#[test]
fn remove_all_listeners_drops_the_name() {
    let emitter = Emitter::new();
    let counter = Arc::new(AtomicUsize::new(0));
    emitter.on("x", [counting_listener(&counter), counting_listener(&counter)]);
    emitter.on("y", [counting_listener(&counter)]);

    assert!(emitter.remove_all_listeners("x"));

    let names = emitter.event_names();
    assert!(!names.contains(&EventName::from("x")));
    assert!(names.contains(&EventName::from("y")));
    assert_eq!(emitter.listener_count("x"), 0);
    assert!(emitter.listeners("x").is_empty());
}

#[test]
fn max_listeners_caps_registrations() {
    // --- 1. ARRANGE ---
    let emitter = Emitter::new();
    let counter = Arc::new(AtomicUsize::new(0));
    emitter.set_max_listeners(2);

    // --- 2. ACT ---
    for _ in 0..3 {
        emitter.add_listener("capped", [counting_listener(&counter)]);
    }
    emitter.emit("capped", &[]);

    // --- 3. ASSERT ---
    assert_eq!(emitter.listener_count("capped"), 2);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn max_listeners_applies_to_once_and_prepend() {
    // --- 1. ARRANGE ---
    let emitter = Emitter::new();
    let original = Arc::new(AtomicUsize::new(0));
    let rejected = Arc::new(AtomicUsize::new(0));
    emitter.set_max_listeners(1);
    emitter.on("full", [counting_listener(&original)]);

    // --- 2. ACT ---
    emitter.once("full", [counting_listener(&rejected)]);
    emitter.prepend_listener("full", [counting_listener(&rejected)]);
    emitter.emit("full", &[]);

    // --- 3. ASSERT ---
    assert_eq!(emitter.listener_count("full"), 1);
    assert_eq!(original.load(Ordering::SeqCst), 1);
    assert_eq!(rejected.load(Ordering::SeqCst), 0);
}

#[test]
fn max_listeners_is_per_event_name() {
    let emitter = Emitter::new();
    emitter.set_max_listeners(1);
    emitter.on("first", [Listener::new(|_| {})]);
    emitter.on("second", [Listener::new(|_| {})]);
    emitter.on("second", [Listener::new(|_| {})]);

    assert_eq!(emitter.listener_count("first"), 1);
    assert_eq!(emitter.listener_count("second"), 1);
}

#[test]
fn negative_max_listeners_keeps_previous_value() {
    let emitter = Emitter::new();
    assert_eq!(emitter.max_listeners(), 0);
    emitter.set_max_listeners(-1);
    assert_eq!(emitter.max_listeners(), 0);

    emitter.set_max_listeners(5);
    emitter.set_warnings(true);
    emitter.set_max_listeners(-1);
    assert_eq!(emitter.max_listeners(), 5);
}

#[test]
fn clear_resets_everything() {
    let emitter = Emitter::new();
    emitter.on("a", [Listener::new(|_| {})]);
    emitter.on("b", [Listener::new(|_| {})]);
    assert_eq!(emitter.len(), 2);

    emitter.clear();

    assert_eq!(emitter.len(), 0);
    assert!(emitter.is_empty());
    assert!(emitter.event_names().is_empty());
}

#[test]
fn len_counts_names_not_listeners() {
    let emitter = Emitter::new();
    emitter.on("a", [Listener::new(|_| {}), Listener::new(|_| {})]);
    emitter.on("b", [Listener::new(|_| {})]);
    assert_eq!(emitter.len(), 2);
}

#[test]
fn two_listeners_receive_the_same_payload() {
    let emitter = Emitter::new();
    let calls: Arc<Mutex<Vec<(&'static str, Vec<String>)>>> = Arc::new(Mutex::new(Vec::new()));

    for tag in ["L1", "L2"] {
        let calls = Arc::clone(&calls);
        emitter.on(
            "a",
            [Listener::new(move |payload| {
                let values = payload
                    .iter()
                    .map(|p| p.downcast_ref::<&str>().map(|s| s.to_string()).unwrap_or_default())
                    .collect();
                calls.lock().unwrap().push((tag, values));
            })],
        );
    }

    emitter.emit("a", &args!["x", "y"]);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], ("L1", vec!["x".to_string(), "y".to_string()]));
    assert_eq!(calls[1], ("L2", vec!["x".to_string(), "y".to_string()]));
}

#[test]
fn once_listener_is_removed_after_first_emit() {
    let emitter = Emitter::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let persistent = Arc::new(AtomicUsize::new(0));
    emitter.on("boot", [counting_listener(&persistent)]);
    emitter.once("boot", [counting_listener(&counter)]);
    assert_eq!(emitter.listener_count("boot"), 2);

    for _ in 0..3 {
        emitter.emit("boot", &[]);
    }

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(persistent.load(Ordering::SeqCst), 3);
    assert_eq!(emitter.listener_count("boot"), 1);
}

#[test]
fn once_listener_can_be_removed_before_firing() {
    let emitter = Emitter::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let listener = counting_listener(&counter);
    emitter.once("never", [listener.clone()]);

    assert!(emitter.remove_listener("never", &listener));
    emitter.emit("never", &[]);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn emit_propagates_listener_panic() {
    let emitter = Arc::new(Emitter::new());
    let after = Arc::new(AtomicUsize::new(0));
    emitter.on("faulty", [Listener::new(|_| panic!("listener failed"))]);
    emitter.on("faulty", [counting_listener(&after)]);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        emitter.emit("faulty", &[]);
    }));

    assert!(result.is_err());
    assert_eq!(after.load(Ordering::SeqCst), 0);
    // The emitter stays usable after a listener unwinds through it.
    assert_eq!(emitter.listener_count("faulty"), 2);
}

#[test]
fn try_emit_isolates_listener_panics() {
    // --- 1. ARRANGE ---
    let emitter = Emitter::new();
    let after = Arc::new(AtomicUsize::new(0));
    emitter.on("faulty", [Listener::new(|_| panic!("first failure"))]);
    emitter.on("faulty", [counting_listener(&after)]);
    emitter.on("faulty", [Listener::new(|_| panic!("second failure"))]);

    // --- 2. ACT ---
    let result = emitter.try_emit("faulty", &[]);

    // --- 3. ASSERT ---
    assert_eq!(after.load(Ordering::SeqCst), 1);
    match result {
        Err(EmitterError::ListenerPanicked {
            event,
            panicked,
            first_message,
        }) => {
            assert_eq!(event, "faulty");
            assert_eq!(panicked, 2);
            assert_eq!(first_message.as_deref(), Some("first failure"));
        }
        other => panic!("Expected ListenerPanicked, got {other:?}"),
    }
}

#[test]
fn try_emit_reports_invoked_count() {
    let emitter = Emitter::new();
    let counter = Arc::new(AtomicUsize::new(0));
    emitter.on("ok", [counting_listener(&counter), counting_listener(&counter)]);

    assert_eq!(emitter.try_emit("ok", &args![1_u32]), Ok(2));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn prepend_listener_runs_before_existing() {
    let emitter = Emitter::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    emitter.on("p", [recording_listener(&log, 2)]);
    emitter.on("p", [recording_listener(&log, 3)]);
    emitter.prepend_listener("p", [recording_listener(&log, 1)]);

    emitter.emit("p", &[]);
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
}

#[test]
fn listeners_returns_a_snapshot_in_order() {
    let emitter = Emitter::new();
    let a = Listener::new(|_| {});
    let b = Listener::new(|_| {});
    emitter.on("snap", [a.clone(), b.clone()]);

    let snapshot = emitter.listeners("snap");
    emitter.remove_listener("snap", &a);

    assert_eq!(snapshot, vec![a, b.clone()]);
    assert_eq!(emitter.listeners("snap"), vec![b]);
}

#[test]
fn payload_narrowing_is_up_to_the_listener() {
    let emitter = Emitter::new();
    let seen = Arc::new(Mutex::new(None));
    let seen_clone = Arc::clone(&seen);
    emitter.on(
        "typed",
        [Listener::new(move |payload| {
            let width = payload.first().and_then(|p| p.downcast_ref::<u32>()).copied();
            *seen_clone.lock().unwrap() = Some(width);
        })],
    );

    emitter.emit("typed", &args!["not a number"]);
    assert_eq!(*seen.lock().unwrap(), Some(None));

    emitter.emit("typed", &args![640_u32]);
    assert_eq!(*seen.lock().unwrap(), Some(Some(640)));
}
