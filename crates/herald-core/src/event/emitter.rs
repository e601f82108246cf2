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

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{EventName, Listener, Payload};
use crate::config::EmitterConfig;
use crate::error::{EmitterError, EmitterResult};

/// One entry in an event's listener sequence.
#[derive(Debug, Clone)]
struct Registration {
    /// Unique per registration, so a listener added twice can be told apart.
    seq: u64,
    listener: Listener,
    once: bool,
}

/// Where new registrations are placed in an event's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Back,
    Front,
}

type Registry = HashMap<EventName, Arc<[Registration]>>;

/// A thread-safe registry of named-event listeners with synchronous emission.
///
/// Every mutation is serialized by a single write lock on the registry. Each
/// event's listeners are stored as an immutable snapshot that mutations replace
/// wholesale, so emission clones the snapshot under a short read lock and then
/// invokes listeners with no lock held. Listeners may therefore register,
/// remove or emit on the same emitter from inside their callback.
///
/// # Example
///
/// ```rust
/// use herald_core::{args, Emitter, Listener};
///
/// let emitter = Emitter::new();
/// let greet = Listener::new(|payload| {
///     let name = payload[0].downcast_ref::<&str>().copied().unwrap_or("world");
///     println!("hello, {name}");
/// });
///
/// emitter.on("greet", [greet.clone()]);
/// emitter.emit("greet", &args!["herald"]);
///
/// assert!(emitter.remove_listener("greet", &greet));
/// assert_eq!(emitter.listener_count("greet"), 0);
/// ```
#[derive(Debug)]
pub struct Emitter {
    registry: RwLock<Registry>,
    max_listeners: AtomicUsize,
    warnings: AtomicBool,
    next_seq: AtomicU64,
}

impl Emitter {
    /// Creates an emitter with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Creates an emitter from explicit settings.
    pub fn with_config(config: EmitterConfig) -> Self {
        log::debug!("Emitter initialized with {config:?}.");
        Self {
            registry: RwLock::new(HashMap::new()),
            max_listeners: AtomicUsize::new(config.max_listeners),
            warnings: AtomicBool::new(config.warnings),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Returns a snapshot of the current settings.
    pub fn config(&self) -> EmitterConfig {
        EmitterConfig {
            max_listeners: self.max_listeners(),
            warnings: self.warnings_enabled(),
        }
    }

    /// Appends listeners to the sequence for `name`.
    ///
    /// If a listener cap is set and `name` already holds at least that many
    /// listeners, none of the given listeners are added. This is not an error;
    /// a warning is logged when warnings are enabled.
    pub fn add_listener<I>(&self, name: impl Into<EventName>, listeners: I)
    where
        I: IntoIterator<Item = Listener>,
    {
        self.register(name.into(), listeners, false, Placement::Back);
    }

    /// Alias for [`add_listener`](Self::add_listener).
    pub fn on<I>(&self, name: impl Into<EventName>, listeners: I)
    where
        I: IntoIterator<Item = Listener>,
    {
        self.add_listener(name, listeners);
    }

    /// Registers listeners that are removed the first time they are invoked.
    ///
    /// Each registration is claimed under the registry lock before it runs, so
    /// it fires at most once even when the event is emitted concurrently.
    pub fn once<I>(&self, name: impl Into<EventName>, listeners: I)
    where
        I: IntoIterator<Item = Listener>,
    {
        self.register(name.into(), listeners, true, Placement::Back);
    }

    /// Inserts listeners at the front of the sequence for `name`, ahead of any
    /// existing registrations. Follows the same capacity rule as `add_listener`.
    pub fn prepend_listener<I>(&self, name: impl Into<EventName>, listeners: I)
    where
        I: IntoIterator<Item = Listener>,
    {
        self.register(name.into(), listeners, false, Placement::Front);
    }

    /// Invokes every listener registered for `name`, in order, with `payload`.
    ///
    /// Emitting an event with no listeners does nothing. A panicking listener
    /// unwinds to the caller and the remaining listeners are skipped; use
    /// [`try_emit`](Self::try_emit) to isolate them.
    pub fn emit(&self, name: impl AsRef<str>, payload: &[Payload]) {
        self.dispatch(name.as_ref(), |listener| listener.call(payload));
    }

    /// Like [`emit`](Self::emit), but catches panics so every listener runs.
    ///
    /// Returns the number of listeners invoked, or
    /// [`EmitterError::ListenerPanicked`] if any of them panicked.
    pub fn try_emit(&self, name: impl AsRef<str>, payload: &[Payload]) -> EmitterResult<usize> {
        let name = name.as_ref();
        let mut panicked = 0;
        let mut first_message = None;

        let invoked = self.dispatch(name, |listener| {
            if let Err(cause) = panic::catch_unwind(AssertUnwindSafe(|| listener.call(payload))) {
                log::error!("Listener {:?} panicked while handling '{name}'.", listener.id());
                if panicked == 0 {
                    first_message = panic_message(cause.as_ref());
                }
                panicked += 1;
            }
        });

        if panicked > 0 {
            return Err(EmitterError::ListenerPanicked {
                event: EventName::from(name),
                panicked,
                first_message,
            });
        }
        Ok(invoked)
    }

    /// Returns every tracked event name, in no particular order.
    ///
    /// A name stays tracked after its last listener is removed, until
    /// [`remove_all_listeners`](Self::remove_all_listeners) or [`clear`](Self::clear).
    pub fn event_names(&self) -> Vec<EventName> {
        self.read().keys().cloned().collect()
    }

    /// Returns the listener cap. `0` means unlimited.
    pub fn max_listeners(&self) -> usize {
        self.max_listeners.load(Ordering::Acquire)
    }

    /// Sets the listener cap. `0` means unlimited.
    ///
    /// A negative value is rejected and leaves the current cap unchanged.
    pub fn set_max_listeners(&self, n: isize) {
        let Ok(n) = usize::try_from(n) else {
            if self.warnings_enabled() {
                log::warn!("Max listeners must be a non-negative number, tried to set: {n}");
            }
            return;
        };
        let _registry = self.write();
        self.max_listeners.store(n, Ordering::Release);
    }

    /// Returns whether capacity and validation warnings are logged.
    pub fn warnings_enabled(&self) -> bool {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Enables or disables capacity and validation warnings.
    pub fn set_warnings(&self, enabled: bool) {
        self.warnings.store(enabled, Ordering::Relaxed);
    }

    /// Returns the number of listeners registered for `name`, or `0` if absent.
    pub fn listener_count(&self, name: impl AsRef<str>) -> usize {
        self.snapshot(name.as_ref()).map_or(0, |regs| regs.len())
    }

    /// Returns a snapshot of the listeners registered for `name`, in call order.
    pub fn listeners(&self, name: impl AsRef<str>) -> Vec<Listener> {
        self.snapshot(name.as_ref())
            .map(|regs| regs.iter().map(|r| r.listener.clone()).collect())
            .unwrap_or_default()
    }

    /// Removes the first registration of `listener` for `name`.
    ///
    /// Matching uses the listener's identity, so only clones of the handle that
    /// was registered will match. Returns `true` if a registration was removed.
    pub fn remove_listener(&self, name: impl AsRef<str>, listener: &Listener) -> bool {
        let name = name.as_ref();
        let removed = self.remove_where(name, |r| r.listener == *listener);
        if removed {
            log::trace!("Removed listener {:?} from '{name}'.", listener.id());
        }
        removed
    }

    /// Deletes the entry for `name` and all of its listeners.
    ///
    /// Returns `true` once the entry is absent, including when it never existed.
    pub fn remove_all_listeners(&self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        let mut registry = self.write();
        registry.remove(name);
        !registry.contains_key(name)
    }

    /// Discards every event name and listener.
    pub fn clear(&self) {
        let mut registry = self.write();
        log::trace!("Clearing {} event(s).", registry.len());
        registry.clear();
    }

    /// Returns the number of distinct event names tracked.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if no event names are tracked.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn register<I>(&self, name: EventName, listeners: I, once: bool, placement: Placement)
    where
        I: IntoIterator<Item = Listener>,
    {
        let mut registry = self.write();
        let current = registry.get(&name).map_or(0, |regs| regs.len());
        let max = self.max_listeners();

        if max > 0 && current >= max {
            if self.warnings_enabled() {
                log::warn!(
                    "Possible emitter memory leak detected: {current} listeners added to '{name}'. \
                     Use Emitter::set_max_listeners to increase the limit."
                );
            }
            return;
        }

        let added: Vec<Registration> = listeners
            .into_iter()
            .map(|listener| Registration {
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                listener,
                once,
            })
            .collect();
        log::trace!("Registering {} listener(s) on '{name}'.", added.len());

        let existing = registry.entry(name).or_insert_with(|| Arc::from(Vec::new()));
        let mut next = Vec::with_capacity(existing.len() + added.len());
        match placement {
            Placement::Back => {
                next.extend(existing.iter().cloned());
                next.extend(added);
            }
            Placement::Front => {
                next.extend(added);
                next.extend(existing.iter().cloned());
            }
        }
        *existing = Arc::from(next);
    }

    /// Walks a snapshot of `name`'s listeners, claiming once-registrations
    /// before handing each listener to `invoke`. Returns how many were invoked.
    fn dispatch(&self, name: &str, mut invoke: impl FnMut(&Listener)) -> usize {
        let Some(snapshot) = self.snapshot(name) else {
            return 0;
        };
        log::trace!("Emitting '{name}' to {} listener(s).", snapshot.len());

        let mut invoked = 0;
        for registration in snapshot.iter() {
            if registration.once && !self.remove_where(name, |r| r.seq == registration.seq) {
                continue;
            }
            invoke(&registration.listener);
            invoked += 1;
        }
        invoked
    }

    /// Removes the first registration of `name` matching `predicate`, leaving
    /// the entry in place even if it becomes empty.
    fn remove_where(&self, name: &str, predicate: impl Fn(&Registration) -> bool) -> bool {
        let mut registry = self.write();
        let Some(existing) = registry.get_mut(name) else {
            return false;
        };
        let Some(index) = existing.iter().position(predicate) else {
            return false;
        };

        let mut next = existing.to_vec();
        next.remove(index);
        *existing = Arc::from(next);
        true
    }

    fn snapshot(&self, name: &str) -> Option<Arc<[Registration]>> {
        self.read().get(name).cloned()
    }

    // No user callback ever runs while the lock is held, so a poisoned lock
    // still guards a consistent registry.
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> Option<String> {
    cause
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| cause.downcast_ref::<String>().cloned())
}
