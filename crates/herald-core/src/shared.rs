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

//! A lazily created, process-wide [`Emitter`] with free-function accessors.
//!
//! This is a convenience for application code that would rather not thread an
//! emitter through every call site. The instance is shared by the whole
//! process, so tests that need isolation should construct their own
//! [`Emitter`] instead.

use std::sync::OnceLock;

use crate::config::EmitterConfig;
use crate::error::EmitterResult;
use crate::event::{Emitter, EventName, Listener, Payload};

static SHARED: OnceLock<Emitter> = OnceLock::new();

/// Returns the shared emitter, creating it with the default config on first use.
pub fn emitter() -> &'static Emitter {
    SHARED.get_or_init(|| Emitter::with_config(EmitterConfig::default()))
}

/// See [`Emitter::add_listener`].
pub fn add_listener<I>(name: impl Into<EventName>, listeners: I)
where
    I: IntoIterator<Item = Listener>,
{
    emitter().add_listener(name, listeners);
}

/// See [`Emitter::on`].
pub fn on<I>(name: impl Into<EventName>, listeners: I)
where
    I: IntoIterator<Item = Listener>,
{
    emitter().on(name, listeners);
}

/// See [`Emitter::once`].
pub fn once<I>(name: impl Into<EventName>, listeners: I)
where
    I: IntoIterator<Item = Listener>,
{
    emitter().once(name, listeners);
}

/// See [`Emitter::prepend_listener`].
pub fn prepend_listener<I>(name: impl Into<EventName>, listeners: I)
where
    I: IntoIterator<Item = Listener>,
{
    emitter().prepend_listener(name, listeners);
}

/// See [`Emitter::emit`].
pub fn emit(name: impl AsRef<str>, payload: &[Payload]) {
    emitter().emit(name, payload);
}

/// See [`Emitter::try_emit`].
pub fn try_emit(name: impl AsRef<str>, payload: &[Payload]) -> EmitterResult<usize> {
    emitter().try_emit(name, payload)
}

/// See [`Emitter::event_names`].
pub fn event_names() -> Vec<EventName> {
    emitter().event_names()
}

/// See [`Emitter::max_listeners`].
pub fn max_listeners() -> usize {
    emitter().max_listeners()
}

/// See [`Emitter::set_max_listeners`].
pub fn set_max_listeners(n: isize) {
    emitter().set_max_listeners(n);
}

/// See [`Emitter::listener_count`].
pub fn listener_count(name: impl AsRef<str>) -> usize {
    emitter().listener_count(name)
}

/// See [`Emitter::listeners`].
pub fn listeners(name: impl AsRef<str>) -> Vec<Listener> {
    emitter().listeners(name)
}

/// See [`Emitter::remove_listener`].
pub fn remove_listener(name: impl AsRef<str>, listener: &Listener) -> bool {
    emitter().remove_listener(name, listener)
}

/// See [`Emitter::remove_all_listeners`].
pub fn remove_all_listeners(name: impl AsRef<str>) -> bool {
    emitter().remove_all_listeners(name)
}

/// See [`Emitter::clear`].
pub fn clear() {
    emitter().clear();
}

/// See [`Emitter::len`].
pub fn len() -> usize {
    emitter().len()
}
