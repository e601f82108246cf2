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

//! # Herald Core
//!
//! An in-process publish/subscribe registry. Callers register listeners under
//! named events and later emit those events with arbitrary payloads, invoking
//! every registered listener synchronously.
//!
//! Construct an [`Emitter`] for isolated use, or go through the lazily created
//! process-wide instance in [`shared`].

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod event;
pub mod shared;

pub use config::EmitterConfig;
pub use error::{EmitterError, EmitterResult};
pub use event::{Emitter, EventName, Listener, ListenerId, Payload};
