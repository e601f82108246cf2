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

//! Named events, their listeners and the emitter that connects them.
//!
//! The primary component is the [`Emitter`], a thread-safe registry mapping an
//! [`EventName`] to an ordered sequence of [`Listener`]s. Emission is
//! synchronous: every listener runs on the caller's thread, in insertion order,
//! and receives the same slice of type-erased [`Payload`] values.

mod emitter;
mod listener;
mod name;
mod payload;

pub use self::emitter::Emitter;
pub use self::listener::{Listener, ListenerId};
pub use self::name::EventName;
pub use self::payload::Payload;
