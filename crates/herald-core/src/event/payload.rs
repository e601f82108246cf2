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
use std::fmt;
use std::sync::Arc;

/// A type-erased value passed to listeners on emission.
///
/// Cloning a payload is cheap, it only bumps a reference count. Listeners
/// narrow values back to concrete types with [`downcast_ref`](Payload::downcast_ref);
/// a failed narrowing is the listener's concern, not the emitter's.
#[derive(Clone)]
pub struct Payload(Arc<dyn Any + Send + Sync>);

impl Payload {
    /// Wraps a value as a payload.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Returns a reference to the inner value if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns `true` if the inner value is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload").finish_non_exhaustive()
    }
}

/// Builds a `Vec<Payload>` from a list of values.
///
/// ```rust
/// use herald_core::args;
///
/// let payload = args!["x", 42_u32];
/// assert_eq!(payload[0].downcast_ref::<&str>(), Some(&"x"));
/// assert_eq!(payload[1].downcast_ref::<u32>(), Some(&42));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Payload>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Payload::new($value)),+]
    };
}
