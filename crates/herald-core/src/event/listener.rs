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

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::Payload;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique token identifying a [`Listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw token value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A cloneable handle to a callback invoked when an event is emitted.
///
/// Every call to [`Listener::new`] assigns a fresh [`ListenerId`], and clones
/// share it. Equality compares that identity, never the callback itself: two
/// listeners built from identical closures are different listeners, while a
/// clone can be used to remove the registration it was added with.
#[derive(Clone)]
pub struct Listener {
    id: ListenerId,
    callback: Arc<dyn Fn(&[Payload]) + Send + Sync>,
}

impl Listener {
    /// Wraps a callback in a new listener handle.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&[Payload]) + Send + Sync + 'static,
    {
        Self {
            id: ListenerId::next(),
            callback: Arc::new(callback),
        }
    }

    /// Returns the identity token of this listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Invokes the callback with the given payload.
    pub fn call(&self, payload: &[Payload]) {
        (self.callback)(payload)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}
