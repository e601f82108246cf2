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

//! Defines the error type for the emitter and its configuration layer.

use std::fmt::{self, Display};

use crate::event::EventName;

/// A specialized `Result` type for emitter operations that can fail.
pub type EmitterResult<T> = Result<T, EmitterError>;

/// An error that can occur within the emitter.
///
/// Registration and lookup never fail: capacity overflow and invalid limits are
/// handled as warnings. Errors only surface from isolated emission and from
/// loading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitterError {
    /// One or more listeners panicked during an isolated emission.
    ListenerPanicked {
        /// The event that was being emitted.
        event: EventName,
        /// How many listeners panicked.
        panicked: usize,
        /// The message of the first panic, if it carried one.
        first_message: Option<String>,
    },
    /// A configuration file could not be read.
    ConfigIo {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error.
        message: String,
    },
    /// A configuration document was not valid.
    ConfigParse(String),
}

impl Display for EmitterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitterError::ListenerPanicked {
                event,
                panicked,
                first_message,
            } => {
                write!(f, "{panicked} listener(s) panicked while emitting '{event}'")?;
                if let Some(message) = first_message {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            EmitterError::ConfigIo { path, message } => {
                write!(f, "Failed to read emitter config from '{path}': {message}")
            }
            EmitterError::ConfigParse(msg) => write!(f, "Invalid emitter config: {msg}"),
        }
    }
}

impl std::error::Error for EmitterError {}
