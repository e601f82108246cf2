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

//! Process-wide defaults and per-instance settings for an [`Emitter`](crate::Emitter).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EmitterError, EmitterResult};

/// The crate version, exposed for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The listener cap applied to new emitters. `0` means unlimited.
pub const DEFAULT_MAX_LISTENERS: usize = 0;

/// Whether new emitters log capacity and validation warnings.
pub const ENABLE_WARNINGS: bool = false;

/// Settings used to construct an [`Emitter`](crate::Emitter).
///
/// Missing fields in a serialized document fall back to their defaults, so a
/// config file only needs to name the values it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// The maximum number of listeners any single event may hold. `0` disables the cap.
    pub max_listeners: usize,
    /// If `true`, dropped registrations and rejected limits are logged at `warn` level.
    pub warnings: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
            warnings: ENABLE_WARNINGS,
        }
    }
}

impl EmitterConfig {
    /// Parses a config from a JSON document.
    pub fn from_json_str(source: &str) -> EmitterResult<Self> {
        serde_json::from_str(source).map_err(|e| EmitterError::ConfigParse(e.to_string()))
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> EmitterResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| EmitterError::ConfigIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json_str(&source)?;
        log::debug!("Loaded emitter config from '{}': {config:?}", path.display());
        Ok(config)
    }
}
