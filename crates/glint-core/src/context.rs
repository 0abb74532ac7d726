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

//! The owning UI context of a group of requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A unique identifier for a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(Uuid);

impl ContextId {
    /// Creates a new, random (version 4) `ContextId`.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The UI scope (a screen, a window, a fragment of a layout) that owns requests.
///
/// Every request is issued on behalf of exactly one context. The context does
/// not hold the requests itself; that is the job of the tracker paired with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    id: ContextId,
    name: String,
}

impl Context {
    /// Creates a new context with a fresh id and a human-readable name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ContextId::new(),
            name: name.into(),
        }
    }

    /// Returns the unique id of this context.
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Returns the human-readable name of this context.
    pub fn name(&self) -> &str {
        &self.name
    }
}
