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

use std::any::TypeId;
use std::fmt;

/// A runtime tag naming the resource type a request delivers to its target.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TranscodeType {
    id: TypeId,
    name: &'static str,
}

impl TranscodeType {
    /// Creates the tag for `R`.
    pub fn of<R: 'static>() -> Self {
        Self {
            id: TypeId::of::<R>(),
            name: std::any::type_name::<R>(),
        }
    }

    /// Returns `true` if this tag names `R`.
    pub fn is<R: 'static>(&self) -> bool {
        self.id == TypeId::of::<R>()
    }

    /// The fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for TranscodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TranscodeType({})", self.name)
    }
}
