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

use serde::{Deserialize, Serialize};

/// Scheduling priority of a load in the engine's work queues.
///
/// Workers always pick the highest-priority job available.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Needed right now, e.g. the image the user is looking at.
    Immediate,
    /// Visible soon.
    High,
    /// The default.
    #[default]
    Normal,
    /// Prefetches and thumbnails of off-screen content.
    Low,
}

impl Priority {
    /// All priorities, highest first.
    pub const ALL: [Priority; 4] = [
        Priority::Immediate,
        Priority::High,
        Priority::Normal,
        Priority::Low,
    ];

    /// Position of this priority in [`Priority::ALL`].
    pub fn index(self) -> usize {
        match self {
            Priority::Immediate => 0,
            Priority::High => 1,
            Priority::Normal => 2,
            Priority::Low => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_highest_first() {
        assert!(Priority::Immediate < Priority::High);
        assert!(Priority::Normal < Priority::Low);
        for (i, p) in Priority::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Priority::default(), Priority::Normal);
    }

    #[test]
    fn test_serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let parsed: Priority = serde_json::from_str("\"immediate\"").unwrap();
        assert_eq!(parsed, Priority::Immediate);
    }
}
