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

//! Configuration for a [`Glint`](crate::Glint) instance.

use anyhow::{bail, Context, Result};
use glint_core::Priority;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the Glint instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlintConfig {
    /// Number of worker threads running fetch/decode jobs.
    pub worker_threads: usize,
    /// Priority used by requests that do not set one.
    pub default_priority: Priority,
    /// Whether jobs consult and fill the result cache.
    /// When disabled, every request behaves as if it skipped the disk cache.
    pub result_cache_enabled: bool,
}

impl Default for GlintConfig {
    fn default() -> Self {
        Self {
            worker_threads: 4,
            default_priority: Priority::Normal,
            result_cache_enabled: true,
        }
    }
}

impl GlintConfig {
    /// Parses a configuration from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read Glint config '{}'", path.display()))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("Failed to parse Glint config '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values that cannot be expressed by the types alone.
    pub fn validate(&self) -> Result<()> {
        if self.worker_threads == 0 {
            bail!("worker_threads must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GlintConfig::default();
        assert_eq!(config.worker_threads, 4);
        assert_eq!(config.default_priority, Priority::Normal);
        assert!(config.result_cache_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GlintConfig::from_json(r#"{ "worker_threads": 2 }"#).unwrap();
        assert_eq!(config.worker_threads, 2);
        assert!(config.result_cache_enabled);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "worker_threads": 1,
            "default_priority": "low",
            "result_cache_enabled": false
        }"#;
        let config = GlintConfig::from_json(json).unwrap();
        assert_eq!(config.default_priority, Priority::Low);
        assert!(!config.result_cache_enabled);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = GlintConfig {
            worker_threads: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
