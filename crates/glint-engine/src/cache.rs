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

//! The cache of encoded results consulted before fetching.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A store of encoded results, keyed by a string built from the model and
/// the pipeline pieces that produced the bytes.
///
/// The store is read and written from worker threads.
pub trait ResultCache: Send + Sync {
    /// Returns a copy of the bytes stored under `key`.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `bytes` under `key`, replacing any previous entry.
    fn put(&self, key: &str, bytes: Vec<u8>);

    /// Removes the entry under `key`, if any.
    fn remove(&self, key: &str);
}

/// A [`ResultCache`] that keeps every entry in memory and never evicts.
#[derive(Debug, Default)]
pub struct InMemoryResultCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryResultCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultCache for InMemoryResultCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries().get(key).cloned()
    }

    fn put(&self, key: &str, bytes: Vec<u8>) {
        log::trace!("Result cache: storing {} bytes under '{}'", bytes.len(), key);
        self.entries().insert(key.to_string(), bytes);
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let cache = InMemoryResultCache::new();
        assert!(cache.is_empty());

        cache.put("a", vec![1, 2, 3]);
        assert_eq!(cache.get("a"), Some(vec![1, 2, 3]));
        assert_eq!(cache.len(), 1);

        cache.put("a", vec![4]);
        assert_eq!(cache.get("a"), Some(vec![4]));
        assert_eq!(cache.len(), 1);

        cache.remove("a");
        assert!(cache.get("a").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let cache = std::sync::Arc::new(InMemoryResultCache::new());
        cache.put("kept", vec![7]);

        let poisoner = {
            let cache = cache.clone();
            std::thread::spawn(move || {
                let _guard = cache.entries.lock().unwrap();
                panic!("worker died while holding the cache");
            })
        };
        assert!(poisoner.join().is_err());
        assert!(cache.entries.is_poisoned());

        assert_eq!(cache.get("kept"), Some(vec![7]));
        cache.put("new", vec![8]);
        assert_eq!(cache.len(), 2);
        cache.remove("kept");
        assert!(cache.get("kept").is_none());
    }
}
