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

//! Lifecycle bookkeeping for the requests of one context.

use glint_core::request::{Request, RequestId, RequestStatus, RequestTracker};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct TrackerState {
    requests: HashMap<RequestId, Arc<dyn Request>>,
    paused: bool,
}

/// Tracks the active requests of a context so they can be paused, resumed,
/// cleared, and restarted together.
///
/// Requests are called outside the internal lock, since they call back into
/// the tracker when they finish.
#[derive(Default)]
pub struct ActiveRequestTracker {
    state: Mutex<TrackerState>,
}

impl ActiveRequestTracker {
    /// Creates an empty, running tracker.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> Vec<Arc<dyn Request>> {
        self.state().requests.values().cloned().collect()
    }

    /// Pauses every running request. Requests added while paused are not begun.
    pub fn pause_requests(&self) {
        let requests = {
            let mut state = self.state();
            state.paused = true;
            state.requests.values().cloned().collect::<Vec<_>>()
        };
        log::debug!("Pausing {} tracked request(s).", requests.len());
        for request in requests.iter().filter(|r| r.is_running()) {
            request.pause();
        }
    }

    /// Begins every request that is pending, then accepts new requests again.
    pub fn resume_requests(&self) {
        let requests = {
            let mut state = self.state();
            state.paused = false;
            state.requests.values().cloned().collect::<Vec<_>>()
        };
        log::debug!("Resuming {} tracked request(s).", requests.len());
        for request in requests
            .iter()
            .filter(|r| r.status() == RequestStatus::Pending)
        {
            request.begin();
        }
    }

    /// Clears every tracked request and forgets it.
    pub fn clear_requests(&self) {
        let requests: Vec<_> = self.state().requests.drain().map(|(_, r)| r).collect();
        log::debug!("Clearing {} tracked request(s).", requests.len());
        for request in requests {
            request.clear();
        }
    }

    /// Restarts every unfinished request: running ones are paused, then all
    /// of them are begun again unless the tracker is paused.
    pub fn restart_requests(&self) {
        let paused = self.state().paused;
        let requests = self.snapshot();
        log::debug!("Restarting {} tracked request(s).", requests.len());
        for request in requests.iter().filter(|r| r.status().is_active()) {
            request.pause();
            if !paused {
                request.begin();
            }
        }
    }

    /// Number of tracked requests.
    pub fn len(&self) -> usize {
        self.state().requests.len()
    }

    /// Whether no request is tracked.
    pub fn is_empty(&self) -> bool {
        self.state().requests.is_empty()
    }

    /// Whether the request with `id` is tracked.
    pub fn contains(&self, id: RequestId) -> bool {
        self.state().requests.contains_key(&id)
    }
}

impl RequestTracker for ActiveRequestTracker {
    fn add_request(&self, request: Arc<dyn Request>) {
        let id = request.id();
        self.state().requests.entry(id).or_insert(request);
    }

    fn remove_request(&self, request: &Arc<dyn Request>) {
        let removed = self.state().requests.remove(&request.id());
        if let Some(removed) = removed {
            if removed.status().is_active() {
                removed.clear();
            }
        }
    }

    fn is_paused(&self) -> bool {
        self.state().paused
    }
}
