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

//! One-shot completion signal for requests.

use glint_core::request::RequestOutcome;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// The completion channel of a request.
///
/// It is written exactly once, when the request reaches a terminal state.
/// Later writes are ignored. Readers can peek at the outcome or block for it
/// from a thread other than the controlling thread; any number of threads may
/// wait at once.
pub struct Completion {
    outcome: Mutex<Option<RequestOutcome>>,
    sender: flume::Sender<RequestOutcome>,
    receiver: flume::Receiver<RequestOutcome>,
}

impl Completion {
    /// Creates an unresolved completion.
    pub fn new() -> Self {
        let (sender, receiver) = flume::bounded(1);
        Self {
            outcome: Mutex::new(None),
            sender,
            receiver,
        }
    }

    /// Records `outcome` if nothing was recorded yet. Returns whether it was recorded.
    pub fn resolve(&self, outcome: RequestOutcome) -> bool {
        let mut slot = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return false;
        }
        *slot = Some(outcome.clone());
        // Capacity 1 and a single write: this never blocks.
        let _ = self.sender.try_send(outcome);
        true
    }

    /// The recorded outcome, if any.
    pub fn outcome(&self) -> Option<RequestOutcome> {
        self.outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Blocks up to `timeout` for the outcome.
    ///
    /// Must not be called on the controlling thread: results are only
    /// delivered while that thread drains the completion queue.
    pub fn wait(&self, timeout: Duration) -> Option<RequestOutcome> {
        if let Some(outcome) = self.outcome() {
            return Some(outcome);
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => {
                // Hand the message on to the next waiter.
                let _ = self.sender.try_send(outcome.clone());
                Some(outcome)
            }
            Err(_) => self.outcome(),
        }
    }
}

impl Default for Completion {
    fn default() -> Self {
        Self::new()
    }
}
