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

//! Hands work from the worker threads back to the controlling thread.

use std::time::{Duration, Instant};

/// A unit of work to run on the controlling thread.
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

/// A thread-safe queue of [`Completion`]s.
///
/// Any thread may [`post`](CompletionDispatcher::post); only the controlling
/// thread should drain the queue, so that everything a completion touches
/// (targets, views) is touched from one thread.
pub struct CompletionDispatcher {
    sender: flume::Sender<Completion>,
    receiver: flume::Receiver<Completion>,
}

impl CompletionDispatcher {
    /// Creates a dispatcher with an unbounded queue.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Queues `completion` to run on the next drain.
    pub fn post(&self, completion: Completion) {
        if self.sender.send(completion).is_err() {
            log::error!("Failed to post completion: dispatcher receiver is gone.");
        }
    }

    /// Returns a clone of the sending end, for worker threads.
    pub fn sender(&self) -> flume::Sender<Completion> {
        self.sender.clone()
    }

    /// Number of completions waiting to run.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Runs every completion queued right now and returns how many ran.
    ///
    /// Completions posted while draining (for example by a completion that
    /// issues a new request) are run in the same call.
    pub fn dispatch_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(completion) = self.receiver.try_recv() {
            completion();
            ran += 1;
        }
        if ran > 0 {
            log::trace!("Dispatched {ran} completion(s).");
        }
        ran
    }

    /// Waits up to `timeout` for at least one completion, then drains the queue.
    ///
    /// Returns how many completions ran; `0` means the timeout elapsed.
    pub fn dispatch_timeout(&self, timeout: Duration) -> usize {
        match self.receiver.recv_timeout(timeout) {
            Ok(completion) => {
                completion();
                1 + self.dispatch_pending()
            }
            Err(_) => 0,
        }
    }

    /// Drains until `done` returns `true` or `timeout` elapses.
    ///
    /// Returns whether `done` was satisfied.
    pub fn dispatch_until(&self, timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.dispatch_pending();
            if done() {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            self.dispatch_timeout(remaining.min(Duration::from_millis(10)));
        }
    }
}

impl Default for CompletionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
