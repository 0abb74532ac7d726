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

//! The request contract and the registry contract that tracks live requests.
//!
//! A request moves through a small state machine:
//!
//! ```text
//! Pending ──begin──▶ Running ──▶ Complete | Failed | Cancelled
//!    ▲                  │
//!    └──────pause───────┘
//! ```
//!
//! `clear` moves any non-terminal request to `Cancelled`. Terminal states are
//! final.

mod id;
mod tracker;

pub use id::RequestId;
pub use tracker::RequestTracker;

use crate::error::LoadError;

/// The lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    /// Constructed (or paused) and not currently executing.
    Pending,
    /// Handed to the load engine and waiting for a result.
    Running,
    /// A resource was delivered to the target.
    Complete,
    /// The load failed and the failure was delivered to the target.
    Failed,
    /// The request was cleared before it finished.
    Cancelled,
}

impl RequestStatus {
    /// Returns `true` for `Complete`, `Failed`, and `Cancelled`.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestStatus::Complete | RequestStatus::Failed | RequestStatus::Cancelled
        )
    }

    /// Returns `true` for `Pending` and `Running`.
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }
}

/// The value written once to a request's completion channel when it reaches a
/// terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The resource was delivered.
    Ready {
        /// Whether the resource came from the result cache rather than a fresh fetch.
        from_cache: bool,
    },
    /// The load failed.
    Failed(LoadError),
    /// The request was cleared.
    Cancelled,
}

/// An executable unit representing one load, bound to one target.
///
/// Implementations use interior mutability: every method takes `&self` so a
/// request can be shared between its target, its tracker, and the engine's
/// completion callback.
pub trait Request: Send + Sync {
    /// Returns the unique id of this request.
    fn id(&self) -> RequestId;

    /// Starts the load. Has no effect unless the request is `Pending`.
    fn begin(&self);

    /// Stops an in-flight load and returns the request to `Pending` so it can
    /// be begun again. Has no effect unless the request is `Running`.
    fn pause(&self);

    /// Cancels the request and releases its target. Idempotent.
    fn clear(&self);

    /// Returns the current lifecycle state.
    fn status(&self) -> RequestStatus;

    /// Returns `true` if the request was paused and not resumed since.
    fn is_paused(&self) -> bool;

    /// Returns `true` while the request is executing.
    fn is_running(&self) -> bool {
        self.status() == RequestStatus::Running
    }

    /// Returns `true` once a resource was delivered.
    fn is_complete(&self) -> bool {
        self.status() == RequestStatus::Complete
    }

    /// Returns `true` once the load failed.
    fn is_failed(&self) -> bool {
        self.status() == RequestStatus::Failed
    }

    /// Returns `true` once the request was cleared.
    fn is_cancelled(&self) -> bool {
        self.status() == RequestStatus::Cancelled
    }
}
