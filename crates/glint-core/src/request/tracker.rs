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

use super::Request;
use std::sync::Arc;

/// The registry of active requests for one owning context.
///
/// The request builder retires a target's previous request through
/// [`remove_request`](RequestTracker::remove_request) before it registers the
/// replacement through [`add_request`](RequestTracker::add_request), so a
/// tracker never holds two live requests for the same target.
///
/// Implementations must serialize `add_request` and `remove_request`: a
/// completion delivered on the controlling thread may remove a request while
/// that thread is in the middle of issuing another one.
pub trait RequestTracker: Send + Sync {
    /// Registers `request` as active. Adding an already tracked request is a no-op.
    fn add_request(&self, request: Arc<dyn Request>);

    /// Deregisters `request` if present. Removing an absent request is a no-op.
    fn remove_request(&self, request: &Arc<dyn Request>);

    /// Returns `true` if newly added requests should not be started yet.
    fn is_paused(&self) -> bool {
        false
    }
}
