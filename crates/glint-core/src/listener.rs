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

use crate::error::LoadError;
use std::sync::Arc;

/// Observes the outcome of a request before its target does.
///
/// Both callbacks return `true` if the listener handled the event, in which
/// case the target is not notified.
pub trait RequestListener<M, R>: Send + Sync {
    /// Called when the load failed.
    fn on_exception(&self, error: &LoadError, model: Option<&M>, is_first_resource: bool)
        -> bool;

    /// Called when a resource is about to be delivered.
    fn on_resource_ready(
        &self,
        resource: &Arc<R>,
        model: Option<&M>,
        from_cache: bool,
        is_first_resource: bool,
    ) -> bool;
}
