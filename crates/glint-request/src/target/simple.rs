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

use glint_core::animation::Animation;
use glint_core::request::Request;
use glint_core::target::{RequestSlot, Target};
use glint_core::{LoadError, Size};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct Displayed<R> {
    current: Option<Arc<R>>,
    resource: Option<Arc<R>>,
    error: Option<LoadError>,
}

/// A target that stores the delivered resource instead of drawing it.
///
/// Animations are ignored: there is no widget to animate.
pub struct SimpleTarget<R> {
    size: Option<Size>,
    slot: RequestSlot,
    displayed: Mutex<Displayed<R>>,
}

impl<R> SimpleTarget<R> {
    /// Creates a target that lets the provider pick the decode size.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Creates a target that asks for resources decoded at `size`.
    pub fn with_size(size: Size) -> Self {
        Self::build(Some(size))
    }

    fn build(size: Option<Size>) -> Self {
        Self {
            size,
            slot: RequestSlot::new(),
            displayed: Mutex::new(Displayed {
                current: None,
                resource: None,
                error: None,
            }),
        }
    }

    fn displayed_state(&self) -> MutexGuard<'_, Displayed<R>> {
        self.displayed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The last resource delivered by a successful request.
    pub fn resource(&self) -> Option<Arc<R>> {
        self.displayed_state().resource.clone()
    }

    /// The error of the last failed request, reset when a new load starts.
    pub fn last_error(&self) -> Option<LoadError> {
        self.displayed_state().error.clone()
    }

    /// What is shown right now: a placeholder, the resource, or nothing.
    pub fn displayed(&self) -> Option<Arc<R>> {
        self.displayed_state().current.clone()
    }
}

impl<R> Default for SimpleTarget<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Send + Sync> Target<R> for SimpleTarget<R> {
    fn request(&self) -> Option<Arc<dyn Request>> {
        self.slot.get()
    }

    fn set_request(&self, request: Option<Arc<dyn Request>>) {
        self.slot.set(request);
    }

    fn size(&self) -> Option<Size> {
        self.size
    }

    fn on_load_started(&self, placeholder: Option<Arc<R>>) {
        let mut state = self.displayed_state();
        state.error = None;
        state.current = placeholder;
    }

    fn on_resource_ready(&self, resource: Arc<R>, _animation: Arc<dyn Animation<R>>) {
        let mut state = self.displayed_state();
        state.current = Some(resource.clone());
        state.resource = Some(resource);
    }

    fn on_load_failed(&self, error: &LoadError, error_placeholder: Option<Arc<R>>) {
        log::debug!("Target load failed: {}", error);
        let mut state = self.displayed_state();
        state.error = Some(error.clone());
        state.current = error_placeholder;
    }

    fn on_load_cleared(&self, placeholder: Option<Arc<R>>) {
        self.displayed_state().current = placeholder;
    }
}
