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

//! Destinations for load results.
//!
//! A [`Target`] is anything that can hold a reference to its current request
//! and accept the result of that request. A [`View`] is the narrower UI
//! widget abstraction that view-backed targets adapt.

use crate::animation::Animation;
use crate::error::LoadError;
use crate::request::Request;
use crate::size::Size;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A place a load result of type `R` can be delivered to.
///
/// A target owns at most one active request. Request builders query
/// [`request`](Target::request) before binding a new one so the previous
/// request can be retired.
///
/// The delivery callbacks are only ever invoked on the controlling thread.
pub trait Target<R>: Send + Sync {
    /// Returns the request currently bound to this target, if any.
    fn request(&self) -> Option<Arc<dyn Request>>;

    /// Rebinds this target to `request`.
    fn set_request(&self, request: Option<Arc<dyn Request>>);

    /// Returns the size the resource should be decoded at, if known.
    fn size(&self) -> Option<Size> {
        None
    }

    /// Called when the bound request starts loading.
    fn on_load_started(&self, _placeholder: Option<Arc<R>>) {}

    /// Called with the loaded resource and the animation to present it with.
    fn on_resource_ready(&self, resource: Arc<R>, animation: Arc<dyn Animation<R>>);

    /// Called when the bound request failed.
    fn on_load_failed(&self, _error: &LoadError, _error_placeholder: Option<Arc<R>>) {}

    /// Called when the bound request was cleared.
    fn on_load_cleared(&self, _placeholder: Option<Arc<R>>) {}
}

/// A UI widget that displays resources of type `R`.
///
/// Views are usually recreated or recycled by the UI layer independently of
/// any target wrapping them, so the view itself remembers its current request
/// (see [`RequestSlot`]). A new target built around a recycled view can then
/// still find and retire the view's previous request.
pub trait View<R>: Send + Sync {
    /// Returns the request currently bound to this view, if any.
    fn request(&self) -> Option<Arc<dyn Request>>;

    /// Rebinds this view to `request`.
    fn set_request(&self, request: Option<Arc<dyn Request>>);

    /// Displays `resource`, or clears the widget when `None`.
    fn set_resource(&self, resource: Option<Arc<R>>);

    /// The laid-out size of the widget, if layout already happened.
    fn size(&self) -> Option<Size> {
        None
    }

    /// Fades `resource` in over `duration`.
    ///
    /// Returns `false` if the widget cannot animate, in which case the caller
    /// falls back to [`set_resource`](View::set_resource).
    fn fade_in(&self, _resource: Arc<R>, _duration: Duration) -> bool {
        false
    }
}

/// Storage for the request bound to a target or a view.
#[derive(Default)]
pub struct RequestSlot {
    request: Mutex<Option<Arc<dyn Request>>>,
}

impl RequestSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored request.
    pub fn get(&self) -> Option<Arc<dyn Request>> {
        self.request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the stored request.
    pub fn set(&self, request: Option<Arc<dyn Request>>) {
        *self.request.lock().unwrap_or_else(PoisonError::into_inner) = request;
    }
}

impl std::fmt::Debug for RequestSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some(request) => write!(f, "RequestSlot({})", request.id()),
            None => write!(f, "RequestSlot(empty)"),
        }
    }
}
