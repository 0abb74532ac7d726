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
use glint_core::target::{Target, View};
use glint_core::{LoadError, Size};
use std::sync::{Arc, Weak};

/// Adapts a [`View`] into a [`Target`].
///
/// The adapter holds the view weakly, so a dropped widget simply stops
/// receiving callbacks. The bound request is stored on the view itself.
pub struct ViewTarget<R> {
    view: Weak<dyn View<R>>,
}

impl<R> ViewTarget<R> {
    /// Wraps `view`.
    pub fn new(view: &Arc<dyn View<R>>) -> Self {
        Self {
            view: Arc::downgrade(view),
        }
    }

    /// The wrapped view, if it is still alive.
    pub fn view(&self) -> Option<Arc<dyn View<R>>> {
        self.view.upgrade()
    }
}

impl<R: Send + Sync> Target<R> for ViewTarget<R> {
    fn request(&self) -> Option<Arc<dyn Request>> {
        self.view.upgrade().and_then(|view| view.request())
    }

    fn set_request(&self, request: Option<Arc<dyn Request>>) {
        if let Some(view) = self.view.upgrade() {
            view.set_request(request);
        }
    }

    fn size(&self) -> Option<Size> {
        self.view.upgrade().and_then(|view| view.size())
    }

    fn on_load_started(&self, placeholder: Option<Arc<R>>) {
        if let Some(view) = self.view.upgrade() {
            view.set_resource(placeholder);
        }
    }

    fn on_resource_ready(&self, resource: Arc<R>, animation: Arc<dyn Animation<R>>) {
        let Some(view) = self.view.upgrade() else {
            return;
        };
        if !animation.animate(&resource, view.as_ref()) {
            view.set_resource(Some(resource));
        }
    }

    fn on_load_failed(&self, _error: &LoadError, error_placeholder: Option<Arc<R>>) {
        if let Some(view) = self.view.upgrade() {
            view.set_resource(error_placeholder);
        }
    }

    fn on_load_cleared(&self, placeholder: Option<Arc<R>>) {
        if let Some(view) = self.view.upgrade() {
            view.set_resource(placeholder);
        }
    }
}
