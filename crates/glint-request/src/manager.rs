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

//! Per-context front door that hands out builders sharing one tracker.

use crate::builder::RequestBuilder;
use crate::tracker::ActiveRequestTracker;
use glint_core::provider::LoadProvider;
use glint_core::request::RequestTracker;
use glint_core::{BuildError, Context, TranscodeType};
use glint_engine::Glint;
use std::sync::Arc;

/// Creates builders for one context and drives the lifecycle of every
/// request they start.
///
/// The owner forwards its lifecycle here: [`pause`](RequestManager::pause)
/// when it goes to the background, [`resume`](RequestManager::resume) when
/// it comes back, and [`clear`](RequestManager::clear) when it is torn down.
pub struct RequestManager {
    context: Arc<Context>,
    glint: Arc<Glint>,
    tracker: Arc<ActiveRequestTracker>,
}

impl RequestManager {
    /// Creates a manager with its own tracker.
    pub fn new(context: Arc<Context>, glint: Arc<Glint>) -> Self {
        log::debug!("Request manager created for context '{}'.", context.name());
        Self {
            context,
            glint,
            tracker: Arc::new(ActiveRequestTracker::new()),
        }
    }

    /// Starts building a load of `model` into a resource of type `R`.
    pub fn load<M, R>(
        &self,
        model: Option<M>,
        provider: Option<Arc<dyn LoadProvider<M, R>>>,
    ) -> Result<RequestBuilder<M, R>, BuildError>
    where
        M: Clone + Send + Sync + 'static,
        R: Send + Sync + 'static,
    {
        let tracker: Arc<dyn RequestTracker> = self.tracker.clone();
        RequestBuilder::new(
            Some(self.context.clone()),
            model,
            provider,
            Some(TranscodeType::of::<R>()),
            Some(self.glint.clone()),
            Some(tracker),
        )
    }

    /// The context requests are built for.
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// The tracker shared by every builder of this manager.
    pub fn tracker(&self) -> &Arc<ActiveRequestTracker> {
        &self.tracker
    }

    /// Pauses running requests and holds back new ones.
    pub fn pause(&self) {
        self.tracker.pause_requests();
    }

    /// Begins paused and held-back requests.
    pub fn resume(&self) {
        self.tracker.resume_requests();
    }

    /// Clears every request.
    pub fn clear(&self) {
        self.tracker.clear_requests();
    }

    /// Restarts unfinished requests, for example after connectivity returns.
    pub fn restart(&self) {
        self.tracker.restart_requests();
    }

    /// Whether the manager is paused.
    pub fn is_paused(&self) -> bool {
        self.tracker.is_paused()
    }
}
