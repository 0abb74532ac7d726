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

//! The request state machine used by the builder.

use crate::completion::Completion;
use crate::configuration::LoadConfiguration;
use glint_core::request::{Request, RequestId, RequestOutcome, RequestStatus, RequestTracker};
use glint_core::target::Target;
use glint_core::{LoadError, Size};
use glint_engine::{LoadHandle, LoadJob, Loaded};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

// Thumbnails are not supported, so every delivered resource is the first one.
const IS_FIRST_RESOURCE: bool = true;

struct RequestState {
    status: RequestStatus,
    paused: bool,
    // Bumped by every `begin`, so results of a job started before a pause are
    // recognised as stale after the request was begun again.
    generation: u64,
    handle: Option<LoadHandle>,
}

/// A request that loads a model of type `M` into a resource of type `R`.
///
/// The request keeps only a weak reference to its target; the target (or the
/// view behind it) keeps the request alive. Adapters created by the builder
/// for views have no other owner, so the request holds those strongly.
///
/// Lock discipline: the state lock is never held while calling into the
/// target, the tracker, the listener, or the engine. Those may call back into
/// this request.
pub struct GenericRequest<M, R> {
    id: RequestId,
    config: LoadConfiguration<M, R>,
    target: Weak<dyn Target<R>>,
    // Keeps a builder-created view adapter alive; never read.
    _owned_target: Option<Arc<dyn Target<R>>>,
    tracker: Weak<dyn RequestTracker>,
    state: Mutex<RequestState>,
    completion: Completion,
    this: Weak<GenericRequest<M, R>>,
}

impl<M, R> GenericRequest<M, R>
where
    M: Clone + Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    /// Creates a `Pending` request for `target`, deregistering itself from
    /// `tracker` once it completes or fails.
    pub fn new(
        config: LoadConfiguration<M, R>,
        target: &Arc<dyn Target<R>>,
        tracker: &Arc<dyn RequestTracker>,
    ) -> Arc<Self> {
        Self::build(config, target, tracker, false)
    }

    /// Like [`new`](GenericRequest::new), but also keeps `target` alive.
    pub(crate) fn with_owned_target(
        config: LoadConfiguration<M, R>,
        target: &Arc<dyn Target<R>>,
        tracker: &Arc<dyn RequestTracker>,
    ) -> Arc<Self> {
        Self::build(config, target, tracker, true)
    }

    fn build(
        config: LoadConfiguration<M, R>,
        target: &Arc<dyn Target<R>>,
        tracker: &Arc<dyn RequestTracker>,
        own_target: bool,
    ) -> Arc<Self> {
        let request = Arc::new_cyclic(|this| Self {
            id: RequestId::new(),
            config,
            target: Arc::downgrade(target),
            _owned_target: own_target.then(|| target.clone()),
            tracker: Arc::downgrade(tracker),
            state: Mutex::new(RequestState {
                status: RequestStatus::Pending,
                paused: false,
                generation: 0,
                handle: None,
            }),
            completion: Completion::new(),
            this: this.clone(),
        });
        log::debug!(
            "Request {} created for context '{}'.",
            request.id,
            request.config.context.name()
        );
        request
    }

    /// The configuration this request was built from.
    pub fn configuration(&self) -> &LoadConfiguration<M, R> {
        &self.config
    }

    /// The completion channel, resolved on the terminal transition.
    pub fn completion(&self) -> &Completion {
        &self.completion
    }

    /// The outcome, once the request reached a terminal state.
    pub fn outcome(&self) -> Option<RequestOutcome> {
        self.completion.outcome()
    }

    fn state(&self) -> MutexGuard<'_, RequestState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_bound_to(&self, target: &Arc<dyn Target<R>>) -> bool {
        target.request().map(|r| r.id()) == Some(self.id)
    }

    fn resolve_size(&self, target: &Arc<dyn Target<R>>) -> Option<Size> {
        self.config
            .override_size
            .or_else(|| target.size())
            .map(|size| size.scaled(self.config.size_multiplier))
    }

    fn fail_without_model(&self, generation: u64) {
        log::debug!("Request {} has no model to load.", self.id);
        let this = self.this.clone();
        self.config.glint.post(Box::new(move || {
            if let Some(request) = this.upgrade() {
                request.on_load_finished(generation, Err(LoadError::MissingModel));
            }
        }));
    }

    fn start_job(&self, generation: u64, target: &Arc<dyn Target<R>>) {
        let (Some(model), Some(provider)) = (self.config.model.clone(), self.config.provider.clone())
        else {
            self.fail_without_model(generation);
            return;
        };

        let size = self.resolve_size(target);
        let job = LoadJob {
            model_key: provider.cache_key(&model),
            source_decoder: self
                .config
                .decoder
                .clone()
                .unwrap_or_else(|| provider.source_decoder()),
            cache_decoder: self
                .config
                .cache_decoder
                .clone()
                .unwrap_or_else(|| provider.cache_decoder()),
            encoder: self
                .config
                .encoder
                .clone()
                .unwrap_or_else(|| provider.encoder()),
            fetch: Box::new(move || provider.fetch(&model)),
            size,
            skip_disk_cache: self.config.skip_disk_cache,
            priority: self.config.priority,
        };
        log::debug!(
            "Request {} submitted '{}' at {:?} (size: {}).",
            self.id,
            job.model_key,
            job.priority,
            size.map(|s| s.to_string())
                .unwrap_or_else(|| "original".to_string())
        );

        let this = self.this.clone();
        let handle = self.config.glint.load(
            job,
            Box::new(move |result| {
                if let Some(request) = this.upgrade() {
                    request.on_load_finished(generation, result);
                }
            }),
        );

        let mut state = self.state();
        if state.status == RequestStatus::Running && state.generation == generation {
            state.handle = Some(handle);
        } else {
            handle.cancel();
        }
    }

    /// Handles a result on the controlling thread.
    fn on_load_finished(&self, generation: u64, result: Result<Loaded<R>, LoadError>) {
        if !self.is_current(generation) {
            log::trace!("Request {} ignoring a stale result.", self.id);
            return;
        }

        let target = match self.target.upgrade() {
            Some(target) if self.is_bound_to(&target) => target,
            _ => {
                log::debug!(
                    "Request {} lost its target before the result arrived; cancelling.",
                    self.id
                );
                if self.transition(generation, RequestStatus::Cancelled) {
                    self.completion.resolve(RequestOutcome::Cancelled);
                    self.detach();
                }
                return;
            }
        };

        match result {
            Ok(loaded) => {
                if !self.transition(generation, RequestStatus::Complete) {
                    return;
                }
                log::debug!(
                    "Request {} complete (from_cache: {}).",
                    self.id,
                    loaded.from_cache
                );
                self.deliver_resource(&target, loaded.resource, loaded.from_cache);
                self.detach();
                self.completion.resolve(RequestOutcome::Ready {
                    from_cache: loaded.from_cache,
                });
            }
            Err(error) => {
                if !self.transition(generation, RequestStatus::Failed) {
                    return;
                }
                log::warn!("Request {} failed: {}", self.id, error);
                self.deliver_failure(&target, &error);
                self.detach();
                self.completion.resolve(RequestOutcome::Failed(error));
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        let state = self.state();
        state.status == RequestStatus::Running && state.generation == generation
    }

    /// Moves a running request of `generation` to the terminal `status`.
    /// Returns `false` if it was cleared or restarted in the meantime.
    fn transition(&self, generation: u64, status: RequestStatus) -> bool {
        let mut state = self.state();
        if state.status != RequestStatus::Running || state.generation != generation {
            return false;
        }
        state.status = status;
        state.handle = None;
        true
    }

    fn deliver_resource(&self, target: &Arc<dyn Target<R>>, resource: Arc<R>, from_cache: bool) {
        let handled = self.config.listener.as_ref().is_some_and(|listener| {
            listener.on_resource_ready(
                &resource,
                self.config.model.as_ref(),
                from_cache,
                IS_FIRST_RESOURCE,
            )
        });
        if !handled {
            let animation = self.config.animation.build(from_cache, IS_FIRST_RESOURCE);
            target.on_resource_ready(resource, animation);
        }
    }

    fn deliver_failure(&self, target: &Arc<dyn Target<R>>, error: &LoadError) {
        let handled = self.config.listener.as_ref().is_some_and(|listener| {
            listener.on_exception(error, self.config.model.as_ref(), IS_FIRST_RESOURCE)
        });
        if !handled {
            let error_placeholder = self
                .config
                .error_placeholder
                .clone()
                .or_else(|| self.config.placeholder.clone());
            target.on_load_failed(error, error_placeholder);
        }
    }

    /// Deregisters from the tracker. Removing an absent request is a no-op,
    /// so this is safe after the tracker already dropped it.
    fn detach(&self) {
        let (Some(tracker), Some(this)) = (self.tracker.upgrade(), self.this.upgrade()) else {
            return;
        };
        let this: Arc<dyn Request> = this;
        tracker.remove_request(&this);
    }
}

impl<M, R> Request for GenericRequest<M, R>
where
    M: Clone + Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    fn id(&self) -> RequestId {
        self.id
    }

    fn begin(&self) {
        let generation = {
            let mut state = self.state();
            if state.status != RequestStatus::Pending {
                log::trace!(
                    "Request {} not begun: status is {:?}.",
                    self.id,
                    state.status
                );
                return;
            }
            state.status = RequestStatus::Running;
            state.paused = false;
            state.generation += 1;
            state.generation
        };

        let Some(target) = self.target.upgrade() else {
            log::debug!("Request {} has no target left; clearing.", self.id);
            self.clear();
            return;
        };

        log::debug!("Request {} running.", self.id);
        target.on_load_started(self.config.placeholder.clone());
        self.start_job(generation, &target);
    }

    fn pause(&self) {
        let handle = {
            let mut state = self.state();
            if state.status != RequestStatus::Running {
                return;
            }
            state.status = RequestStatus::Pending;
            state.paused = true;
            state.handle.take()
        };
        if let Some(handle) = handle {
            handle.cancel();
        }
        log::debug!("Request {} paused.", self.id);
        if let Some(target) = self.target.upgrade() {
            target.on_load_cleared(self.config.placeholder.clone());
        }
    }

    fn clear(&self) {
        let handle = {
            let mut state = self.state();
            if state.status.is_terminal() {
                return;
            }
            state.status = RequestStatus::Cancelled;
            state.paused = false;
            state.handle.take()
        };
        if let Some(handle) = handle {
            handle.cancel();
        }
        log::debug!("Request {} cleared.", self.id);
        if let Some(target) = self.target.upgrade() {
            target.on_load_cleared(self.config.placeholder.clone());
        }
        self.completion.resolve(RequestOutcome::Cancelled);
        self.detach();
    }

    fn status(&self) -> RequestStatus {
        self.state().status
    }

    fn is_paused(&self) -> bool {
        self.state().paused
    }
}
