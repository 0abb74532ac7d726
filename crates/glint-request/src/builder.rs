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

//! The fluent entry point for building and starting requests.

use crate::configuration::LoadConfiguration;
use crate::generic_request::GenericRequest;
use crate::target::ViewTarget;
use glint_core::animation::{AnimationFactory, NoAnimationFactory};
use glint_core::listener::RequestListener;
use glint_core::provider::{LoadProvider, ResourceDecoder, ResourceEncoder};
use glint_core::request::{Request, RequestTracker};
use glint_core::target::{Target, View};
use glint_core::{BuildError, Context, Priority, Size, TranscodeType};
use glint_engine::Glint;
use std::sync::Arc;

/// Configures a load and binds it to a target.
///
/// Options are set through chained calls that consume and return the builder.
/// Options that can be invalid return a `Result`:
///
/// ```ignore
/// let request = builder
///     .override_size(128, 128)?
///     .priority(Priority::High)
///     .into_target(Some(target))?;
/// ```
///
/// Each call to [`into_target`](RequestBuilder::into_target) or
/// [`into_view`](RequestBuilder::into_view) takes a snapshot of the current
/// options, so one builder can start any number of independent requests.
pub struct RequestBuilder<M, R> {
    config: LoadConfiguration<M, R>,
    tracker: Arc<dyn RequestTracker>,
}

impl<M, R> RequestBuilder<M, R>
where
    M: Clone + Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    /// Creates a builder.
    ///
    /// `context`, `transcode`, `glint`, and `tracker` are required. `model`
    /// may be absent, in which case every request fails with
    /// [`LoadError::MissingModel`](glint_core::LoadError::MissingModel); a
    /// present model requires a `provider`.
    pub fn new(
        context: Option<Arc<Context>>,
        model: Option<M>,
        provider: Option<Arc<dyn LoadProvider<M, R>>>,
        transcode: Option<TranscodeType>,
        glint: Option<Arc<Glint>>,
        tracker: Option<Arc<dyn RequestTracker>>,
    ) -> Result<Self, BuildError> {
        // Collaborators are checked before the model and provider.
        let context = context.ok_or_else(|| BuildError::null("context"))?;
        let transcode = transcode.ok_or_else(|| BuildError::null("transcode_type"))?;
        let glint = glint.ok_or_else(|| BuildError::null("glint"))?;
        let tracker = tracker.ok_or_else(|| BuildError::null("request_tracker"))?;
        let config =
            LoadConfiguration::new(Some(context), model, provider, Some(transcode), Some(glint))?;
        Ok(Self { config, tracker })
    }

    /// The options the next request will be built with.
    pub fn configuration(&self) -> &LoadConfiguration<M, R> {
        &self.config
    }

    /// Replaces the decoder used for freshly fetched data.
    pub fn decoder(mut self, decoder: Arc<dyn ResourceDecoder<R>>) -> Self {
        self.config.decoder = Some(decoder);
        self
    }

    /// Replaces the decoder used for cached results.
    pub fn cache_decoder(mut self, decoder: Arc<dyn ResourceDecoder<R>>) -> Self {
        self.config.cache_decoder = Some(decoder);
        self
    }

    /// Replaces the encoder used to write results to the cache.
    pub fn encoder(mut self, encoder: Arc<dyn ResourceEncoder<R>>) -> Self {
        self.config.encoder = Some(encoder);
        self
    }

    /// Bypasses the result cache for both reads and writes.
    pub fn skip_disk_cache(mut self, skip: bool) -> Self {
        self.config.skip_disk_cache = skip;
        self
    }

    /// Records that in-memory caching should be bypassed.
    pub fn skip_memory_cache(mut self, skip: bool) -> Self {
        self.config.skip_memory_cache = skip;
        self
    }

    /// Sets the animation used when the resource is shown.
    pub fn animate(
        mut self,
        animation: Option<Arc<dyn AnimationFactory<R>>>,
    ) -> Result<Self, BuildError> {
        self.config.animation = animation.ok_or_else(|| BuildError::null("animation_factory"))?;
        Ok(self)
    }

    /// Shows resources without animation.
    pub fn dont_animate(mut self) -> Self {
        self.config.animation = Arc::new(NoAnimationFactory);
        self
    }

    /// Decodes at `width` x `height` instead of the target's size.
    pub fn override_size(mut self, width: i32, height: i32) -> Result<Self, BuildError> {
        self.config.override_size = Some(Size::new(width, height)?);
        Ok(self)
    }

    /// Scales the decode size by `multiplier`, which must be in `(0, 1]`.
    pub fn size_multiplier(mut self, multiplier: f32) -> Result<Self, BuildError> {
        if multiplier.is_nan() || multiplier <= 0.0 || multiplier > 1.0 {
            return Err(BuildError::invalid(format!(
                "size multiplier must be in (0, 1], got {multiplier}"
            )));
        }
        self.config.size_multiplier = multiplier;
        Ok(self)
    }

    /// Shown while loading, and after a failure when no error placeholder is set.
    pub fn placeholder(mut self, placeholder: Arc<R>) -> Self {
        self.config.placeholder = Some(placeholder);
        self
    }

    /// Shown after a failure.
    pub fn error_placeholder(mut self, placeholder: Arc<R>) -> Self {
        self.config.error_placeholder = Some(placeholder);
        self
    }

    /// Sets the scheduling priority.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.config.priority = priority;
        self
    }

    /// Observes results before the target. A listener returning `true`
    /// handles the result and the target is not called.
    pub fn listener(mut self, listener: Arc<dyn RequestListener<M, R>>) -> Self {
        self.config.listener = Some(listener);
        self
    }

    /// Starts a request for `target`, replacing the one it held.
    pub fn into_target(
        &self,
        target: Option<Arc<dyn Target<R>>>,
    ) -> Result<Arc<dyn Request>, BuildError> {
        let target = target.ok_or_else(|| BuildError::invalid("target must not be null"))?;
        Ok(self.bind(&target, false))
    }

    /// Starts a request for `view`, replacing the one it held.
    pub fn into_view(
        &self,
        view: Option<Arc<dyn View<R>>>,
    ) -> Result<Arc<dyn Request>, BuildError> {
        let view = view.ok_or_else(|| BuildError::invalid("view must not be null"))?;
        let target: Arc<dyn Target<R>> = Arc::new(ViewTarget::new(&view));
        Ok(self.bind(&target, true))
    }

    fn bind(&self, target: &Arc<dyn Target<R>>, own_target: bool) -> Arc<dyn Request> {
        if let Some(previous) = target.request() {
            log::debug!("Replacing request {} on its target.", previous.id());
            // Unbound first, so the target never points at a request that
            // already left the tracker.
            target.set_request(None);
            self.tracker.remove_request(&previous);
            previous.clear();
        }

        let request: Arc<dyn Request> = if own_target {
            GenericRequest::with_owned_target(self.config.clone(), target, &self.tracker)
        } else {
            GenericRequest::new(self.config.clone(), target, &self.tracker)
        };
        self.tracker.add_request(request.clone());
        target.set_request(Some(request.clone()));

        if self.tracker.is_paused() {
            log::debug!("Tracker paused; request {} left pending.", request.id());
        } else {
            request.begin();
        }
        request
    }
}
