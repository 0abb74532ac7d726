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

//! The validated state a request is built from.

use glint_core::animation::{AnimationFactory, NoAnimationFactory};
use glint_core::listener::RequestListener;
use glint_core::provider::{LoadProvider, ResourceDecoder, ResourceEncoder};
use glint_core::{BuildError, Context, Priority, Size, TranscodeType};
use glint_engine::Glint;
use std::sync::Arc;

/// Everything needed to execute one load, except the target.
///
/// A configuration can only be created through [`LoadConfiguration::new`],
/// which enforces the structural invariants:
/// - a present model always comes with a load provider,
/// - the transcode type names the resource type `R`.
///
/// The remaining fields are adjusted through [`RequestBuilder`](crate::RequestBuilder),
/// which validates each change. Every request takes its own copy.
pub struct LoadConfiguration<M, R> {
    pub(crate) context: Arc<Context>,
    pub(crate) model: Option<M>,
    pub(crate) provider: Option<Arc<dyn LoadProvider<M, R>>>,
    pub(crate) transcode: TranscodeType,
    pub(crate) glint: Arc<Glint>,
    pub(crate) decoder: Option<Arc<dyn ResourceDecoder<R>>>,
    pub(crate) cache_decoder: Option<Arc<dyn ResourceDecoder<R>>>,
    pub(crate) encoder: Option<Arc<dyn ResourceEncoder<R>>>,
    pub(crate) skip_disk_cache: bool,
    pub(crate) skip_memory_cache: bool,
    pub(crate) override_size: Option<Size>,
    pub(crate) size_multiplier: f32,
    pub(crate) animation: Arc<dyn AnimationFactory<R>>,
    pub(crate) placeholder: Option<Arc<R>>,
    pub(crate) error_placeholder: Option<Arc<R>>,
    pub(crate) priority: Priority,
    pub(crate) listener: Option<Arc<dyn RequestListener<M, R>>>,
}

impl<M, R> LoadConfiguration<M, R>
where
    M: Clone + Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    /// Validates the structural collaborators and creates a configuration with
    /// default settings.
    pub fn new(
        context: Option<Arc<Context>>,
        model: Option<M>,
        provider: Option<Arc<dyn LoadProvider<M, R>>>,
        transcode: Option<TranscodeType>,
        glint: Option<Arc<Glint>>,
    ) -> Result<Self, BuildError> {
        let context = context.ok_or_else(|| BuildError::null("context"))?;
        let transcode = transcode.ok_or_else(|| BuildError::null("transcode_type"))?;
        let glint = glint.ok_or_else(|| BuildError::null("glint"))?;
        if model.is_some() && provider.is_none() {
            return Err(BuildError::null("load_provider"));
        }
        if !transcode.is::<R>() {
            return Err(BuildError::invalid(format!(
                "transcode type {} does not match the requested resource type {}",
                transcode.name(),
                std::any::type_name::<R>()
            )));
        }

        let priority = glint.config().default_priority;
        Ok(Self {
            context,
            model,
            provider,
            transcode,
            glint,
            decoder: None,
            cache_decoder: None,
            encoder: None,
            skip_disk_cache: false,
            skip_memory_cache: false,
            override_size: None,
            size_multiplier: 1.0,
            animation: Arc::new(NoAnimationFactory),
            placeholder: None,
            error_placeholder: None,
            priority,
            listener: None,
        })
    }
}

impl<M, R> LoadConfiguration<M, R> {
    /// The owning context.
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// The model to load, if any.
    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    /// The resource type delivered to the target.
    pub fn transcode_type(&self) -> TranscodeType {
        self.transcode
    }

    /// The injected loader instance.
    pub fn glint(&self) -> &Arc<Glint> {
        &self.glint
    }

    /// Whether the result cache is bypassed.
    pub fn skip_disk_cache(&self) -> bool {
        self.skip_disk_cache
    }

    /// Whether the caller asked to bypass in-memory caching.
    pub fn skip_memory_cache(&self) -> bool {
        self.skip_memory_cache
    }

    /// The fixed decode size, if one was set.
    pub fn override_size(&self) -> Option<Size> {
        self.override_size
    }

    /// The factor applied to the resolved decode size.
    pub fn size_multiplier(&self) -> f32 {
        self.size_multiplier
    }

    /// The scheduling priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Whether a source decoder override is set.
    pub fn has_decoder_override(&self) -> bool {
        self.decoder.is_some()
    }

    /// Whether a cache decoder override is set.
    pub fn has_cache_decoder_override(&self) -> bool {
        self.cache_decoder.is_some()
    }

    /// Whether an encoder override is set.
    pub fn has_encoder_override(&self) -> bool {
        self.encoder.is_some()
    }
}

impl<M: Clone, R> Clone for LoadConfiguration<M, R> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            model: self.model.clone(),
            provider: self.provider.clone(),
            transcode: self.transcode,
            glint: self.glint.clone(),
            decoder: self.decoder.clone(),
            cache_decoder: self.cache_decoder.clone(),
            encoder: self.encoder.clone(),
            skip_disk_cache: self.skip_disk_cache,
            skip_memory_cache: self.skip_memory_cache,
            override_size: self.override_size,
            size_multiplier: self.size_multiplier,
            animation: self.animation.clone(),
            placeholder: self.placeholder.clone(),
            error_placeholder: self.error_placeholder.clone(),
            priority: self.priority,
            listener: self.listener.clone(),
        }
    }
}
