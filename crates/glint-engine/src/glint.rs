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

use crate::cache::{InMemoryResultCache, ResultCache};
use crate::config::GlintConfig;
use crate::dispatch::{Completion, CompletionDispatcher};
use crate::engine::{LoadEngine, LoadHandle, LoadJob, OnComplete};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// The loader instance shared by every request of a process.
///
/// It owns the worker pool, the result cache, and the completion queue. It is
/// injected into request builders rather than looked up globally, so tests
/// and independent subsystems can run their own instance.
///
/// Results are only handed to targets when the controlling thread drains the
/// completion queue through [`dispatch_pending`](Glint::dispatch_pending) or
/// one of its variants, typically once per UI frame.
pub struct Glint {
    config: GlintConfig,
    cache: Arc<dyn ResultCache>,
    dispatcher: CompletionDispatcher,
    engine: LoadEngine,
}

impl Glint {
    /// Creates an instance with an in-memory result cache.
    pub fn new(config: GlintConfig) -> Result<Arc<Self>> {
        Self::with_cache(config, Arc::new(InMemoryResultCache::new()))
    }

    /// Creates an instance that reads and writes results through `cache`.
    pub fn with_cache(config: GlintConfig, cache: Arc<dyn ResultCache>) -> Result<Arc<Self>> {
        config.validate().context("Invalid Glint configuration")?;

        let dispatcher = CompletionDispatcher::new();
        let engine_cache = config.result_cache_enabled.then(|| cache.clone());
        let engine = LoadEngine::new(config.worker_threads, dispatcher.sender(), engine_cache);

        log::info!(
            "Glint initialized (workers={}, result_cache={}).",
            config.worker_threads,
            config.result_cache_enabled
        );

        Ok(Arc::new(Self {
            config,
            cache,
            dispatcher,
            engine,
        }))
    }

    /// The configuration this instance was built with.
    pub fn config(&self) -> &GlintConfig {
        &self.config
    }

    /// The result cache.
    pub fn cache(&self) -> &Arc<dyn ResultCache> {
        &self.cache
    }

    /// Submits a job to the worker pool. See [`LoadEngine::load`].
    pub fn load<R: Send + Sync + 'static>(
        &self,
        job: LoadJob<R>,
        on_complete: OnComplete<R>,
    ) -> LoadHandle {
        self.engine.load(job, on_complete)
    }

    /// Queues `completion` to run on the controlling thread.
    ///
    /// Used for outcomes known without running a job, so they reach the
    /// target along the same path as real results.
    pub fn post(&self, completion: Completion) {
        self.dispatcher.post(completion);
    }

    /// Runs every queued completion. Call from the controlling thread.
    pub fn dispatch_pending(&self) -> usize {
        self.dispatcher.dispatch_pending()
    }

    /// Waits up to `timeout` for a completion, then drains the queue.
    pub fn dispatch_timeout(&self, timeout: Duration) -> usize {
        self.dispatcher.dispatch_timeout(timeout)
    }

    /// Drains completions until `done` holds or `timeout` elapses.
    pub fn dispatch_until(&self, timeout: Duration, done: impl FnMut() -> bool) -> bool {
        self.dispatcher.dispatch_until(timeout, done)
    }

    /// Stops the worker pool after the queued jobs ran.
    ///
    /// Jobs submitted afterwards fail with `EngineShutdown`.
    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}
