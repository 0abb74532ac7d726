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

//! The worker pool that executes loads.
//!
//! Jobs are queued per [`Priority`]. Every queued job is paired with one token
//! on a shared signal channel; a worker blocks on that channel and, for each
//! token it receives, takes exactly one job from the highest-priority queue
//! that has one. Since a job is always queued before its token is sent, a
//! worker holding a token always finds a job.

use crate::cache::ResultCache;
use crate::dispatch::Completion;
use crossbeam_channel::{Receiver, Sender};
use glint_core::provider::{BoxError, ResourceDecoder, ResourceEncoder};
use glint_core::{LoadError, Priority, Size};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// The result of a successful job.
pub struct Loaded<R> {
    /// The decoded resource.
    pub resource: Arc<R>,
    /// Whether it was decoded from the result cache.
    pub from_cache: bool,
}

/// Receives the result of a job on the controlling thread.
pub type OnComplete<R> = Box<dyn FnOnce(Result<Loaded<R>, LoadError>) + Send>;

/// Everything a worker needs to produce one resource.
pub struct LoadJob<R> {
    /// Key naming the data behind the model, from the load provider.
    pub model_key: String,
    /// Fetches the raw bytes. Only called on a cache miss.
    pub fetch: Box<dyn FnOnce() -> Result<Vec<u8>, BoxError> + Send>,
    /// Decodes freshly fetched bytes.
    pub source_decoder: Arc<dyn ResourceDecoder<R>>,
    /// Decodes cached bytes.
    pub cache_decoder: Arc<dyn ResourceDecoder<R>>,
    /// Encodes the resource for the cache.
    pub encoder: Arc<dyn ResourceEncoder<R>>,
    /// Size to decode at, if known.
    pub size: Option<Size>,
    /// Bypass the result cache for both reads and writes.
    pub skip_disk_cache: bool,
    /// Queue to schedule the job on.
    pub priority: Priority,
}

impl<R> LoadJob<R> {
    /// The result cache key for this job.
    ///
    /// Bytes under this key were written by `encoder` for `source_decoder` at
    /// `size`, so any of those changing must produce a different key.
    pub fn cache_key(&self) -> String {
        let size = self
            .size
            .map(|s| s.to_string())
            .unwrap_or_else(|| "original".to_string());
        format!(
            "{}|{}|{}|{}",
            self.model_key,
            self.source_decoder.id(),
            self.encoder.id(),
            size
        )
    }

    /// Runs the job on the calling thread.
    ///
    /// A cache hit that fails to decode is evicted and the job falls through
    /// to a fresh fetch. Failing to encode the result is logged, not fatal.
    pub fn run(self, cache: Option<&dyn ResultCache>) -> Result<Loaded<R>, LoadError> {
        let key = self.cache_key();

        if let Some(cache) = cache {
            if let Some(bytes) = cache.get(&key) {
                match self.cache_decoder.decode(&bytes, self.size) {
                    Ok(resource) => {
                        log::trace!("Result cache hit for '{key}'.");
                        return Ok(Loaded {
                            resource: Arc::new(resource),
                            from_cache: true,
                        });
                    }
                    Err(e) => {
                        log::warn!(
                            "Cached entry '{key}' failed to decode with '{}': {e}",
                            self.cache_decoder.id()
                        );
                        cache.remove(&key);
                    }
                }
            }
        }

        let bytes = (self.fetch)().map_err(|e| LoadError::Fetch(e.to_string()))?;
        let resource =
            self.source_decoder
                .decode(&bytes, self.size)
                .map_err(|e| LoadError::Decode {
                    decoder: self.source_decoder.id().to_string(),
                    message: e.to_string(),
                })?;

        if let Some(cache) = cache {
            match self.encoder.encode(&resource) {
                Ok(encoded) => cache.put(&key, encoded),
                Err(e) => log::warn!(
                    "Failed to encode '{key}' with '{}': {e}",
                    self.encoder.id()
                ),
            }
        }

        Ok(Loaded {
            resource: Arc::new(resource),
            from_cache: false,
        })
    }
}

/// A handle to a submitted job, used to cancel it.
///
/// Cancelling is best effort: a job that already finished still has its
/// completion queued. Callers re-validate their own state when it runs.
#[derive(Debug, Clone)]
pub struct LoadHandle {
    cancelled: Arc<AtomicBool>,
}

impl LoadHandle {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Marks the job as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`cancel`](LoadHandle::cancel) was called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A fixed pool of worker threads fed by per-priority queues.
pub struct LoadEngine {
    queues: Vec<Sender<Task>>,
    signal: Mutex<Option<Sender<()>>>,
    workers: Mutex<Vec<thread::JoinHandle<()>>>,
    completions: flume::Sender<Completion>,
    cache: Option<Arc<dyn ResultCache>>,
}

impl LoadEngine {
    /// Spawns `worker_threads` workers.
    ///
    /// Results are posted to `completions`. With `cache` set to `None` every
    /// job behaves as if it skipped the result cache.
    pub fn new(
        worker_threads: usize,
        completions: flume::Sender<Completion>,
        cache: Option<Arc<dyn ResultCache>>,
    ) -> Self {
        let (signal_tx, signal_rx) = crossbeam_channel::unbounded::<()>();
        let (senders, receivers): (Vec<_>, Vec<_>) = Priority::ALL
            .iter()
            .map(|_| crossbeam_channel::unbounded::<Task>())
            .unzip();

        let workers = (0..worker_threads)
            .map(|index| {
                let signal_rx = signal_rx.clone();
                let receivers = receivers.clone();
                thread::Builder::new()
                    .name(format!("glint-worker-{index}"))
                    .spawn(move || worker_loop(index, signal_rx, receivers))
            })
            .filter_map(|spawned| match spawned {
                Ok(handle) => Some(handle),
                Err(e) => {
                    log::error!("Failed to spawn Glint worker: {e}");
                    None
                }
            })
            .collect::<Vec<_>>();

        log::info!("LoadEngine started with {} worker(s).", workers.len());

        Self {
            queues: senders,
            signal: Mutex::new(Some(signal_tx)),
            workers: Mutex::new(workers),
            completions,
            cache,
        }
    }

    /// Queues `job` and returns a handle to cancel it.
    ///
    /// `on_complete` is posted to the completion queue once the job finished,
    /// unless the job was cancelled first. If the engine is shut down, the job
    /// fails with [`LoadError::EngineShutdown`].
    pub fn load<R: Send + Sync + 'static>(
        &self,
        job: LoadJob<R>,
        on_complete: OnComplete<R>,
    ) -> LoadHandle {
        let handle = LoadHandle::new();
        let priority = job.priority;

        let signal = match self.signal.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };
        let Some(signal) = signal else {
            log::warn!("LoadEngine is shut down; failing job '{}'.", job.model_key);
            self.post(Box::new(move || on_complete(Err(LoadError::EngineShutdown))));
            return handle;
        };

        let task = self.make_task(job, on_complete, handle.clone());
        if self.queues[priority.index()].send(task).is_err() || signal.send(()).is_err() {
            log::error!("LoadEngine queues disconnected; job dropped.");
        } else {
            log::trace!("Queued job at {priority:?} priority.");
        }
        handle
    }

    /// Stops accepting jobs, lets the workers drain what is queued, and joins them.
    pub fn shutdown(&self) {
        let signal = match self.signal.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if signal.is_none() {
            return;
        }
        drop(signal);

        let workers = match self.workers.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        };
        let current = thread::current().id();
        for worker in workers {
            // The last reference to the engine can be dropped on a worker.
            if worker.thread().id() == current {
                continue;
            }
            if worker.join().is_err() {
                log::error!("A Glint worker panicked.");
            }
        }
        log::info!("LoadEngine shut down.");
    }

    fn post(&self, completion: Completion) {
        if self.completions.send(completion).is_err() {
            log::error!("Completion queue is gone; result dropped.");
        }
    }

    fn make_task<R: Send + Sync + 'static>(
        &self,
        job: LoadJob<R>,
        on_complete: OnComplete<R>,
        handle: LoadHandle,
    ) -> Task {
        let completions = self.completions.clone();
        let cache = if job.skip_disk_cache {
            None
        } else {
            self.cache.clone()
        };

        Box::new(move || {
            if handle.is_cancelled() {
                log::trace!("Skipping cancelled job '{}'.", job.model_key);
                return;
            }

            let result = job.run(cache.as_deref());

            if handle.is_cancelled() {
                return;
            }
            if completions
                .send(Box::new(move || on_complete(result)))
                .is_err()
            {
                log::error!("Completion queue is gone; result dropped.");
            }
        })
    }
}

impl Drop for LoadEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(index: usize, signal: Receiver<()>, queues: Vec<Receiver<Task>>) {
    log::debug!("Glint worker {index} started.");
    while signal.recv().is_ok() {
        if let Some(task) = queues.iter().find_map(|queue| queue.try_recv().ok()) {
            task();
        }
    }
    log::debug!("Glint worker {index} stopped.");
}
