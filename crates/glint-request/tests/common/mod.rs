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

//! Fakes shared by the integration tests.

#![allow(dead_code)]

use glint_core::animation::Animation;
use glint_core::listener::RequestListener;
use glint_core::provider::{BoxError, LoadProvider, ResourceDecoder, ResourceEncoder};
use glint_core::request::{Request, RequestId, RequestStatus, RequestTracker};
use glint_core::target::{RequestSlot, Target, View};
use glint_core::{Context, LoadError, Size, TranscodeType};
use glint_engine::{Glint, GlintConfig};
use glint_request::RequestBuilder;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TIMEOUT: Duration = Duration::from_secs(2);

pub fn glint() -> Arc<Glint> {
    Glint::new(GlintConfig {
        worker_threads: 2,
        ..Default::default()
    })
    .expect("Glint should start")
}

pub fn context() -> Arc<Context> {
    Arc::new(Context::new("tests"))
}

// --- Provider: the model is the text itself, "fail:..." fails to fetch ---

#[derive(Default)]
pub struct TextProvider {
    pub fetches: AtomicUsize,
}

impl LoadProvider<String, String> for TextProvider {
    fn cache_key(&self, model: &String) -> String {
        format!("text:{model}")
    }

    fn fetch(&self, model: &String) -> Result<Vec<u8>, BoxError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match model.strip_prefix("fail:") {
            Some(reason) => Err(reason.into()),
            None => Ok(model.as_bytes().to_vec()),
        }
    }

    fn source_decoder(&self) -> Arc<dyn ResourceDecoder<String>> {
        Arc::new(Utf8Codec::default())
    }

    fn cache_decoder(&self) -> Arc<dyn ResourceDecoder<String>> {
        Arc::new(Utf8Codec::default())
    }

    fn encoder(&self) -> Arc<dyn ResourceEncoder<String>> {
        Arc::new(Utf8Codec::default())
    }
}

/// Decodes UTF-8 and records the size it was asked to decode at.
#[derive(Default)]
pub struct Utf8Codec {
    pub sizes: Mutex<Vec<Option<Size>>>,
}

impl ResourceDecoder<String> for Utf8Codec {
    fn id(&self) -> &str {
        "utf8"
    }

    fn decode(&self, bytes: &[u8], size: Option<Size>) -> Result<String, BoxError> {
        self.sizes.lock().unwrap().push(size);
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

impl ResourceEncoder<String> for Utf8Codec {
    fn id(&self) -> &str {
        "utf8"
    }

    fn encode(&self, resource: &String) -> Result<Vec<u8>, BoxError> {
        Ok(resource.as_bytes().to_vec())
    }
}

// --- Tracker that only records calls ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCall {
    Add(RequestId),
    Remove(RequestId),
}

#[derive(Default)]
pub struct RecordingTracker {
    pub calls: Mutex<Vec<TrackerCall>>,
    pub paused: AtomicBool,
}

impl RecordingTracker {
    pub fn calls(&self) -> Vec<TrackerCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl RequestTracker for RecordingTracker {
    fn add_request(&self, request: Arc<dyn Request>) {
        self.calls.lock().unwrap().push(TrackerCall::Add(request.id()));
    }

    fn remove_request(&self, request: &Arc<dyn Request>) {
        self.calls
            .lock()
            .unwrap()
            .push(TrackerCall::Remove(request.id()));
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

// --- Target that records every callback ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetEvent {
    Started(Option<String>),
    Ready(String),
    Failed(LoadError, Option<String>),
    Cleared(Option<String>),
}

#[derive(Default)]
pub struct RecordingTarget {
    pub slot: RequestSlot,
    pub size: Option<Size>,
    pub events: Mutex<Vec<TargetEvent>>,
    /// The request bound at the time of each `on_load_cleared`.
    pub bound_at_clear: Mutex<Vec<Option<RequestId>>>,
}

impl RecordingTarget {
    pub fn events(&self) -> Vec<TargetEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn ready(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TargetEvent::Ready(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: TargetEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn text(resource: Option<Arc<String>>) -> Option<String> {
    resource.map(|r| r.as_ref().clone())
}

impl Target<String> for RecordingTarget {
    fn request(&self) -> Option<Arc<dyn Request>> {
        self.slot.get()
    }

    fn set_request(&self, request: Option<Arc<dyn Request>>) {
        self.slot.set(request);
    }

    fn size(&self) -> Option<Size> {
        self.size
    }

    fn on_load_started(&self, placeholder: Option<Arc<String>>) {
        self.push(TargetEvent::Started(text(placeholder)));
    }

    fn on_resource_ready(&self, resource: Arc<String>, _animation: Arc<dyn Animation<String>>) {
        self.push(TargetEvent::Ready(resource.as_ref().clone()));
    }

    fn on_load_failed(&self, error: &LoadError, error_placeholder: Option<Arc<String>>) {
        self.push(TargetEvent::Failed(error.clone(), text(error_placeholder)));
    }

    fn on_load_cleared(&self, placeholder: Option<Arc<String>>) {
        let bound = self.slot.get().map(|request| request.id());
        self.bound_at_clear.lock().unwrap().push(bound);
        self.push(TargetEvent::Cleared(text(placeholder)));
    }
}

// --- View that records what it shows ---

#[derive(Default)]
pub struct FakeView {
    pub slot: RequestSlot,
    pub shown: Mutex<Vec<Option<String>>>,
}

impl View<String> for FakeView {
    fn request(&self) -> Option<Arc<dyn Request>> {
        self.slot.get()
    }

    fn set_request(&self, request: Option<Arc<dyn Request>>) {
        self.slot.set(request);
    }

    fn set_resource(&self, resource: Option<Arc<String>>) {
        self.shown.lock().unwrap().push(text(resource));
    }
}

// --- A request that only counts how often it was cleared ---

pub struct StubRequest {
    pub id: RequestId,
    pub clears: AtomicUsize,
}

impl StubRequest {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: RequestId::new(),
            clears: AtomicUsize::new(0),
        })
    }
}

impl Request for StubRequest {
    fn id(&self) -> RequestId {
        self.id
    }

    fn begin(&self) {}

    fn pause(&self) {}

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }

    fn status(&self) -> RequestStatus {
        RequestStatus::Running
    }

    fn is_paused(&self) -> bool {
        false
    }
}

// --- Listener that records and optionally swallows results ---

#[derive(Default)]
pub struct RecordingListener {
    pub handle: bool,
    pub ready: Mutex<Vec<(String, Option<String>, bool)>>,
    pub errors: Mutex<Vec<LoadError>>,
}

impl RequestListener<String, String> for RecordingListener {
    fn on_exception(&self, error: &LoadError, _model: Option<&String>, _is_first: bool) -> bool {
        self.errors.lock().unwrap().push(error.clone());
        self.handle
    }

    fn on_resource_ready(
        &self,
        resource: &Arc<String>,
        model: Option<&String>,
        from_cache: bool,
        _is_first: bool,
    ) -> bool {
        self.ready.lock().unwrap().push((
            resource.as_ref().clone(),
            model.cloned(),
            from_cache,
        ));
        self.handle
    }
}

/// A builder for `model` with every collaborator present.
pub fn builder(
    glint: &Arc<Glint>,
    tracker: Arc<dyn RequestTracker>,
    model: Option<&str>,
) -> RequestBuilder<String, String> {
    let provider: Arc<dyn LoadProvider<String, String>> = Arc::new(TextProvider::default());
    RequestBuilder::new(
        Some(context()),
        model.map(str::to_string),
        Some(provider),
        Some(TranscodeType::of::<String>()),
        Some(glint.clone()),
        Some(tracker),
    )
    .expect("builder should validate")
}
