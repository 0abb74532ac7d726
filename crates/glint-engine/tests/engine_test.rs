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

use anyhow::Result;
use glint_core::provider::{BoxError, ResourceDecoder, ResourceEncoder};
use glint_core::{LoadError, Priority};
use glint_engine::{Glint, GlintConfig, LoadJob, Loaded};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

// --- Test Setup: a text "resource" decoded from UTF-8 bytes ---
#[derive(Debug, PartialEq)]
struct Text(String);

struct TextDecoder;
impl ResourceDecoder<Text> for TextDecoder {
    fn id(&self) -> &str {
        "text"
    }

    fn decode(&self, bytes: &[u8], _size: Option<glint_core::Size>) -> Result<Text, BoxError> {
        Ok(Text(String::from_utf8(bytes.to_vec())?))
    }
}

struct TextEncoder;
impl ResourceEncoder<Text> for TextEncoder {
    fn id(&self) -> &str {
        "text"
    }

    fn encode(&self, resource: &Text) -> Result<Vec<u8>, BoxError> {
        Ok(resource.0.as_bytes().to_vec())
    }
}

type Outcome = Arc<Mutex<Vec<Result<(String, bool), LoadError>>>>;

fn text_job(key: &str, body: &'static str, skip_disk_cache: bool) -> LoadJob<Text> {
    LoadJob {
        model_key: key.to_string(),
        fetch: Box::new(move || Ok(body.as_bytes().to_vec())),
        source_decoder: Arc::new(TextDecoder),
        cache_decoder: Arc::new(TextDecoder),
        encoder: Arc::new(TextEncoder),
        size: None,
        skip_disk_cache,
        priority: Priority::Normal,
    }
}

fn recorder(outcomes: &Outcome) -> Box<dyn FnOnce(Result<Loaded<Text>, LoadError>) + Send> {
    let outcomes = outcomes.clone();
    Box::new(move |result| {
        let entry = result.map(|loaded| (loaded.resource.0.clone(), loaded.from_cache));
        outcomes.lock().unwrap().push(entry);
    })
}

fn single_worker() -> Arc<Glint> {
    Glint::new(GlintConfig {
        worker_threads: 1,
        ..Default::default()
    })
    .expect("Glint should start")
}

#[test]
fn test_second_load_is_served_from_cache() {
    let glint = single_worker();
    let outcomes: Outcome = Arc::default();

    glint.load(text_job("greeting", "hello", false), recorder(&outcomes));
    assert!(glint.dispatch_until(Duration::from_secs(2), || outcomes.lock().unwrap().len() == 1));

    glint.load(text_job("greeting", "ignored", false), recorder(&outcomes));
    assert!(glint.dispatch_until(Duration::from_secs(2), || outcomes.lock().unwrap().len() == 2));

    let outcomes = outcomes.lock().unwrap();
    assert_eq!(outcomes[0], Ok(("hello".to_string(), false)));
    assert_eq!(outcomes[1], Ok(("hello".to_string(), true)));
}

#[test]
fn test_skip_disk_cache_neither_reads_nor_writes() {
    let glint = single_worker();
    let outcomes: Outcome = Arc::default();

    glint.load(text_job("a", "first", true), recorder(&outcomes));
    glint.load(text_job("a", "second", true), recorder(&outcomes));
    assert!(glint.dispatch_until(Duration::from_secs(2), || outcomes.lock().unwrap().len() == 2));

    let outcomes = outcomes.lock().unwrap();
    assert_eq!(outcomes[0], Ok(("first".to_string(), false)));
    assert_eq!(outcomes[1], Ok(("second".to_string(), false)));
    assert!(glint.cache().get(&text_job("a", "", true).cache_key()).is_none());
}

#[test]
fn test_disabled_result_cache_behaves_like_skip() {
    let glint = Glint::new(GlintConfig {
        worker_threads: 1,
        result_cache_enabled: false,
        ..Default::default()
    })
    .expect("Glint should start");
    let outcomes: Outcome = Arc::default();

    glint.load(text_job("b", "one", false), recorder(&outcomes));
    glint.load(text_job("b", "two", false), recorder(&outcomes));
    assert!(glint.dispatch_until(Duration::from_secs(2), || outcomes.lock().unwrap().len() == 2));

    assert_eq!(outcomes.lock().unwrap()[1], Ok(("two".to_string(), false)));
}

#[test]
fn test_fetch_and_decode_errors_are_reported() {
    let glint = single_worker();
    let outcomes: Outcome = Arc::default();

    let mut failing = text_job("broken", "", true);
    failing.fetch = Box::new(|| Err("connection reset".into()));
    glint.load(failing, recorder(&outcomes));

    let mut garbage = text_job("garbage", "", true);
    garbage.fetch = Box::new(|| Ok(vec![0xff, 0xfe]));
    glint.load(garbage, recorder(&outcomes));

    assert!(glint.dispatch_until(Duration::from_secs(2), || outcomes.lock().unwrap().len() == 2));
    let outcomes = outcomes.lock().unwrap();
    assert_eq!(
        outcomes[0],
        Err(LoadError::Fetch("connection reset".to_string()))
    );
    assert!(matches!(outcomes[1], Err(LoadError::Decode { ref decoder, .. }) if decoder == "text"));
}

#[test]
fn test_cancelled_job_never_completes() {
    let glint = single_worker();
    let outcomes: Outcome = Arc::default();
    let (release_tx, release_rx) = crossbeam_channel::bounded::<()>(0);

    // Occupy the only worker so the second job is still queued when cancelled.
    let mut blocker = text_job("blocker", "", true);
    blocker.fetch = Box::new(move || {
        let _ = release_rx.recv();
        Ok(b"done".to_vec())
    });
    glint.load(blocker, recorder(&outcomes));

    let handle = glint.load(text_job("victim", "never", true), recorder(&outcomes));
    handle.cancel();
    assert!(handle.is_cancelled());
    release_tx.send(()).expect("Worker should be waiting");

    assert!(glint.dispatch_until(Duration::from_secs(2), || outcomes.lock().unwrap().len() == 1));
    // Give the worker time to reach the cancelled job.
    glint.dispatch_timeout(Duration::from_millis(50));

    let outcomes = outcomes.lock().unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0], Ok(("done".to_string(), false)));
}

#[test]
fn test_workers_prefer_higher_priority() {
    let glint = single_worker();
    let outcomes: Outcome = Arc::default();
    let (release_tx, release_rx) = crossbeam_channel::bounded::<()>(0);
    let (started_tx, started_rx) = crossbeam_channel::bounded::<()>(1);

    let mut blocker = text_job("blocker", "", true);
    blocker.fetch = Box::new(move || {
        let _ = started_tx.send(());
        let _ = release_rx.recv();
        Ok(b"blocker".to_vec())
    });
    glint.load(blocker, recorder(&outcomes));
    started_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("Blocker should start");

    for (body, priority) in [
        ("low", Priority::Low),
        ("normal", Priority::Normal),
        ("immediate", Priority::Immediate),
    ] {
        let mut job = text_job(body, body, true);
        job.priority = priority;
        glint.load(job, recorder(&outcomes));
    }
    release_tx.send(()).expect("Worker should be waiting");

    assert!(glint.dispatch_until(Duration::from_secs(2), || outcomes.lock().unwrap().len() == 4));
    let order: Vec<String> = outcomes
        .lock()
        .unwrap()
        .iter()
        .map(|o| o.as_ref().unwrap().0.clone())
        .collect();
    assert_eq!(order, vec!["blocker", "immediate", "normal", "low"]);
}

#[test]
fn test_jobs_after_shutdown_fail() {
    let glint = single_worker();
    let outcomes: Outcome = Arc::default();

    glint.shutdown();
    glint.load(text_job("late", "late", true), recorder(&outcomes));
    assert_eq!(glint.dispatch_pending(), 1);

    assert_eq!(
        outcomes.lock().unwrap()[0],
        Err(LoadError::EngineShutdown)
    );
}

#[test]
fn test_config_from_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("glint.json");
    std::fs::write(&path, r#"{ "worker_threads": 2, "default_priority": "high" }"#)?;

    let config = GlintConfig::from_file(&path)?;
    assert_eq!(config.worker_threads, 2);
    assert_eq!(config.default_priority, Priority::High);

    std::fs::write(&path, r#"{ "worker_threads": 0 }"#)?;
    assert!(GlintConfig::from_file(&path).is_err());
    assert!(GlintConfig::from_file(dir.path().join("missing.json")).is_err());
    Ok(())
}
