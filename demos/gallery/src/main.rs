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

// Glint Gallery
// Loads a made-up photo catalog through the request pipeline.
//
// Usage: gallery [config.json]

use anyhow::{Context as _, Result};
use glint_core::animation::{AnimationFactory, FadeFactory};
use glint_core::provider::{BoxError, LoadProvider, ResourceDecoder, ResourceEncoder};
use glint_core::request::Request;
use glint_core::target::{RequestSlot, View};
use glint_core::{Context, Priority, Size};
use glint_engine::{Glint, GlintConfig};
use glint_request::{RequestManager, SimpleTarget};
use std::sync::Arc;
use std::time::Duration;

/// A decoded "photo": its title and the size it was decoded at.
#[derive(Debug)]
struct Photo {
    title: String,
    size: Option<Size>,
}

/// Serves photos from a fixed catalog, slowly, like a remote store would.
struct Catalog;

impl LoadProvider<String, Photo> for Catalog {
    fn cache_key(&self, model: &String) -> String {
        format!("catalog/{model}")
    }

    fn fetch(&self, model: &String) -> Result<Vec<u8>, BoxError> {
        std::thread::sleep(Duration::from_millis(50));
        match model.as_str() {
            "harbor" | "dunes" | "glacier" | "orchard" => Ok(model.to_uppercase().into_bytes()),
            other => Err(format!("no photo named '{other}'").into()),
        }
    }

    fn source_decoder(&self) -> Arc<dyn ResourceDecoder<Photo>> {
        Arc::new(PhotoCodec)
    }

    fn cache_decoder(&self) -> Arc<dyn ResourceDecoder<Photo>> {
        Arc::new(PhotoCodec)
    }

    fn encoder(&self) -> Arc<dyn ResourceEncoder<Photo>> {
        Arc::new(PhotoCodec)
    }
}

struct PhotoCodec;

impl ResourceDecoder<Photo> for PhotoCodec {
    fn id(&self) -> &str {
        "photo"
    }

    fn decode(&self, bytes: &[u8], size: Option<Size>) -> Result<Photo, BoxError> {
        Ok(Photo {
            title: String::from_utf8(bytes.to_vec())?,
            size,
        })
    }
}

impl ResourceEncoder<Photo> for PhotoCodec {
    fn id(&self) -> &str {
        "photo"
    }

    fn encode(&self, resource: &Photo) -> Result<Vec<u8>, BoxError> {
        Ok(resource.title.as_bytes().to_vec())
    }
}

/// A console "widget" that prints whatever it is asked to show.
struct ConsoleView {
    name: &'static str,
    slot: RequestSlot,
}

impl ConsoleView {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            slot: RequestSlot::new(),
        })
    }
}

impl View<Photo> for ConsoleView {
    fn request(&self) -> Option<Arc<dyn Request>> {
        self.slot.get()
    }

    fn set_request(&self, request: Option<Arc<dyn Request>>) {
        self.slot.set(request);
    }

    fn set_resource(&self, resource: Option<Arc<Photo>>) {
        let title = resource.map(|photo| photo.title.clone());
        log::info!("[{}] showing {:?}", self.name, title);
    }

    fn size(&self) -> Option<Size> {
        Size::new(320, 240).ok()
    }

    fn fade_in(&self, resource: Arc<Photo>, duration: Duration) -> bool {
        log::info!(
            "[{}] fading in '{}' over {:?}",
            self.name,
            resource.title,
            duration
        );
        self.set_resource(Some(resource));
        true
    }
}

fn load_config() -> Result<GlintConfig> {
    match std::env::args().nth(1) {
        Some(path) => GlintConfig::from_file(&path)
            .with_context(|| format!("Failed to load gallery config from {path}")),
        None => Ok(GlintConfig::default()),
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let glint = Glint::new(load_config()?)?;
    let manager = RequestManager::new(Arc::new(Context::new("gallery")), glint.clone());
    let catalog: Arc<dyn LoadProvider<String, Photo>> = Arc::new(Catalog);
    let placeholder = Arc::new(Photo {
        title: "(loading)".to_string(),
        size: None,
    });

    // Thumbnails: headless targets at a fixed size, scaled down by half.
    let thumbnails: Vec<_> = ["harbor", "dunes", "missing"]
        .into_iter()
        .map(|name| -> Result<(&str, Arc<SimpleTarget<Photo>>)> {
            let target = Arc::new(SimpleTarget::<Photo>::with_size(Size::new(128, 128)?));
            manager
                .load(Some(name.to_string()), Some(catalog.clone()))?
                .size_multiplier(0.5)?
                .priority(Priority::Low)
                .placeholder(placeholder.clone())
                .into_target(Some(target.clone()))?;
            Ok((name, target))
        })
        .collect::<Result<_>>()?;

    // The hero view is rebound before its first load finishes: only the
    // second photo may ever reach it.
    let hero = ConsoleView::new("hero");
    let fade: Arc<dyn AnimationFactory<Photo>> = Arc::new(FadeFactory::default());
    let hero_builder = manager
        .load(Some("glacier".to_string()), Some(catalog.clone()))?
        .priority(Priority::Immediate)
        .animate(Some(fade))?;
    hero_builder.into_view(Some(hero.clone()))?;
    let hero_request = manager
        .load(Some("orchard".to_string()), Some(catalog.clone()))?
        .priority(Priority::Immediate)
        .into_view(Some(hero.clone()))?;

    manager.pause();
    log::info!("Paused with {} request(s) tracked.", manager.tracker().len());
    manager.resume();

    let finished = glint.dispatch_until(Duration::from_secs(5), || manager.tracker().is_empty());
    if !finished {
        log::warn!("Timed out with {} request(s) still running.", manager.tracker().len());
    }

    for (name, target) in &thumbnails {
        match (target.resource(), target.last_error()) {
            (Some(photo), _) => log::info!(
                "thumbnail '{}': {} at {:?}",
                name,
                photo.title,
                photo.size
            ),
            (None, Some(err)) => log::warn!("thumbnail '{}' failed: {}", name, err),
            (None, None) => log::warn!("thumbnail '{}' never finished", name),
        }
    }
    log::info!("hero request ended as {:?}.", hero_request.status());

    manager.clear();
    glint.shutdown();
    Ok(())
}
