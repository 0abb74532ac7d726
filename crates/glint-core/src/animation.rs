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

//! Transitions applied when a loaded resource is handed to a view.

use crate::target::View;
use std::sync::Arc;
use std::time::Duration;

/// A transition that presents a resource on a view.
pub trait Animation<R>: Send + Sync {
    /// Presents `resource` on `view`.
    ///
    /// Returns `true` if the animation set the resource itself, `false` if the
    /// caller still has to display it.
    fn animate(&self, resource: &Arc<R>, view: &dyn View<R>) -> bool;
}

/// Builds the [`Animation`] for one delivery.
pub trait AnimationFactory<R>: Send + Sync {
    /// Builds an animation for a resource that came from the result cache
    /// (`from_cache`) and is the first resource shown by the target (`is_first`).
    fn build(&self, from_cache: bool, is_first: bool) -> Arc<dyn Animation<R>>;
}

/// An animation that does nothing and lets the target display the resource.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnimation;

impl<R: 'static> Animation<R> for NoAnimation {
    fn animate(&self, _resource: &Arc<R>, _view: &dyn View<R>) -> bool {
        false
    }
}

/// The factory used when no animation is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnimationFactory;

impl<R: 'static> AnimationFactory<R> for NoAnimationFactory {
    fn build(&self, _from_cache: bool, _is_first: bool) -> Arc<dyn Animation<R>> {
        Arc::new(NoAnimation)
    }
}

/// Fades resources in, except when they come from the cache.
#[derive(Debug, Clone, Copy)]
pub struct FadeFactory {
    duration: Duration,
}

impl FadeFactory {
    /// Creates a factory for fades of the given duration.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Default for FadeFactory {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

impl<R: Send + Sync + 'static> AnimationFactory<R> for FadeFactory {
    fn build(&self, from_cache: bool, _is_first: bool) -> Arc<dyn Animation<R>> {
        // Cached results are instant; fading them in looks like a flicker.
        if from_cache {
            Arc::new(NoAnimation)
        } else {
            Arc::new(Fade {
                duration: self.duration,
            })
        }
    }
}

struct Fade {
    duration: Duration,
}

impl<R: Send + Sync + 'static> Animation<R> for Fade {
    fn animate(&self, resource: &Arc<R>, view: &dyn View<R>) -> bool {
        view.fade_in(resource.clone(), self.duration)
    }
}
