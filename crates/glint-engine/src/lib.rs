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

//! # Glint Engine
//!
//! The process-wide loader instance ([`Glint`]) and the machinery behind it:
//! - a pool of worker threads that runs fetch/decode jobs off the controlling thread,
//! - a result cache seam consulted and filled by those jobs,
//! - a completion dispatcher that hands results back to the controlling thread.
//!
//! A `Glint` is always injected into the code that needs it; there is no
//! global instance.

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod engine;
mod glint;

pub use cache::{InMemoryResultCache, ResultCache};
pub use config::GlintConfig;
pub use dispatch::CompletionDispatcher;
pub use engine::{LoadEngine, LoadHandle, LoadJob, Loaded, OnComplete};
pub use glint::Glint;
