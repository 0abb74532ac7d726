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

//! # Glint Core
//!
//! Foundational crate containing the traits, plain types, and error contracts
//! shared by the loading engine and the request layer.
//!
//! Nothing in here knows how a load is executed. The crate only describes:
//! - what a [`Request`](request::Request) is and how it reports its status,
//! - where results go ([`Target`](target::Target), [`View`](target::View)),
//! - which pluggable pipeline pieces exist ([`LoadProvider`](provider::LoadProvider),
//!   decoders, encoders, animations),
//! - and how configuration mistakes and runtime failures are reported.

#![warn(missing_docs)]

pub mod animation;
pub mod context;
pub mod error;
pub mod listener;
pub mod priority;
pub mod provider;
pub mod request;
pub mod size;
pub mod target;
pub mod transcode;

pub use context::{Context, ContextId};
pub use error::{BuildError, LoadError};
pub use priority::Priority;
pub use size::Size;
pub use transcode::TranscodeType;
