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

//! # Glint Request
//!
//! Turns a validated configuration into a running request bound to one target.
//!
//! The flow of [`RequestBuilder::into_target`]:
//! 1. ask the target for its current request,
//! 2. unbind it, tell the tracker to remove it, and clear it,
//! 3. build a [`GenericRequest`] from a copy of the configuration,
//! 4. tell the tracker to add it,
//! 5. bind it to the target,
//! 6. begin it, unless the tracker is paused.
//!
//! The result arrives later, when the controlling thread drains the
//! [`Glint`](glint_engine::Glint) completion queue.

#![warn(missing_docs)]

pub mod builder;
pub mod completion;
pub mod configuration;
pub mod generic_request;
pub mod manager;
pub mod target;
pub mod tracker;

pub use builder::RequestBuilder;
pub use completion::Completion;
pub use configuration::LoadConfiguration;
pub use generic_request::GenericRequest;
pub use manager::RequestManager;
pub use target::{SimpleTarget, ViewTarget};
pub use tracker::ActiveRequestTracker;
