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

//! Ready-made targets.
//!
//! [`SimpleTarget`] records whatever it is told, which suits headless
//! consumers. [`ViewTarget`] adapts a [`View`](glint_core::target::View)
//! widget and runs the configured animation on it.

mod simple;
mod view;

pub use simple::SimpleTarget;
pub use view::ViewTarget;
