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

//! Pixel dimensions requested from the decode pipeline.

use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive, two-dimensional pixel size.
///
/// A `Size` can only be built through [`Size::new`], which rejects zero and
/// negative dimensions, so every value in circulation is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    /// Validates and creates a size.
    ///
    /// The inputs are signed so that callers can pass through whatever their UI
    /// layer reports; anything `<= 0` is an invalid argument.
    pub fn new(width: i32, height: i32) -> Result<Self, BuildError> {
        if width <= 0 {
            return Err(BuildError::invalid(format!(
                "width must be > 0, got {width}"
            )));
        }
        if height <= 0 {
            return Err(BuildError::invalid(format!(
                "height must be > 0, got {height}"
            )));
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
        })
    }

    /// The width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Scales both dimensions by `multiplier`, never going below one pixel.
    pub fn scaled(&self, multiplier: f32) -> Self {
        let scale = |v: u32| ((v as f32 * multiplier).round() as u32).max(1);
        Self {
            width: scale(self.width),
            height: scale(self.height),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
