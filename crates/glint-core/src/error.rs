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

//! Defines the two error families of the loading library.
//!
//! [`BuildError`] covers configuration mistakes. These are raised synchronously
//! by the call that introduced them and never leave partial state behind.
//!
//! [`LoadError`] covers runtime failures of the fetch/decode pipeline. These are
//! never returned from request construction; they travel asynchronously to the
//! target of the failed request.

use std::fmt;

/// A configuration error raised while assembling or issuing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A required collaborator or argument was absent.
    NullArgument {
        /// The name of the missing argument.
        name: &'static str,
    },
    /// An argument was present but outside its accepted range.
    InvalidArgument {
        /// A human-readable description of the violated constraint.
        reason: String,
    },
}

impl BuildError {
    /// Shorthand for a [`BuildError::NullArgument`].
    pub fn null(name: &'static str) -> Self {
        BuildError::NullArgument { name }
    }

    /// Shorthand for a [`BuildError::InvalidArgument`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        BuildError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`BuildError::NullArgument`].
    pub fn is_null_argument(&self) -> bool {
        matches!(self, BuildError::NullArgument { .. })
    }

    /// Returns `true` for [`BuildError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, BuildError::InvalidArgument { .. })
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::NullArgument { name } => {
                write!(f, "Required argument '{name}' must not be null")
            }
            BuildError::InvalidArgument { reason } => {
                write!(f, "Invalid argument: {reason}")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// A runtime failure of a load, delivered to the target of the request.
///
/// Collaborator errors are flattened to their message so the error can be
/// cloned into the request's completion channel and into listener callbacks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The request was issued without a model, so there is nothing to load.
    #[error("Request has no model to load")]
    MissingModel,
    /// The load provider failed to fetch the raw data for the model.
    #[error("Failed to fetch data: {0}")]
    Fetch(String),
    /// A decoder failed to turn raw data into a resource.
    #[error("Failed to decode resource with '{decoder}': {message}")]
    Decode {
        /// The id of the decoder that failed.
        decoder: String,
        /// The decoder's error message.
        message: String,
    },
    /// The job was cancelled before it produced a result.
    #[error("Load was cancelled")]
    Cancelled,
    /// The engine was shut down before the job could run.
    #[error("Load engine is shut down")]
    EngineShutdown,
}
