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

//! The pluggable fetch/decode/encode pipeline.
//!
//! These traits represent the "data plane" of a load. Implementors do the
//! potentially expensive work of fetching raw bytes and turning them into
//! resources; they run on the engine's worker threads, never on the
//! controlling thread.

use crate::size::Size;
use std::error::Error;
use std::sync::Arc;

/// The error type returned by pipeline collaborators. It must be thread-safe.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Turns raw bytes into a resource of type `R`.
pub trait ResourceDecoder<R>: Send + Sync {
    /// A stable identifier, used in cache keys and error messages.
    fn id(&self) -> &str;

    /// Decodes `bytes`, ideally at `size` if the decoder supports downsampling.
    fn decode(&self, bytes: &[u8], size: Option<Size>) -> Result<R, BoxError>;
}

/// Turns a resource back into bytes for the result cache.
pub trait ResourceEncoder<R>: Send + Sync {
    /// A stable identifier, used in cache keys.
    fn id(&self) -> &str;

    /// Encodes `resource`.
    fn encode(&self, resource: &R) -> Result<Vec<u8>, BoxError>;
}

/// Supplies everything needed to load a model of type `M` into a resource of
/// type `R`.
///
/// The decoders and encoder returned here are the defaults; a request can
/// override each of them individually.
pub trait LoadProvider<M, R>: Send + Sync {
    /// A key uniquely naming the data behind `model`.
    fn cache_key(&self, model: &M) -> String;

    /// Fetches the raw bytes for `model`.
    fn fetch(&self, model: &M) -> Result<Vec<u8>, BoxError>;

    /// The decoder for freshly fetched bytes.
    fn source_decoder(&self) -> Arc<dyn ResourceDecoder<R>>;

    /// The decoder for bytes read back from the result cache.
    fn cache_decoder(&self) -> Arc<dyn ResourceDecoder<R>>;

    /// The encoder that writes results to the cache.
    fn encoder(&self) -> Arc<dyn ResourceEncoder<R>>;
}
