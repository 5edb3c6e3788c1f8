// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Digest functions used as the entropy source of the key hashers.
//!
//! A [`Digest`] is treated as a black box: the hashers only rely on it being deterministic and
//! on every output having exactly [`Digest::size()`] bytes.

mod fnv;
mod sha256;

use std::fmt;

pub use self::fnv::Fnv128;
pub use self::sha256::Sha256;

/// A deterministic byte to byte function with a fixed output length.
pub trait Digest: fmt::Debug + Send + Sync {
    /// Returns the length of every output in bytes.
    fn size(&self) -> usize;

    /// Digests `input`.
    ///
    /// The returned vector is exactly [`size()`](Self::size) bytes long.
    fn digest(&self, input: &[u8]) -> Vec<u8>;
}
