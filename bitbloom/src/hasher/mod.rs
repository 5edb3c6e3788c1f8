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

//! Key derivation for Bloom filters.
//!
//! A filter with `k` hash functions over an `m`-bit storage needs `k` keys of
//! `ceil(log2(m))` bits for every item. A [`Hasher`] produces them from a single [`Digest`]:
//!
//! 1. **Stretching**: when one digest is too short for `batch_count * k * key_size` bits, the
//!    item is digested again with a one-byte counter prepended (`0`, `1`, ...), and the outputs
//!    are concatenated.
//! 2. **Splitting**: the concatenated bytes are read as a bit stream, least significant bit of
//!    each byte first, and sliced into consecutive keys. The first bit read becomes the least
//!    significant bit of the key.
//!
//! # Usage
//!
//! ```rust
//! use bitbloom::hasher::Hasher;
//! use bitbloom::hasher::HasherFactory;
//! use bitbloom::hasher::Sha256HasherFactory;
//!
//! let hasher = Sha256HasherFactory::default().make(5, 16);
//! let batches = hasher.hash(b"hello", 1);
//!
//! // sha256("hello") starts with 2c f2 4d ba
//! assert_eq!(batches[0][0], 0xf22c);
//! assert_eq!(batches[0][1], 0xba4d);
//! ```
//!
//! [`Digest`]: crate::hash::Digest

mod digest_hasher;
mod picker;
mod splitter;
pub(crate) mod stretch;

use std::any::Any;
use std::fmt;

pub use self::digest_hasher::DigestHasher;
pub use self::digest_hasher::DigestHasherFactory;
pub use self::digest_hasher::Fnv128HasherFactory;
pub use self::digest_hasher::Sha256HasherFactory;
pub use self::picker::KeyPicker;
pub use self::splitter::KeySplitter;

/// A key sliced out of a digest bit stream. Holds at most one machine word of bits.
pub type Key = usize;

/// The `k` keys addressing the storage cells of one item.
pub type KeyBatch = Vec<Key>;

/// The recipe a hasher derives keys with.
///
/// Two hashers built from the same digest algorithm and the same recipe produce the same keys
/// for every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HasherSpec {
    digest_size: usize,
    key_count: u8,
    key_size: u8,
}

impl HasherSpec {
    /// Creates a recipe for `key_count` keys of `key_size` bits from `digest_size`-byte digests.
    pub fn new(digest_size: usize, key_count: u8, key_size: u8) -> Self {
        HasherSpec {
            digest_size,
            key_count,
            key_size,
        }
    }

    /// Returns the digest output length in bytes.
    pub fn digest_size(&self) -> usize {
        self.digest_size
    }

    /// Returns the number of keys per batch.
    pub fn key_count(&self) -> u8 {
        self.key_count
    }

    /// Returns the width of each key in bits.
    pub fn key_size(&self) -> u8 {
        self.key_size
    }
}

/// Derives batches of keys from items.
pub trait Hasher: fmt::Debug + Send + Sync {
    /// Derives `batch_count` batches of keys for `item`.
    ///
    /// Each batch holds [`HasherSpec::key_count`] keys, each of them at most
    /// [`HasherSpec::key_size`] bits wide.
    fn hash(&self, item: &[u8], batch_count: usize) -> Vec<KeyBatch>;

    /// Returns the recipe of this hasher.
    fn spec(&self) -> HasherSpec;

    /// Returns true if `other` is the same kind of hasher with the same recipe.
    ///
    /// Filters may only be intersected or unioned when their hashers are equal.
    fn equals(&self, other: &dyn Hasher) -> bool;

    /// Returns this hasher as [`Any`] so that implementations can recognise their own kind.
    fn as_any(&self) -> &dyn Any;
}

/// Creates hashers for a requested key count and key size.
pub trait HasherFactory: fmt::Debug + Send + Sync {
    /// Makes a hasher deriving `key_count` keys of `key_size` bits per batch.
    fn make(&self, key_count: u8, key_size: u8) -> Box<dyn Hasher>;
}
