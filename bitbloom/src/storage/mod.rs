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

//! Bit storage backing a Bloom filter.
//!
//! A filter never touches its bits directly; it goes through the [`Storage`] trait so that
//! callers can supply their own backend (memory mapped, remote, persisted) through a
//! [`StorageFactory`]. The built-in backend is [`BitVector`], a packed array of machine words.
//!
//! # Multi-block storage
//!
//! A filter only sees one flat range of `capacity()` bits, so storage split into blocks plugs
//! in as an ordinary [`Storage`]: map index `i` to block `i / block_bits` and bit
//! `i % block_bits` inside it, report the summed capacity, and compare block layouts in
//! `equals`. Return the block-wise AND/OR from [`Storage::as_bulk_mut`] when every block
//! supports it; otherwise the filter falls back to per-bit set operations. Keys for such a
//! layout can be drawn in several batches at once with [`Hasher::hash`]'s `batch_count`.
//!
//! [`Hasher::hash`]: crate::hasher::Hasher::hash
//!
//! # Usage
//!
//! ```rust
//! use bitbloom::storage::BitVectorFactory;
//! use bitbloom::storage::StorageFactory;
//!
//! let mut storage = BitVectorFactory.make(100).unwrap();
//! storage.set(42);
//! assert!(storage.get(42));
//! assert!(!storage.get(4200)); // out of range reads as unset
//! ```

mod bitvector;

use std::any::Any;
use std::fmt;

pub use self::bitvector::BitVector;
pub use self::bitvector::BitVectorFactory;
use crate::error::Error;

/// Fixed-capacity bit storage addressed by bit index.
///
/// Indices at or beyond [`capacity()`](Self::capacity) are ignored by `set` and `clear`, and
/// read as `false` by `get`.
pub trait Storage: fmt::Debug + Send + Sync {
    /// Sets the bit at `index`.
    fn set(&mut self, index: u64);

    /// Clears the bit at `index`.
    fn clear(&mut self, index: u64);

    /// Returns whether the bit at `index` is set.
    fn get(&self, index: u64) -> bool;

    /// Returns the number of addressable bits.
    fn capacity(&self) -> u64;

    /// Returns true if `other` is the same kind of storage with the same capacity.
    ///
    /// The bits themselves are never compared: two storages are equal when a set operation
    /// between them is well defined.
    fn equals(&self, other: &dyn Storage) -> bool;

    /// Returns this storage as [`Any`] so that implementations can recognise their own kind.
    fn as_any(&self) -> &dyn Any;

    /// Returns the word-wise set operations if this storage supports them.
    fn as_bulk_mut(&mut self) -> Option<&mut dyn BulkStorage> {
        None
    }
}

/// Accelerated set operations over a whole storage.
///
/// Both operations are no-ops when `other` is a different kind of storage.
pub trait BulkStorage {
    /// Keeps only the bits set in both `self` and `other`.
    fn intersect(&mut self, other: &dyn Storage);

    /// Sets every bit set in `other`.
    fn union(&mut self, other: &dyn Storage);
}

/// Creates storages of a requested capacity.
pub trait StorageFactory: fmt::Debug + Send + Sync {
    /// Makes a storage holding `capacity_bits` bits.
    ///
    /// # Errors
    ///
    /// Implementations fail when they cannot provide the requested capacity; the built-in
    /// [`BitVectorFactory`] rejects a capacity of zero.
    fn make(&self, capacity_bits: u64) -> Result<Box<dyn Storage>, Error>;
}
