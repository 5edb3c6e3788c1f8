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

use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::bloom::BloomFilterBuilder;
use crate::config;
use crate::config::Config;
use crate::error::Error;
use crate::hasher::Hasher;
use crate::hasher::HasherFactory;
use crate::storage::Storage;
use crate::storage::StorageFactory;

/// A Bloom filter over a pluggable storage and hasher.
///
/// Use [`BloomFilter::new`] for the defaults or [`BloomFilter::builder`] to pick the storage
/// and hasher.
#[derive(Debug)]
pub struct BloomFilter {
    storage: Box<dyn Storage>,
    hasher: Box<dyn Hasher>,
    /// Number of `add` calls, `None` once a set operation made it unknowable
    count: Option<u64>,
    num_hashes: u8,
    key_size: u8,
    storage_factory: Arc<dyn StorageFactory>,
    hasher_factory: Arc<dyn HasherFactory>,
}

impl BloomFilter {
    /// Creates a filter for `config` with in-memory storage and the SHA-256 hasher.
    ///
    /// # Errors
    ///
    /// See [`BloomFilterBuilder::try_build`].
    pub fn new<C: Config + ?Sized>(config: &C) -> Result<Self, Error> {
        BloomFilterBuilder::new(config).try_build()
    }

    /// Returns a builder for a filter using `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitbloom::bloom::BloomFilter;
    /// use bitbloom::config::BloomConfig;
    /// use bitbloom::storage::BitVectorFactory;
    ///
    /// let config = BloomConfig::with_capacity(65536, 5);
    /// let filter = BloomFilter::builder(&config)
    ///     .storage(BitVectorFactory)
    ///     .fnv128()
    ///     .try_build()
    ///     .unwrap();
    /// assert_eq!(filter.capacity(), 65536);
    /// ```
    pub fn builder<C: Config + ?Sized>(config: &C) -> BloomFilterBuilder {
        BloomFilterBuilder::new(config)
    }

    pub(super) fn from_parts(
        storage: Box<dyn Storage>,
        hasher: Box<dyn Hasher>,
        num_hashes: u8,
        key_size: u8,
        storage_factory: Arc<dyn StorageFactory>,
        hasher_factory: Arc<dyn HasherFactory>,
    ) -> Self {
        BloomFilter {
            storage,
            hasher,
            count: Some(0),
            num_hashes,
            key_size,
            storage_factory,
            hasher_factory,
        }
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Adds an item to the filter.
    ///
    /// After insertion, `exists(item)` will always return `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bitbloom::bloom::BloomFilter;
    /// # use bitbloom::config::BloomConfig;
    /// let mut filter = BloomFilter::new(&BloomConfig::with_accuracy(0.01, 100)).unwrap();
    ///
    /// filter.add("apple");
    /// filter.add([1u8, 2, 3]);
    ///
    /// assert!(filter.exists("apple"));
    /// assert!(filter.exists([1u8, 2, 3]));
    /// ```
    pub fn add<T: AsRef<[u8]>>(&mut self, item: T) {
        let capacity = self.storage.capacity();
        for batch in self.hasher.hash(item.as_ref(), 1) {
            for key in batch {
                self.storage.set(key as u64 % capacity);
            }
        }
        if let Some(count) = self.count.as_mut() {
            *count += 1;
        }
    }

    /// Tests whether an item is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** added (or false positive)
    /// - `false`: Item was **definitely not** added
    pub fn exists<T: AsRef<[u8]>>(&self, item: T) -> bool {
        let capacity = self.storage.capacity();
        self.hasher
            .hash(item.as_ref(), 1)
            .iter()
            .flatten()
            .all(|&key| self.storage.get(key as u64 % capacity))
    }

    /// Returns the number of items added, or `None` once the filter has been intersected or
    /// unioned with another filter.
    ///
    /// Adding the same item twice counts twice.
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    // ========================================================================
    // Set Operations
    // ========================================================================

    /// Keeps only the bits set in both this filter and `other`.
    ///
    /// Items added to both filters are still reported as present afterward. The item count
    /// becomes unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StorageMismatch`] or [`HasherMismatch`] without touching either filter when
    /// the storages or hashers are not structurally equal.
    ///
    /// [`StorageMismatch`]: crate::error::ErrorKind::StorageMismatch
    /// [`HasherMismatch`]: crate::error::ErrorKind::HasherMismatch
    ///
    /// # Examples
    ///
    /// ```
    /// # use bitbloom::bloom::BloomFilter;
    /// # use bitbloom::config::BloomConfig;
    /// let config = BloomConfig::with_accuracy(0.01, 100);
    /// let mut f1 = BloomFilter::new(&config).unwrap();
    /// let mut f2 = BloomFilter::new(&config).unwrap();
    ///
    /// f1.add("a");
    /// f1.add("b");
    /// f2.add("b");
    /// f2.add("c");
    ///
    /// f1.intersect(&f2).unwrap();
    /// assert!(f1.exists("b")); // In both
    /// // "a" and "c" likely return false now
    /// ```
    pub fn intersect(&mut self, other: &BloomFilter) -> Result<(), Error> {
        self.check_compatible(other, "intersect")?;

        let other_storage = other.storage.as_ref();
        match self.storage.as_bulk_mut() {
            Some(bulk) => {
                bulk.intersect(other_storage);
                debug!(capacity = other_storage.capacity(), "bulk intersect");
            }
            None => {
                for i in 0..other_storage.capacity() {
                    if !self.storage.get(i) || !other_storage.get(i) {
                        self.storage.clear(i);
                    }
                }
                debug!(capacity = other_storage.capacity(), "per-bit intersect");
            }
        }

        self.count = None;
        Ok(())
    }

    /// Sets every bit set in `other`.
    ///
    /// Items added to either filter are reported as present afterward. The item count
    /// becomes unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StorageMismatch`] or [`HasherMismatch`] without touching either filter when
    /// the storages or hashers are not structurally equal.
    ///
    /// [`StorageMismatch`]: crate::error::ErrorKind::StorageMismatch
    /// [`HasherMismatch`]: crate::error::ErrorKind::HasherMismatch
    pub fn union(&mut self, other: &BloomFilter) -> Result<(), Error> {
        self.check_compatible(other, "union")?;

        let other_storage = other.storage.as_ref();
        match self.storage.as_bulk_mut() {
            Some(bulk) => {
                bulk.union(other_storage);
                debug!(capacity = other_storage.capacity(), "bulk union");
            }
            None => {
                for i in 0..other_storage.capacity() {
                    if self.storage.get(i) || other_storage.get(i) {
                        self.storage.set(i);
                    }
                }
                debug!(capacity = other_storage.capacity(), "per-bit union");
            }
        }

        self.count = None;
        Ok(())
    }

    /// Creates an independent copy of this filter.
    ///
    /// The copy gets fresh storage and hasher from this filter's factories, receives this
    /// filter's bits through [`union`](Self::union) and keeps the exact item count.
    ///
    /// # Errors
    ///
    /// Fails if a factory fails or produces an incompatible product.
    pub fn try_clone(&self) -> Result<Self, Error> {
        let mut clone = BloomFilterBuilder::from_factories(
            self.num_hashes,
            self.storage.capacity(),
            self.key_size,
            self.storage_factory.clone(),
            self.hasher_factory.clone(),
        )
        .try_build()?;
        clone.union(self)?;
        clone.count = self.count;
        Ok(clone)
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Returns the storage.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Returns the hasher.
    pub fn hasher(&self) -> &dyn Hasher {
        self.hasher.as_ref()
    }

    /// Returns the number of bits in the storage (m).
    pub fn capacity(&self) -> u64 {
        self.storage.capacity()
    }

    /// Returns the number of hash functions (k).
    pub fn num_hashes(&self) -> u8 {
        self.num_hashes
    }

    /// Returns the width of each key in bits.
    pub fn key_size(&self) -> u8 {
        self.key_size
    }

    /// Estimates the current false positive probability from the item count.
    ///
    /// Formula: `(1 - e^(-k*n/m))^k`. Returns `None` when the count is unknown.
    pub fn estimated_error_rate(&self) -> Option<f64> {
        self.count.map(|n| {
            config::estimated_error_rate(self.num_hashes, n, self.storage.capacity())
        })
    }

    fn check_compatible(
        &self,
        other: &BloomFilter,
        operation: &'static str,
    ) -> Result<(), Error> {
        if !self.storage.equals(other.storage.as_ref()) {
            warn!(
                operation,
                capacity = self.storage.capacity(),
                other_capacity = other.storage.capacity(),
                "storage mismatch"
            );
            return Err(Error::storage_mismatch()
                .with_context("operation", operation)
                .with_context("capacity", self.storage.capacity())
                .with_context("other_capacity", other.storage.capacity()));
        }
        if !self.hasher.equals(other.hasher.as_ref()) {
            warn!(
                operation,
                spec = ?self.hasher.spec(),
                other_spec = ?other.hasher.spec(),
                "hasher mismatch"
            );
            return Err(Error::hasher_mismatch()
                .with_context("operation", operation)
                .with_context("spec", format!("{:?}", self.hasher.spec()))
                .with_context("other_spec", format!("{:?}", other.hasher.spec())));
        }
        Ok(())
    }
}
