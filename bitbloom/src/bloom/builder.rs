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

use crate::bloom::BloomFilter;
use crate::config::Config;
use crate::error::Error;
use crate::hash::Fnv128;
use crate::hash::Sha256;
use crate::hasher::DigestHasherFactory;
use crate::hasher::HasherFactory;
use crate::hasher::Key;
use crate::hasher::stretch;
use crate::storage::BitVectorFactory;
use crate::storage::StorageFactory;

/// Builder for creating [`BloomFilter`] instances.
///
/// The parameters come from a [`Config`]; the storage defaults to an in-memory
/// [`BitVector`](crate::storage::BitVector) and the hasher to SHA-256.
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    num_hashes: u8,
    capacity_bits: u64,
    key_size: u8,
    storage_factory: Arc<dyn StorageFactory>,
    hasher_factory: Arc<dyn HasherFactory>,
}

impl BloomFilterBuilder {
    /// Creates a builder reading its parameters from `config`.
    pub fn new<C: Config + ?Sized>(config: &C) -> Self {
        BloomFilterBuilder {
            num_hashes: config.num_hashes(),
            capacity_bits: config.capacity_bits(),
            key_size: config.key_size(),
            storage_factory: Arc::new(BitVectorFactory),
            hasher_factory: Arc::new(DigestHasherFactory::new(Sha256)),
        }
    }

    pub(super) fn from_factories(
        num_hashes: u8,
        capacity_bits: u64,
        key_size: u8,
        storage_factory: Arc<dyn StorageFactory>,
        hasher_factory: Arc<dyn HasherFactory>,
    ) -> Self {
        BloomFilterBuilder {
            num_hashes,
            capacity_bits,
            key_size,
            storage_factory,
            hasher_factory,
        }
    }

    /// Sets the factory making the filter's storage.
    pub fn storage(mut self, factory: impl StorageFactory + 'static) -> Self {
        self.storage_factory = Arc::new(factory);
        self
    }

    /// Sets the factory making the filter's hasher.
    pub fn hasher(mut self, factory: impl HasherFactory + 'static) -> Self {
        self.hasher_factory = Arc::new(factory);
        self
    }

    /// Uses hashers over SHA-256 (the default).
    pub fn sha256(self) -> Self {
        self.hasher(DigestHasherFactory::new(Sha256))
    }

    /// Uses hashers over 128-bit FNV-1.
    pub fn fnv128(self) -> Self {
        self.hasher(DigestHasherFactory::new(Fnv128))
    }

    /// Builds the Bloom filter.
    ///
    /// # Errors
    ///
    /// - [`ConfigInvalid`] if the config asks for no hash function or for keys wider than a
    ///   [`Key`].
    /// - [`ConstructionFailed`] if the storage factory fails, for instance on a zero capacity.
    /// - [`FactoryInvalid`] if the hasher does not follow the requested key count and key size,
    ///   has an empty digest or a digest too short to stretch over `k` keys, or if the storage
    ///   does not have the requested capacity.
    ///
    /// [`ConfigInvalid`]: crate::error::ErrorKind::ConfigInvalid
    /// [`ConstructionFailed`]: crate::error::ErrorKind::ConstructionFailed
    /// [`FactoryInvalid`]: crate::error::ErrorKind::FactoryInvalid
    pub fn try_build(self) -> Result<BloomFilter, Error> {
        if self.num_hashes == 0 {
            return Err(Error::config_invalid("number of hash functions must be positive"));
        }
        if u32::from(self.key_size) > Key::BITS {
            return Err(Error::config_invalid("key size exceeds the word size")
                .with_context("key_size", self.key_size)
                .with_context("word_bits", Key::BITS));
        }

        let hasher = self.hasher_factory.make(self.num_hashes, self.key_size);
        let spec = hasher.spec();
        if spec.key_count() != self.num_hashes || spec.key_size() != self.key_size {
            return Err(
                Error::factory_invalid("hasher does not follow the requested recipe")
                    .with_context("requested_key_count", self.num_hashes)
                    .with_context("requested_key_size", self.key_size)
                    .with_context("spec", format!("{spec:?}")),
            );
        }
        if spec.digest_size() == 0 {
            return Err(Error::factory_invalid("hasher digest is empty")
                .with_context("spec", format!("{spec:?}")));
        }
        let rounds = stretch::rounds(&spec, 1);
        if rounds > stretch::MAX_ROUNDS {
            return Err(
                Error::factory_invalid("hasher digest is too short for the requested keys")
                    .with_context("rounds", rounds)
                    .with_context("max_rounds", stretch::MAX_ROUNDS)
                    .with_context("spec", format!("{spec:?}")),
            );
        }

        let storage = self.storage_factory.make(self.capacity_bits).map_err(|err| {
            Error::construction_failed("failed to make storage")
                .with_context("capacity_bits", self.capacity_bits)
                .set_source(err)
        })?;
        if storage.capacity() != self.capacity_bits || storage.capacity() == 0 {
            return Err(
                Error::factory_invalid("storage does not have the requested capacity")
                    .with_context("requested", self.capacity_bits)
                    .with_context("actual", storage.capacity()),
            );
        }

        debug!(
            capacity_bits = self.capacity_bits,
            num_hashes = self.num_hashes,
            key_size = self.key_size,
            digest_size = spec.digest_size(),
            "built bloom filter"
        );
        Ok(BloomFilter::from_parts(
            storage,
            hasher,
            self.num_hashes,
            self.key_size,
            self.storage_factory,
            self.hasher_factory,
        ))
    }

    /// Builds the Bloom filter, for call sites that already validated their parameters.
    ///
    /// # Panics
    ///
    /// Panics if [`try_build`](Self::try_build) fails.
    pub fn build(self) -> BloomFilter {
        match self.try_build() {
            Ok(filter) => filter,
            Err(err) => panic!("failed to build bloom filter: {err}"),
        }
    }
}
