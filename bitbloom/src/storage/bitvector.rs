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

use std::any::Any;

use crate::error::Error;
use crate::storage::BulkStorage;
use crate::storage::Storage;
use crate::storage::StorageFactory;

/// Number of bits in one storage word.
pub(crate) const WORD_BITS: u64 = usize::BITS as u64;

/// A packed bit array stored in native machine words.
///
/// Bit `i` lives in word `i / WORD_BITS` under the mask `1 << (i % WORD_BITS)`.
#[derive(Debug, Clone)]
pub struct BitVector {
    /// Bit array packed into words
    /// Length = ceil(capacity_bits / WORD_BITS)
    words: Vec<usize>,
    capacity_bits: u64,
}

impl BitVector {
    /// Creates a bit vector of `capacity_bits` bits, all cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bitbloom::storage::BitVector;
    /// # use bitbloom::storage::Storage;
    /// let bits = BitVector::new(130);
    /// assert_eq!(bits.capacity(), 130);
    /// assert_eq!(bits.words().len(), 130usize.div_ceil(usize::BITS as usize));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the words cannot be allocated. See [`try_new`](Self::try_new).
    pub fn new(capacity_bits: u64) -> Self {
        match Self::try_new(capacity_bits) {
            Ok(bits) => bits,
            Err(err) => panic!("failed to create bit vector: {err}"),
        }
    }

    /// Creates a bit vector of `capacity_bits` bits, all cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionFailed`](crate::error::ErrorKind::ConstructionFailed) if the
    /// capacity does not fit the address space or the words cannot be allocated.
    pub fn try_new(capacity_bits: u64) -> Result<Self, Error> {
        let num_words = usize::try_from(capacity_bits.div_ceil(WORD_BITS)).map_err(|_| {
            Error::construction_failed("storage capacity exceeds the address space")
                .with_context("capacity_bits", capacity_bits)
        })?;

        let mut words = Vec::new();
        words.try_reserve_exact(num_words).map_err(|err| {
            Error::construction_failed("failed to allocate storage")
                .with_context("capacity_bits", capacity_bits)
                .set_source(err)
        })?;
        words.resize(num_words, 0);

        Ok(BitVector {
            words,
            capacity_bits,
        })
    }

    /// Returns the backing words.
    pub fn words(&self) -> &[usize] {
        &self.words
    }

    /// Returns the number of bits set to 1.
    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|word| word.count_ones() as u64).sum()
    }

    fn indexing(index: u64) -> (usize, usize) {
        let word_index = (index / WORD_BITS) as usize;
        let mask = 1usize << (index % WORD_BITS);
        (word_index, mask)
    }
}

impl Storage for BitVector {
    fn set(&mut self, index: u64) {
        if index >= self.capacity_bits {
            return;
        }
        let (n, mask) = Self::indexing(index);
        self.words[n] |= mask;
    }

    fn clear(&mut self, index: u64) {
        if index >= self.capacity_bits {
            return;
        }
        let (n, mask) = Self::indexing(index);
        self.words[n] &= !mask;
    }

    fn get(&self, index: u64) -> bool {
        if index >= self.capacity_bits {
            return false;
        }
        let (n, mask) = Self::indexing(index);
        (self.words[n] & mask) != 0
    }

    fn capacity(&self) -> u64 {
        self.capacity_bits
    }

    fn equals(&self, other: &dyn Storage) -> bool {
        match other.as_any().downcast_ref::<BitVector>() {
            Some(other) => other.capacity_bits == self.capacity_bits,
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_bulk_mut(&mut self) -> Option<&mut dyn BulkStorage> {
        Some(self)
    }
}

impl BulkStorage for BitVector {
    fn intersect(&mut self, other: &dyn Storage) {
        let Some(other) = other.as_any().downcast_ref::<BitVector>() else {
            return;
        };
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word &= *other_word;
        }
    }

    fn union(&mut self, other: &dyn Storage) {
        let Some(other) = other.as_any().downcast_ref::<BitVector>() else {
            return;
        };
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word |= *other_word;
        }
    }
}

/// Makes in-memory [`BitVector`] storages.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitVectorFactory;

impl StorageFactory for BitVectorFactory {
    fn make(&self, capacity_bits: u64) -> Result<Box<dyn Storage>, Error> {
        if capacity_bits == 0 {
            return Err(Error::construction_failed("invalid storage capacity")
                .with_context("capacity_bits", capacity_bits));
        }
        Ok(Box::new(BitVector::try_new(capacity_bits)?))
    }
}
