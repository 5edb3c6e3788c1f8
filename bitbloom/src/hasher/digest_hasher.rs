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

use crate::hash::Digest;
use crate::hash::Fnv128;
use crate::hash::Sha256;
use crate::hasher::Hasher;
use crate::hasher::HasherFactory;
use crate::hasher::HasherSpec;
use crate::hasher::Key;
use crate::hasher::KeyBatch;
use crate::hasher::KeySplitter;
use crate::hasher::stretch;

/// A [`Hasher`] stretching and splitting the output of a [`Digest`].
///
/// Two digest hashers are equal when they wrap the same digest type and share a recipe.
#[derive(Debug, Clone)]
pub struct DigestHasher<D> {
    digest: D,
    spec: HasherSpec,
}

impl<D: Digest> DigestHasher<D> {
    /// Creates a hasher deriving `key_count` keys of `key_size` bits from `digest`.
    ///
    /// # Panics
    ///
    /// Panics if `key_size` is wider than a [`Key`].
    pub fn new(digest: D, key_count: u8, key_size: u8) -> Self {
        assert!(
            u32::from(key_size) <= Key::BITS,
            "key size {key_size} exceeds the word size {}",
            Key::BITS
        );
        let spec = HasherSpec::new(digest.size(), key_count, key_size);
        DigestHasher { digest, spec }
    }

    /// Returns the wrapped digest.
    pub fn digest(&self) -> &D {
        &self.digest
    }

    /// Stretches the digest of `item` to cover `batch_count` batches and returns the splitter
    /// over the result.
    pub fn key_splitter(&self, item: &[u8], batch_count: usize) -> KeySplitter {
        let rounds = stretch::rounds(&self.spec, batch_count);
        let source = stretch::stretch(item, self.spec.digest_size(), rounds, |input| {
            self.digest.digest(input)
        });
        KeySplitter::new(
            source,
            batch_count,
            self.spec.key_count() as usize,
            self.spec.key_size() as usize,
        )
    }
}

impl<D: Digest + 'static> Hasher for DigestHasher<D> {
    fn hash(&self, item: &[u8], batch_count: usize) -> Vec<KeyBatch> {
        self.key_splitter(item, batch_count).split()
    }

    fn spec(&self) -> HasherSpec {
        self.spec
    }

    fn equals(&self, other: &dyn Hasher) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => other.spec == self.spec,
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Makes [`DigestHasher`]s over clones of one digest.
#[derive(Debug, Clone, Default)]
pub struct DigestHasherFactory<D> {
    digest: D,
}

impl<D> DigestHasherFactory<D> {
    /// Creates a factory for hashers over `digest`.
    pub fn new(digest: D) -> Self {
        DigestHasherFactory { digest }
    }
}

impl<D: Digest + Clone + 'static> HasherFactory for DigestHasherFactory<D> {
    fn make(&self, key_count: u8, key_size: u8) -> Box<dyn Hasher> {
        Box::new(DigestHasher::new(self.digest.clone(), key_count, key_size))
    }
}

/// Makes hashers over SHA-256.
pub type Sha256HasherFactory = DigestHasherFactory<Sha256>;

/// Makes hashers over 128-bit FNV-1.
pub type Fnv128HasherFactory = DigestHasherFactory<Fnv128>;
