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

//! Bloom filter for probabilistic set membership testing.
//!
//! A Bloom filter answers "possibly in set" or "definitely not in set". Items that were added
//! are always reported as present; items that were not may be reported as present with a
//! probability controlled by the filter's [`Config`](crate::config::Config).
//!
//! The filter composes three pluggable parts:
//!
//! - a [`Storage`](crate::storage::Storage) holding `m` bits, made by a
//!   [`StorageFactory`](crate::storage::StorageFactory) (default: in-memory
//!   [`BitVector`](crate::storage::BitVector));
//! - a [`Hasher`](crate::hasher::Hasher) deriving `k` keys per item, made by a
//!   [`HasherFactory`](crate::hasher::HasherFactory) (default: SHA-256);
//! - an item counter, which becomes unknown once the filter has been intersected or unioned.
//!
//! # Usage
//!
//! ```rust
//! use bitbloom::bloom::BloomFilter;
//! use bitbloom::config::BloomConfig;
//!
//! let config = BloomConfig::with_accuracy(0.01, 1000);
//! let mut filter = BloomFilter::new(&config).unwrap();
//!
//! filter.add("apple");
//! filter.add(b"banana");
//!
//! assert!(filter.exists("apple")); // true - definitely inserted
//! assert!(!filter.exists("grape")); // false - never inserted (probably)
//! assert_eq!(filter.count(), Some(2));
//! ```
//!
//! # Set Operations
//!
//! Filters built from the same config, storage kind and hasher kind can be combined:
//!
//! ```rust
//! # use bitbloom::bloom::BloomFilter;
//! # use bitbloom::config::BloomConfig;
//! let config = BloomConfig::with_capacity(65536, 5);
//! let mut left = BloomFilter::builder(&config).fnv128().build();
//! let mut right = BloomFilter::builder(&config).fnv128().build();
//!
//! left.add("a");
//! right.add("b");
//!
//! left.union(&right).unwrap();
//! assert!(left.exists("a"));
//! assert!(left.exists("b"));
//! assert_eq!(left.count(), None); // the exact count is no longer known
//! ```
//!
//! # Concurrency
//!
//! A filter has no internal synchronization. Share it behind a lock; concurrent `exists`
//! calls are fine under a read lock, `add`, `intersect` and `union` need exclusive access.

mod builder;
mod filter;

pub use self::builder::BloomFilterBuilder;
pub use self::filter::BloomFilter;
