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

//! # bitbloom
//!
//! A Bloom filter built from three cooperating parts:
//!
//! - [`storage`]: packed bit storage with per-bit access and word-wise AND/OR;
//! - [`hasher`]: key derivation stretching one [`hash::Digest`] into as many keys of any width
//!   as the filter needs;
//! - [`config`]: parameter derivation from a target accuracy or an explicit capacity.
//!
//! [`bloom::BloomFilter`] ties them together and supports intersection and union of
//! compatible filters.
//!
//! ```rust
//! use bitbloom::bloom::BloomFilter;
//! use bitbloom::config::BloomConfig;
//!
//! let mut filter = BloomFilter::new(&BloomConfig::with_capacity(65536, 5)).unwrap();
//! filter.add("anything");
//! assert!(filter.exists("anything"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bloom;
pub mod config;
pub mod error;
pub mod hash;
pub mod hasher;
pub mod storage;
