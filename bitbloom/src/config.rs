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

//! Parameter derivation for Bloom filters.
//!
//! A [`Config`] tells the filter builder how many hash functions to use, how many bits to
//! allocate and how wide each key must be. [`BloomConfig`] derives these values either from a
//! target accuracy or from an explicit capacity:
//!
//! ```rust
//! use bitbloom::config::BloomConfig;
//! use bitbloom::config::Config;
//!
//! // By accuracy: 1% false positives for 1000 items
//! let config = BloomConfig::with_accuracy(0.01, 1000);
//! assert_eq!(config.num_hashes(), 7);
//! assert_eq!(config.capacity_bits(), 9568);
//! assert_eq!(config.key_size(), 14);
//!
//! // By capacity: 64 Kib and 5 hash functions
//! let config = BloomConfig::with_capacity(65536, 5);
//! assert_eq!(config.key_size(), 16);
//! ```

use std::fmt;

/// Error rate used by [`BloomConfig::with_accuracy`] when the requested one is not positive.
pub const DEFAULT_ERROR_RATE: f64 = 0.0001;
/// Item count used by [`BloomConfig::with_accuracy`] when the expected one is zero.
pub const DEFAULT_EXPECTED_ITEMS: u64 = 1_000_000;
/// Capacity used by [`BloomConfig::with_capacity`] when the requested one is zero.
pub const DEFAULT_CAPACITY_BITS: u64 = 8192;
/// Hash count used by [`BloomConfig::with_capacity`] when the requested one is zero.
pub const DEFAULT_NUM_HASHES: u8 = 5;

// m / n = 1.44 * log2(1 / p) for an optimally sized filter
const BITS_PER_ITEM_FACTOR: f64 = 1.44;

/// Parameters consumed when a filter is built.
pub trait Config: fmt::Debug {
    /// Returns the number of hash functions (k).
    fn num_hashes(&self) -> u8;

    /// Returns the number of bits of the storage (m).
    fn capacity_bits(&self) -> u64;

    /// Returns the width in bits of every key, enough to address any of the storage bits.
    fn key_size(&self) -> u8 {
        key_size_for(self.capacity_bits())
    }

    /// Returns a human readable description of the parameters.
    fn info(&self) -> String;
}

/// Returns `ceil(log2(capacity_bits))`, the key width needed to address every bit.
///
/// # Examples
///
/// ```
/// # use bitbloom::config::key_size_for;
/// assert_eq!(key_size_for(65536), 16);
/// assert_eq!(key_size_for(65537), 17);
/// assert_eq!(key_size_for(1), 0);
/// ```
pub fn key_size_for(capacity_bits: u64) -> u8 {
    if capacity_bits <= 1 {
        return 0;
    }
    (u64::BITS - (capacity_bits - 1).leading_zeros()) as u8
}

/// Estimates the false positive rate of a filter with `num_hashes` hash functions and
/// `capacity_bits` bits once `num_items` items have been added.
///
/// Formula: `(1 - e^(-k*n/m))^k`
pub fn estimated_error_rate(num_hashes: u8, num_items: u64, capacity_bits: u64) -> f64 {
    if capacity_bits == 0 {
        return 1.0;
    }
    let k = num_hashes as f64;
    let n = num_items as f64;
    let m = capacity_bits as f64;
    (1.0 - (-k * n / m).exp()).powi(num_hashes as i32)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Accuracy {
    requested_error_rate: f64,
    expected_items: u64,
    bits_per_item: f64,
    estimated_error_rate: f64,
}

/// Filter parameters derived from a target accuracy or from an explicit capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomConfig {
    num_hashes: u8,
    capacity_bits: u64,
    /// Present when derived by [`with_accuracy`](Self::with_accuracy)
    accuracy: Option<Accuracy>,
}

impl BloomConfig {
    /// Derives the parameters reaching `error_rate` false positives once `expected_items`
    /// items have been added.
    ///
    /// - `k = ceil(|log2(error_rate)|)`, saturating at 255
    /// - `bits_per_item = 1.44 * |log2(error_rate)|`
    /// - `m = ceil(expected_items * bits_per_item)`
    ///
    /// A non-positive or non-finite `error_rate` falls back to [`DEFAULT_ERROR_RATE`] and a zero
    /// `expected_items` to [`DEFAULT_EXPECTED_ITEMS`].
    pub fn with_accuracy(error_rate: f64, expected_items: u64) -> Self {
        let error_rate = if error_rate > 0.0 && error_rate.is_finite() {
            error_rate
        } else {
            DEFAULT_ERROR_RATE
        };
        let expected_items = if expected_items == 0 {
            DEFAULT_EXPECTED_ITEMS
        } else {
            expected_items
        };

        let log2 = error_rate.log2().abs();
        let num_hashes = log2.ceil() as u8;
        let bits_per_item = BITS_PER_ITEM_FACTOR * log2;
        let capacity_bits = (expected_items as f64 * bits_per_item).ceil() as u64;

        BloomConfig {
            num_hashes,
            capacity_bits,
            accuracy: Some(Accuracy {
                requested_error_rate: error_rate,
                expected_items,
                bits_per_item,
                estimated_error_rate: estimated_error_rate(
                    num_hashes,
                    expected_items,
                    capacity_bits,
                ),
            }),
        }
    }

    /// Uses `capacity_bits` bits and `num_hashes` hash functions as given.
    ///
    /// A zero `capacity_bits` falls back to [`DEFAULT_CAPACITY_BITS`] and a zero `num_hashes`
    /// to [`DEFAULT_NUM_HASHES`].
    pub fn with_capacity(capacity_bits: u64, num_hashes: u8) -> Self {
        BloomConfig {
            num_hashes: if num_hashes == 0 {
                DEFAULT_NUM_HASHES
            } else {
                num_hashes
            },
            capacity_bits: if capacity_bits == 0 {
                DEFAULT_CAPACITY_BITS
            } else {
                capacity_bits
            },
            accuracy: None,
        }
    }

    /// Returns the error rate the config was derived from, if derived by accuracy.
    pub fn requested_error_rate(&self) -> Option<f64> {
        self.accuracy.map(|a| a.requested_error_rate)
    }

    /// Returns the item count the config was derived for, if derived by accuracy.
    pub fn expected_items(&self) -> Option<u64> {
        self.accuracy.map(|a| a.expected_items)
    }

    /// Returns the bits allocated per expected item, if derived by accuracy.
    pub fn bits_per_item(&self) -> Option<f64> {
        self.accuracy.map(|a| a.bits_per_item)
    }

    /// Returns the false positive rate expected once the expected items have been added, if
    /// derived by accuracy.
    pub fn estimated_error_rate(&self) -> Option<f64> {
        self.accuracy.map(|a| a.estimated_error_rate)
    }

    /// Estimates the false positive rate after `num_items` items have been added.
    pub fn estimated_error_rate_for(&self, num_items: u64) -> f64 {
        estimated_error_rate(self.num_hashes, num_items, self.capacity_bits)
    }

    fn storage_line(&self) -> String {
        let bytes = self.capacity_bits.div_ceil(8);
        let kib = bytes as f64 / 1024.0;
        let mib = kib / 1024.0;
        format!(
            "  - Storage capacity: {} bits = {} bytes = {:.2}KB = {:.2}MB",
            self.capacity_bits, bytes, kib, mib
        )
    }
}

impl Config for BloomConfig {
    fn num_hashes(&self) -> u8 {
        self.num_hashes
    }

    fn capacity_bits(&self) -> u64 {
        self.capacity_bits
    }

    fn info(&self) -> String {
        let mut lines = Vec::new();
        match self.accuracy {
            Some(accuracy) => {
                lines.push("Config with_accuracy()".to_string());
                lines.push(format!(
                    "  - Requested error rate: {:.5}%",
                    accuracy.requested_error_rate * 100.0
                ));
                lines.push(format!(
                    "  - Expected number of items: {}",
                    accuracy.expected_items
                ));
                lines.push(format!("  - Bits per item: {:.3}", accuracy.bits_per_item));
                lines.push(format!("  - Number of hash functions: {}", self.num_hashes));
                lines.push(format!("  - Size in bits of each key: {}", self.key_size()));
                lines.push(self.storage_line());
                lines.push(format!(
                    "  - Estimated error rate: {:.5}%",
                    accuracy.estimated_error_rate * 100.0
                ));
            }
            None => {
                lines.push("Config with_capacity()".to_string());
                lines.push(self.storage_line());
                lines.push(format!("  - Number of hash functions: {}", self.num_hashes));
                lines.push(format!("  - Size in bits of each key: {}", self.key_size()));
                lines.push("  - Estimated error rate by n - number of added items:".to_string());

                let magnitude = (self.capacity_bits as f64).log10().ceil().max(1.0) as u32;
                let width = magnitude as usize + 1;
                let mut base = 10u64.pow(magnitude.saturating_sub(3).max(1));
                for _ in magnitude.saturating_sub(3).max(1)..=magnitude {
                    for n in [base, base.saturating_mul(2), base.saturating_mul(5)] {
                        lines.push(format!(
                            "      n={:>width$}; estimated error rate: {:.5}%",
                            n,
                            100.0 * self.estimated_error_rate_for(n)
                        ));
                    }
                    base = base.saturating_mul(10);
                }
            }
        }
        lines.join("\n")
    }
}
