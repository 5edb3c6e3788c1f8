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

use crate::hasher::KeyBatch;
use crate::hasher::KeyPicker;

/// Slices a digest bit stream into batches of fixed-width keys.
///
/// Batch `b` starts at bit `b * key_count * key_size`; key `j` of a batch takes the next
/// `key_size` bits after the `j` keys before it. Source bit `g` is bit `g % 8` of byte `g / 8`,
/// and the first bit of a key lands in its least significant position. Bits past the end of
/// the source read as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySplitter {
    source: Vec<u8>,
    batch_count: usize,
    key_count: usize,
    key_size: usize,
}

impl KeySplitter {
    /// Creates a splitter for `batch_count` batches of `key_count` keys, `key_size` bits each.
    ///
    /// # Panics
    ///
    /// Panics if `key_size` is wider than a [`Key`](crate::hasher::Key).
    pub fn new(source: Vec<u8>, batch_count: usize, key_count: usize, key_size: usize) -> Self {
        assert!(
            key_size <= usize::BITS as usize,
            "key size {key_size} exceeds the word size {}",
            usize::BITS
        );
        KeySplitter {
            source,
            batch_count,
            key_count,
            key_size,
        }
    }

    /// Returns the source bytes.
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Returns the number of batches.
    pub fn batch_count(&self) -> usize {
        self.batch_count
    }

    /// Returns the number of keys per batch.
    pub fn key_count(&self) -> usize {
        self.key_count
    }

    /// Returns the width of each key in bits.
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Splits the source into key batches.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bitbloom::hasher::KeySplitter;
    /// let splitter = KeySplitter::new(vec![0x1a, 0x2b, 0x3c, 0x4d], 2, 3, 8);
    /// assert_eq!(
    ///     splitter.split(),
    ///     vec![vec![0x1a, 0x2b, 0x3c], vec![0x4d, 0, 0]]
    /// );
    /// ```
    pub fn split(&self) -> Vec<KeyBatch> {
        let picker = KeyPicker::from_bytes(&self.source);
        let batch_bits = self.key_count * self.key_size;
        (0..self.batch_count)
            .map(|batch| {
                let offset = batch * batch_bits;
                (0..self.key_count)
                    .map(|key| picker.pick(offset + key * self.key_size, self.key_size))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Key;

    const SHA_HELLO: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    fn decode_hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    /// Bit by bit reference of [`KeySplitter::split`].
    fn split_naive(splitter: &KeySplitter) -> Vec<KeyBatch> {
        let source_bits = splitter.source.len() * 8;
        let mut result = Vec::with_capacity(splitter.batch_count);
        for batch in 0..splitter.batch_count {
            let offset = batch * splitter.key_count * splitter.key_size;
            let mut keys = Vec::with_capacity(splitter.key_count);
            for j in 0..splitter.key_count {
                let mut key: Key = 0;
                for p in 0..splitter.key_size {
                    let g = offset + j * splitter.key_size + p;
                    if g >= source_bits {
                        continue;
                    }
                    if splitter.source[g / 8] & (1 << (g % 8)) != 0 {
                        key |= 1 << p;
                    }
                }
                keys.push(key);
            }
            result.push(keys);
        }
        result
    }

    fn check(
        source: &str,
        batch_count: usize,
        key_count: usize,
        key_size: usize,
        expected: &[&[Key]],
    ) {
        let splitter = KeySplitter::new(decode_hex(source), batch_count, key_count, key_size);
        let expected: Vec<KeyBatch> = expected.iter().map(|batch| batch.to_vec()).collect();
        assert_eq!(split_naive(&splitter), expected, "naive");
        assert_eq!(splitter.split(), expected, "word range");
    }

    #[test]
    fn test_overflow_single_batch() {
        check("1a2b", 1, 3, 8, &[&[0x1a, 0x2b, 0x00]]);
    }

    #[test]
    fn test_overflow_two_batches() {
        check("1a2b", 2, 3, 8, &[&[0x1a, 0x2b, 0x00], &[0x00, 0x00, 0x00]]);
        check("1a2b3c4d", 2, 3, 8, &[&[0x1a, 0x2b, 0x3c], &[0x4d, 0x00, 0x00]]);
    }

    #[test]
    fn test_four_bit_keys() {
        check(SHA_HELLO, 1, 5, 4, &[&[0x0c, 0x02, 0x02, 0x0f, 0x0d]]);
        check(
            SHA_HELLO,
            2,
            5,
            4,
            &[&[0x0c, 0x02, 0x02, 0x0f, 0x0d], &[0x04, 0x0a, 0x0b, 0x0f, 0x05]],
        );
    }

    #[test]
    fn test_three_bit_keys() {
        // 2c = 0010_1100 is read 0,0,1,1,0,1,0,0
        // key 0 takes 0,0,1 -> 0b100, key 1 takes 1,0,1 -> 0b101
        check(SHA_HELLO, 1, 2, 3, &[&[4, 5]]);
        check(SHA_HELLO, 2, 2, 3, &[&[4, 5], &[0, 1]]);
    }

    #[test]
    fn test_eleven_bit_keys() {
        check(SHA_HELLO, 1, 2, 11, &[&[0x022c, 0x01be]]);
        check(SHA_HELLO, 2, 2, 11, &[&[0x022c, 0x01be], &[0x06e9, 0x002f]]);
    }

    #[test]
    fn test_byte_aligned_keys_read_little_endian() {
        check(SHA_HELLO, 1, 2, 16, &[&[0xf22c, 0xba4d]]);
        check(SHA_HELLO, 1, 2, 32, &[&[0xba4df22c, 0x0ea3b05f]]);
    }

    #[test]
    fn test_split_is_deterministic() {
        let splitter = KeySplitter::new(decode_hex(SHA_HELLO), 3, 7, 13);
        let first = splitter.split();
        assert_eq!(first, splitter.split());
        assert_eq!(first, split_naive(&splitter));
    }

    #[test]
    fn test_matches_naive_for_every_key_size() {
        let source = decode_hex(SHA_HELLO);
        for key_size in 0..=usize::BITS as usize {
            for batch_count in 1..=3 {
                let splitter = KeySplitter::new(source.clone(), batch_count, 5, key_size);
                assert_eq!(
                    splitter.split(),
                    split_naive(&splitter),
                    "key_size = {key_size}, batch_count = {batch_count}"
                );
            }
        }
    }
}
