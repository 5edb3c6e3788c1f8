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

use byteorder::ByteOrder;
use byteorder::LittleEndian;

use crate::hasher::Key;

const WORD_BITS: usize = usize::BITS as usize;
const WORD_BYTES: usize = WORD_BITS / 8;

/// Extracts ranges of bits from a word array.
///
/// Bit `g` of the source is bit `g % WORD_BITS` of word `g / WORD_BITS`. Bits past the end of
/// the words read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPicker {
    words: Vec<usize>,
}

impl KeyPicker {
    /// Creates a picker over `words`.
    pub fn new(words: Vec<usize>) -> Self {
        KeyPicker { words }
    }

    /// Creates a picker over a byte stream read least significant bit first.
    ///
    /// Packing the bytes little-endian into words keeps bit `g` of the stream (bit `g % 8` of
    /// byte `g / 8`) at global position `g`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let words = bytes
            .chunks(WORD_BYTES)
            .map(|chunk| LittleEndian::read_uint(chunk, chunk.len()) as usize)
            .collect();
        KeyPicker { words }
    }

    /// Returns the backing words.
    pub fn words(&self) -> &[usize] {
        &self.words
    }

    /// Returns the `size` bits starting at bit `index`, the bit at `index` being the least
    /// significant one of the result.
    ///
    /// # Panics
    ///
    /// Panics if `size` is wider than a [`Key`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use bitbloom::hasher::KeyPicker;
    /// let picker = KeyPicker::new(vec![0b1101_0101]);
    /// assert_eq!(picker.pick(0, 5), 0b1_0101);
    /// assert_eq!(picker.pick(2, 3), 0b101);
    /// ```
    pub fn pick(&self, index: usize, size: usize) -> Key {
        assert!(
            size <= WORD_BITS,
            "key size {size} exceeds the word size {WORD_BITS}"
        );
        if size == 0 {
            return 0;
        }

        let end = index + size;
        let start_word = index / WORD_BITS;
        let end_word = end / WORD_BITS;
        let start_offset = index % WORD_BITS;
        let end_offset = end % WORD_BITS;

        let mask_start = usize::MAX << start_offset;
        if start_word == end_word {
            // end_offset > start_offset since size > 0
            let mask_end = usize::MAX >> (WORD_BITS - end_offset);
            return (self.word(start_word) & mask_start & mask_end) >> start_offset;
        }

        let head = (self.word(start_word) & mask_start) >> start_offset;
        if end_offset == 0 {
            return head;
        }

        // the range crosses a word boundary, so start_offset > 0
        let mask_end = usize::MAX >> (WORD_BITS - end_offset);
        head | (self.word(end_word) & mask_end) << (WORD_BITS - start_offset)
    }

    fn word(&self, index: usize) -> usize {
        self.words.get(index).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl KeyPicker {
        fn pick_naive(&self, index: usize, size: usize) -> Key {
            let mut key = 0;
            for i in index..index + size {
                if self.word(i / WORD_BITS) & (1 << (i % WORD_BITS)) != 0 {
                    key |= 1 << (i - index);
                }
            }
            key
        }
    }

    fn check(picker: &KeyPicker, index: usize, size: usize, expected: Key) {
        assert_eq!(picker.pick_naive(index, size), expected, "naive");
        assert_eq!(picker.pick(index, size), expected, "word range");
    }

    #[test]
    fn test_same_word_start_at_zero() {
        let picker = KeyPicker::new(vec![0b1101_0101]);
        check(&picker, 0, 5, 0b1_0101);
    }

    #[test]
    fn test_same_word_start_at_three() {
        let picker = KeyPicker::new(vec![0b0101_1100_1010_0010_1111_1011]);
        check(&picker, 3, 8, 0b101_1111);
    }

    #[test]
    fn test_same_word_end_at_last_bit() {
        let picker = KeyPicker::new(vec![0b1100_0101_1100_1010 << (WORD_BITS - 16)]);
        check(&picker, WORD_BITS - 12, 12, 0b1100_0101_1100);
    }

    #[test]
    fn test_two_words_end_in_the_middle() {
        let picker = KeyPicker::new(vec![
            0b1100_0101_1100_1010 << (WORD_BITS - 16),
            0b1010_0010_1111_1011,
        ]);
        check(&picker, WORD_BITS - 6, 12, 0b11_1011_1100_01);
    }

    #[test]
    fn test_whole_word() {
        let picker = KeyPicker::new(vec![usize::MAX - 6, 42]);
        check(&picker, 0, WORD_BITS, usize::MAX - 6);
        check(&picker, WORD_BITS, WORD_BITS, 42);
    }

    #[test]
    fn test_past_the_end_reads_zero() {
        let picker = KeyPicker::new(vec![usize::MAX]);
        check(&picker, WORD_BITS - 4, 8, 0b1111);
        check(&picker, WORD_BITS * 3, 8, 0);
    }

    #[test]
    fn test_zero_size() {
        let picker = KeyPicker::new(vec![usize::MAX]);
        assert_eq!(picker.pick(5, 0), 0);
    }

    #[test]
    fn test_matches_naive_within_one_word() {
        let picker = KeyPicker::from_bytes(&[
            0x0e, 0xa3, 0xb0, 0x5f, 0xba, 0x4d, 0xf2, 0x2c, 0x9e, 0xe2, 0xb9, 0xc5, 0x2a, 0x3b,
            0xe8, 0x26,
        ]);
        for index in 0..WORD_BITS {
            for size in 0..=WORD_BITS - index {
                assert_eq!(
                    picker.pick(index, size),
                    picker.pick_naive(index, size),
                    "index = {index}, size = {size}"
                );
            }
        }
    }

    #[test]
    fn test_matches_naive_across_words() {
        let mut words = Vec::new();
        let mut state = 0x2cf24dba5fb0a30e_u64;
        for _ in 0..8 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            words.push(state as usize);
        }
        let picker = KeyPicker::new(words);
        for index in 0..WORD_BITS * 7 {
            for size in 1..=WORD_BITS {
                assert_eq!(
                    picker.pick(index, size),
                    picker.pick_naive(index, size),
                    "index = {index}, size = {size}"
                );
            }
        }
    }

    #[test]
    fn test_from_bytes_keeps_bit_order() {
        let picker = KeyPicker::from_bytes(&[0x2c, 0xf2, 0x4d]);
        assert_eq!(picker.words().len(), 1);
        assert_eq!(picker.words()[0], 0x4df22c);
        // 0x2c = 0b0010_1100, read from the least significant bit
        check(&picker, 0, 3, 0b100);
        check(&picker, 3, 3, 0b101);
    }

    #[test]
    #[should_panic(expected = "exceeds the word size")]
    fn test_size_wider_than_a_word() {
        KeyPicker::default().pick(0, WORD_BITS + 1);
    }
}
