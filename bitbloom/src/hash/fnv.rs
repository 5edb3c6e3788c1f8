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

use byteorder::BigEndian;
use byteorder::ByteOrder;

use crate::hash::Digest;

const FNV128_SIZE: usize = 16;

const OFFSET_BASIS: u128 = 0x6c62272e07bb014262b821756295c58d;
const PRIME: u128 = 0x0000000001000000000000000000013b;

/// FNV-1 with a 128-bit state, 16 bytes per digest.
///
/// The state is emitted big-endian, so the first output byte is the most significant byte of
/// the state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fnv128;

impl Fnv128 {
    fn hash(input: &[u8]) -> u128 {
        // FNV-1 multiplies before mixing the byte in (FNV-1a does the opposite)
        input.iter().fold(OFFSET_BASIS, |state, &byte| {
            state.wrapping_mul(PRIME) ^ u128::from(byte)
        })
    }
}

impl Digest for Fnv128 {
    fn size(&self) -> usize {
        FNV128_SIZE
    }

    fn digest(&self, input: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; FNV128_SIZE];
        BigEndian::write_u128(&mut out, Self::hash(input));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_empty_input_is_offset_basis() {
        assert_eq!(
            hex(&Fnv128.digest(&[])),
            "6c62272e07bb014262b821756295c58d"
        );
    }

    #[test]
    fn test_digest_hello() {
        assert_eq!(
            hex(&Fnv128.digest(b"hello")),
            "f14b58486483d94f708038798c29697f"
        );
        assert_eq!(
            hex(&Fnv128.digest(b"\x00hello")),
            "09a825debb3c64bf6dc6a3066cccba81"
        );
    }
}
