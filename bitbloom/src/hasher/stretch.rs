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

use crate::hasher::HasherSpec;

/// One unprefixed round plus one round per counter byte value.
pub(crate) const MAX_ROUNDS: usize = 1 + 256;

/// Returns how many digests are needed to cover `batch_count` batches of keys.
///
/// An empty digest never covers anything; one round is returned and every key reads as zero.
pub(crate) fn rounds(spec: &HasherSpec, batch_count: usize) -> usize {
    let required_bits = batch_count * spec.key_count() as usize * spec.key_size() as usize;
    let digest_bits = spec.digest_size() * 8;
    if digest_bits == 0 {
        return 1;
    }
    required_bits.div_ceil(digest_bits).max(1)
}

/// Digests `item` `rounds` times and concatenates the outputs.
///
/// The first round digests the item as is; round `i > 0` digests the item prefixed with the
/// counter byte `i - 1`. Every output is cut or zero-padded to `digest_size` bytes.
///
/// # Panics
///
/// Panics if `rounds` exceeds [`MAX_ROUNDS`], where the counter byte would wrap.
pub(crate) fn stretch<F>(item: &[u8], digest_size: usize, rounds: usize, mut digest: F) -> Vec<u8>
where
    F: FnMut(&[u8]) -> Vec<u8>,
{
    assert!(
        rounds <= MAX_ROUNDS,
        "{rounds} digest rounds requested, at most {MAX_ROUNDS} are supported"
    );

    let mut source = Vec::with_capacity(rounds * digest_size);
    let mut append = |mut out: Vec<u8>| {
        out.resize(digest_size, 0);
        source.extend_from_slice(&out);
    };

    append(digest(item));
    if rounds == 1 {
        return source;
    }

    let mut prefixed = Vec::with_capacity(item.len() + 1);
    prefixed.push(0);
    prefixed.extend_from_slice(item);
    for counter in 0..rounds - 1 {
        prefixed[0] = counter as u8;
        append(digest(&prefixed));
    }
    source
}
