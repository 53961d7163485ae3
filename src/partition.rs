// Copyright 2024-2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Splitting a sequence into one contiguous block per worker.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Splits `0..num_elements` into `num_blocks` contiguous ranges.
///
/// Every block but the last one contains exactly `num_elements / num_blocks`
/// items, and the last block additionally absorbs the remainder. The blocks
/// are returned in order, so that they cover `0..num_elements` once and only
/// once.
///
/// When there are fewer elements than blocks, the leading blocks are empty
/// and the last block contains everything.
///
/// ```
/// # use parasum::partition;
/// # use std::num::NonZeroUsize;
/// let blocks = partition(10, NonZeroUsize::try_from(4).unwrap());
/// assert_eq!(blocks, [0..2, 2..4, 4..6, 6..10]);
/// ```
pub fn partition(num_elements: usize, num_blocks: NonZeroUsize) -> Vec<Range<usize>> {
    let num_blocks = num_blocks.get();
    let block_size = num_elements / num_blocks;
    (0..num_blocks)
        .map(|id| {
            let start = id * block_size;
            let end = if id == num_blocks - 1 {
                num_elements
            } else {
                start + block_size
            };
            start..end
        })
        .collect()
}

/// Splits the given slice into the sub-slices described by [`partition()`].
pub fn blocks<T>(input: &[T], num_blocks: NonZeroUsize) -> impl Iterator<Item = &[T]> + '_ {
    partition(input.len(), num_blocks)
        .into_iter()
        .map(move |range| &input[range])
}
