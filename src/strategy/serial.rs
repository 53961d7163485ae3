// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::Summand;

/// Sums the input on the calling thread. This is the reference result that the
/// correct parallel strategies must match.
///
/// ```
/// # use parasum::serial_sum;
/// assert_eq!(serial_sum(&[1, 2, 3, 4, 5, 6, 7, 8]), 36);
/// ```
pub fn serial_sum<T: Summand>(input: &[T]) -> i64 {
    local_sum(input)
}

/// Sums a block into a 64-bit accumulator, without touching any shared state.
#[inline]
pub(super) fn local_sum<T: Summand>(block: &[T]) -> i64 {
    block.iter().map(|&x| x.widen()).sum()
}
