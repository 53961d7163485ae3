// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::Summand;
use crate::macros::{log_info, log_trace};
use crate::sync::RacyCell;
use crate::workers::{join_blocks, WorkerConfig};

/// Sums the input in parallel, with every worker adding each of its items to
/// a shared accumulator **without any synchronization**.
///
/// Each addition is a separate read and write of the accumulator, so when two
/// workers interleave, one of the updates is overwritten. The result is
/// therefore non-deterministic and generally smaller than the true sum (for
/// non-negative inputs, it is never larger). This strategy exists to
/// demonstrate a data race and must not be used to compute anything.
///
/// The accumulator is a [`RacyCell`], whose loads and stores are individually
/// atomic: updates get lost, but no access ever observes a torn value.
pub fn unsynchronized_sum<T: Summand>(input: &[T], config: &WorkerConfig) -> i64 {
    let accumulator = RacyCell::new(0);
    join_blocks(config, input, |_id, block| {
        for &x in block {
            let current = accumulator.load();
            accumulator.store(current + x.widen());
        }
        log_trace!("[worker {_id}] Done racing over {} items", block.len());
    });

    let sum = accumulator.into_inner();
    log_info!("Unsynchronized sum over {} items: {sum}", input.len());
    sum
}
