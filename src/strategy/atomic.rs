// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::Summand;
use crate::macros::{log_info, log_trace};
use crate::workers::{join_blocks, WorkerConfig};
use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicI64, Ordering};

/// Sums the input in parallel, with every worker adding each of its items to
/// a shared accumulator with an atomic `fetch_add`.
///
/// This puts maximal contention on the accumulator (one atomic operation per
/// item) but the result is exact.
pub fn atomic_sum<T: Summand>(input: &[T], config: &WorkerConfig) -> i64 {
    let accumulator = CachePadded::new(AtomicI64::new(0));
    join_blocks(config, input, |_id, block| {
        for &x in block {
            // Visibility to the main thread is provided by the completion barrier.
            accumulator.fetch_add(x.widen(), Ordering::Relaxed);
        }
        log_trace!("[worker {_id}] Added {} items", block.len());
    });

    let sum = CachePadded::into_inner(accumulator).into_inner();
    log_info!("Atomic sum over {} items: {sum}", input.len());
    sum
}
