// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::serial::local_sum;
use super::Summand;
use crate::macros::{log_info, log_trace};
use crate::workers::{join_blocks, WorkerConfig};
use std::sync::Mutex;

/// Sums the input in parallel, with every worker computing a local partial
/// sum over its block and then adding it to a shared accumulator under a
/// [`Mutex`].
///
/// The lock is acquired exactly once per worker.
pub fn locked_sum<T: Summand>(input: &[T], config: &WorkerConfig) -> i64 {
    let accumulator = Mutex::new(0i64);
    join_blocks(config, input, |_id, block| {
        let partial = local_sum(block);
        log_trace!("[worker {_id}] Partial sum: {partial}");
        *accumulator.lock().unwrap() += partial;
    });

    let sum = accumulator.into_inner().unwrap();
    log_info!("Lock-protected sum over {} items: {sum}", input.len());
    sum
}
