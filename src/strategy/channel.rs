// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::serial::local_sum;
use super::Summand;
use crate::macros::{log_debug, log_error, log_info, log_trace};
use crate::partition::partition;
use crate::workers::{join_workers, spawn_worker, WorkerConfig};
use std::sync::mpsc;

/// Sums the input in parallel, with every worker computing a local partial
/// sum over its block and sending it to the calling thread over a bounded
/// channel.
///
/// The channel has room for one message per worker, so sending never blocks.
/// The calling thread receives exactly one message per worker, which also
/// tells it that the worker is done: no separate barrier is involved.
pub fn channel_sum<T: Summand>(input: &[T], config: &WorkerConfig) -> i64 {
    let ranges = partition(input.len(), config.num_blocks());
    let num_workers = ranges.len();
    let (sender, receiver) = mpsc::sync_channel::<i64>(num_workers);

    std::thread::scope(|scope| {
        let handles = ranges
            .into_iter()
            .enumerate()
            .map(|(id, range)| {
                let sender = sender.clone();
                let block = &input[range];
                spawn_worker(scope, id, config.cpu_pinning, move || {
                    let partial = local_sum(block);
                    log_trace!("[worker {id}] Sending partial sum: {partial}");
                    // Only fails if the collector already gave up.
                    if sender.send(partial).is_err() {
                        log_error!("[worker {id}] The collector hung up");
                    }
                })
            })
            .collect::<Vec<_>>();
        // Only the workers hold a sender now: if they all exit before sending
        // their partial sum, receiving fails instead of blocking forever.
        drop(sender);
        log_debug!("[main thread] Spawned {num_workers} workers, collecting partial sums");

        let mut sum = 0;
        for _i in 0..num_workers {
            match receiver.recv() {
                Ok(partial) => sum += partial,
                Err(_) => {
                    log_error!(
                        "[main thread] Received only {_i} of {num_workers} partial sums"
                    );
                    panic!("A worker thread panicked!");
                }
            }
        }
        drop(receiver);
        log_debug!("[main thread] Collected all partial sums, channel closed");

        join_workers(handles);
        log_info!("Channel-collected sum over {} items: {sum}", input.len());
        sum
    })
}
