// Copyright 2024-2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Spawning one scoped worker thread per block of the input.

use crate::macros::{log_debug, log_error, log_trace, log_warn};
use crate::partition::partition;
use crate::sync::CompletionBarrier;
// Platforms that support `libc::sched_setaffinity()`.
#[cfg(all(
    not(miri),
    any(
        target_os = "android",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "linux"
    )
))]
use nix::{
    sched::{sched_setaffinity, CpuSet},
    unistd::Pid,
};
use std::num::NonZeroUsize;
use std::thread::{Scope, ScopedJoinHandle};

/// Number of worker threads to spawn for each strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThreadCount {
    /// Spawn the number of threads returned by
    /// [`std::thread::available_parallelism()`].
    AvailableParallelism,
    /// Spawn the given number of threads.
    Count(NonZeroUsize),
}

impl ThreadCount {
    /// Resolves the number of threads to spawn.
    pub fn count(self) -> NonZeroUsize {
        match self {
            ThreadCount::AvailableParallelism => std::thread::available_parallelism()
                .unwrap_or_else(|_e| {
                    log_warn!("Getting the available parallelism failed, using 1 thread: {_e}");
                    NonZeroUsize::MIN
                }),
            ThreadCount::Count(count) => count,
        }
    }
}

impl TryFrom<usize> for ThreadCount {
    type Error = <NonZeroUsize as TryFrom<usize>>::Error;

    fn try_from(thread_count: usize) -> Result<Self, Self::Error> {
        let count = NonZeroUsize::try_from(thread_count)?;
        Ok(ThreadCount::Count(count))
    }
}

/// Policy to pin worker threads to CPUs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuPinningPolicy {
    /// Don't pin worker threads to CPUs.
    No,
    /// Pin worker `i` to CPU `i`, if CPU pinning is supported and implemented
    /// on this platform. Failures are logged and otherwise ignored.
    IfSupported,
    /// Pin worker `i` to CPU `i`. If CPU pinning isn't supported on this
    /// platform (or not implemented), or if it fails, running a strategy will
    /// panic.
    Always,
}

/// How the parallel strategies distribute their work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Number of workers, which is also the number of blocks the input is
    /// split into.
    pub num_threads: ThreadCount,
    /// Policy to pin worker threads to CPUs.
    pub cpu_pinning: CpuPinningPolicy,
}

impl WorkerConfig {
    /// Configuration with the given number of unpinned workers.
    ///
    /// Panics if `num_threads` is zero.
    pub fn with_threads(num_threads: usize) -> Self {
        let num_threads = ThreadCount::try_from(num_threads)
            .unwrap_or_else(|_| panic!("cannot run a strategy with 0 worker threads"));
        Self {
            num_threads,
            cpu_pinning: CpuPinningPolicy::No,
        }
    }

    /// Number of blocks (and workers) a strategy will use.
    pub fn num_blocks(&self) -> NonZeroUsize {
        self.num_threads.count()
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            num_threads: ThreadCount::AvailableParallelism,
            cpu_pinning: CpuPinningPolicy::No,
        }
    }
}

/// Runs `work` on each block of `input`, on one fresh worker thread per block,
/// and returns once every worker has signaled completion on a
/// [`CompletionBarrier`].
///
/// Panics if any worker panicked.
pub(crate) fn join_blocks<T: Sync>(
    config: &WorkerConfig,
    input: &[T],
    work: impl Fn(usize, &[T]) + Sync,
) {
    let ranges = partition(input.len(), config.num_blocks());
    let barrier = CompletionBarrier::new(ranges.len());
    let work = &work;

    std::thread::scope(|scope| {
        let handles = ranges
            .into_iter()
            .enumerate()
            .map(|(id, range)| {
                // Created before spawning, so that completion is signaled even if the
                // worker panics while being pinned.
                let notifier = barrier.notifier(id);
                let block = &input[range];
                spawn_worker(scope, id, config.cpu_pinning, move || {
                    let _notifier = notifier;
                    log_trace!("[worker {id}] Processing {} items", block.len());
                    work(id, block);
                })
            })
            .collect::<Vec<_>>();
        log_debug!("[main thread] Spawned {} workers", handles.len());

        barrier.wait();
        join_workers(handles);
    });
}

/// Spawns worker `id` in the given scope, pinning it to a CPU according to the
/// given policy before running `f`.
pub(crate) fn spawn_worker<'scope, R: Send + 'scope>(
    scope: &'scope Scope<'scope, '_>,
    id: usize,
    cpu_pinning: CpuPinningPolicy,
    f: impl FnOnce() -> R + Send + 'scope,
) -> ScopedJoinHandle<'scope, R> {
    check_pinning_support(cpu_pinning);
    scope.spawn(move || {
        pin_to_cpu(id, cpu_pinning);
        f()
    })
}

/// Joins the given workers, in order.
///
/// Panics if any worker panicked.
pub(crate) fn join_workers<R>(handles: Vec<ScopedJoinHandle<'_, R>>) -> Vec<R> {
    log_debug!("[main thread] Joining workers...");
    let outputs = handles
        .into_iter()
        .enumerate()
        .map(|(_id, handle)| match handle.join() {
            Ok(output) => output,
            Err(_) => {
                log_error!("[main thread] Worker {_id} panicked");
                panic!("A worker thread panicked!");
            }
        })
        .collect();
    log_debug!("[main thread] Joined workers.");
    outputs
}

/// Panics upfront if the policy requires CPU pinning on a platform that
/// doesn't support it.
fn check_pinning_support(cpu_pinning: CpuPinningPolicy) {
    #[cfg(any(
        miri,
        not(any(
            target_os = "android",
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "linux"
        ))
    ))]
    match cpu_pinning {
        CpuPinningPolicy::No => (),
        CpuPinningPolicy::IfSupported => {
            log_warn!("Pinning threads to CPUs is not implemented on this platform.")
        }
        CpuPinningPolicy::Always => {
            panic!("Pinning threads to CPUs is not implemented on this platform.")
        }
    }
    #[cfg(all(
        not(miri),
        any(
            target_os = "android",
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "linux"
        )
    ))]
    let _ = cpu_pinning;
}

/// Pins the calling thread to CPU `id`, according to the given policy.
fn pin_to_cpu(id: usize, cpu_pinning: CpuPinningPolicy) {
    #[cfg(all(
        not(miri),
        any(
            target_os = "android",
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "linux"
        )
    ))]
    {
        let pin = || -> nix::Result<()> {
            let mut cpu_set = CpuSet::new();
            cpu_set.set(id)?;
            sched_setaffinity(Pid::from_raw(0), &cpu_set)
        };
        match cpu_pinning {
            CpuPinningPolicy::No => (),
            CpuPinningPolicy::IfSupported => match pin() {
                Ok(()) => log_debug!("Pinned worker #{id} to CPU #{id}"),
                Err(_e) => log_warn!("Failed to set CPU affinity for worker #{id}: {_e}"),
            },
            CpuPinningPolicy::Always => match pin() {
                Ok(()) => log_debug!("Pinned worker #{id} to CPU #{id}"),
                Err(e) => panic!("Failed to set CPU affinity for worker #{id}: {e}"),
            },
        }
    }
    #[cfg(any(
        miri,
        not(any(
            target_os = "android",
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "linux"
        ))
    ))]
    let _ = (id, cpu_pinning);
}
