// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Synchronization primitives shared by the parallel strategies.

use crate::macros::{log_debug, log_error};
use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// An ergonomic wrapper around a [`Mutex`]-[`Condvar`] pair.
struct Status<T> {
    mutex: Mutex<T>,
    condvar: Condvar,
}

impl<T> Status<T> {
    /// Creates a new status initialized with the given value.
    fn new(t: T) -> Self {
        Self {
            mutex: Mutex::new(t),
            condvar: Condvar::new(),
        }
    }

    /// Applies the given update to the status, and notifies all waiting
    /// threads if the update returns true.
    ///
    /// Fails if the [`Mutex`] is poisoned.
    fn try_update(
        &self,
        update: impl FnOnce(&mut T) -> bool,
    ) -> Result<(), PoisonError<MutexGuard<'_, T>>> {
        let mut guard = self.mutex.lock()?;
        if update(&mut guard) {
            self.condvar.notify_all();
        }
        Ok(())
    }

    /// Waits until the predicate is false on this status.
    ///
    /// This returns a [`MutexGuard`], allowing to further inspect the status.
    fn wait_while(&self, predicate: impl FnMut(&mut T) -> bool) -> MutexGuard<'_, T> {
        self.condvar
            .wait_while(self.mutex.lock().unwrap(), predicate)
            .unwrap()
    }
}

/// Progress of the workers attached to a [`CompletionBarrier`].
struct Progress {
    /// Number of workers that haven't signaled completion yet.
    remaining: usize,
    /// Number of workers that panicked before signaling completion.
    panicked: usize,
}

/// A counting join barrier: the orchestrating thread blocks in
/// [`wait()`](Self::wait) until each of the `num_workers` workers has dropped
/// its [`Notifier`].
pub struct CompletionBarrier {
    progress: Status<Progress>,
}

impl CompletionBarrier {
    /// Creates a barrier expecting the given number of workers.
    pub fn new(num_workers: usize) -> Self {
        Self {
            progress: Status::new(Progress {
                remaining: num_workers,
                panicked: 0,
            }),
        }
    }

    /// Returns the object with which worker `id` signals its completion. The
    /// signal is sent when the notifier is dropped, including when the worker
    /// unwinds from a panic.
    pub fn notifier(&self, _id: usize) -> Notifier<'_> {
        Notifier {
            #[cfg(feature = "log")]
            id: _id,
            barrier: self,
        }
    }

    /// Blocks until all the workers have signaled completion.
    ///
    /// Panics if any worker panicked.
    pub fn wait(&self) {
        log_debug!("[main thread] Waiting for all workers to signal completion.");
        let guard = self.progress.wait_while(|progress| progress.remaining != 0);
        let panicked = guard.panicked;
        drop(guard);

        if panicked != 0 {
            log_error!("[main thread] {panicked} worker thread(s) panicked!");
            panic!("A worker thread panicked!");
        }
        log_debug!("[main thread] All workers have signaled completion.");
    }
}

/// Object whose destructor signals to a [`CompletionBarrier`] that a worker
/// has finished (or has panicked).
pub struct Notifier<'a> {
    /// Worker index.
    #[cfg(feature = "log")]
    id: usize,
    /// Barrier to signal.
    barrier: &'a CompletionBarrier,
}

impl Drop for Notifier<'_> {
    fn drop(&mut self) {
        let panicking = std::thread::panicking();
        if panicking {
            log_error!(
                "[worker {}] Detected panic in this worker, notifying the main thread",
                self.id
            );
        }

        let result = self.barrier.progress.try_update(|progress| {
            assert!(progress.remaining > 0);
            progress.remaining -= 1;
            if panicking {
                progress.panicked += 1;
            }
            log_debug!(
                "[worker {}] Signaled completion, {} worker(s) remaining.",
                self.id,
                progress.remaining
            );
            progress.remaining == 0
        });
        if let Err(_e) = result {
            log_error!(
                "[worker {}] Failed to notify the main thread, the mutex was poisoned: {_e:?}",
                self.id
            );
        }
    }
}

/// A shared integer cell that deliberately offers no read-modify-write
/// operation.
///
/// Updating it takes a [`load()`](Self::load) followed by a separate
/// [`store()`](Self::store), and nothing prevents other threads from storing
/// in between. Concurrent updates are therefore lost, but each individual
/// access is a relaxed atomic access so that the race is well-defined.
pub struct RacyCell {
    value: CachePadded<AtomicI64>,
}

impl RacyCell {
    /// Creates a new cell holding the given value.
    pub fn new(value: i64) -> Self {
        Self {
            value: CachePadded::new(AtomicI64::new(value)),
        }
    }

    /// Reads the current value.
    #[inline(always)]
    pub fn load(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Overwrites the current value, regardless of what other threads have
    /// stored since the last [`load()`](Self::load).
    #[inline(always)]
    pub fn store(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed)
    }

    /// Consumes the cell, returning the last stored value.
    pub fn into_inner(self) -> i64 {
        CachePadded::into_inner(self.value).into_inner()
    }
}
