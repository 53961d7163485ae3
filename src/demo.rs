// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Running every strategy on the same sequence.

use crate::generator::SequenceGenerator;
use crate::macros::log_debug;
use crate::strategy::{Report, Strategy, Summand};
use crate::workers::{CpuPinningPolicy, ThreadCount, WorkerConfig};
use std::num::NonZeroUsize;
use std::time::Instant;

/// Parameters of a demonstration run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Demo {
    /// Number of items in the generated sequence.
    pub len: usize,
    /// Inclusive lower bound of the generated items.
    pub min: i32,
    /// Exclusive upper bound of the generated items.
    pub max: i32,
    /// How the parallel strategies split their work.
    pub workers: WorkerConfig,
}

impl Demo {
    /// Number of items summed by the default demonstration.
    pub const LEN: usize = 50_000_000;
    /// Bounds of the items summed by the default demonstration.
    pub const BOUNDS: (i32, i32) = (0, 10);
    /// Number of workers used by the default demonstration.
    pub const NUM_THREADS: NonZeroUsize = match NonZeroUsize::new(8) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Generates a single sequence with the given generator, and sums it with
    /// every strategy.
    pub fn run(&self, generator: &mut SequenceGenerator) -> Vec<Report> {
        let input = generator.generate(self.len, self.min, self.max);
        self.run_on(&input)
    }

    /// Sums the given sequence with every strategy, in the order of
    /// [`Strategy::ALL`]. All the parallel strategies split the sequence into
    /// the same blocks.
    pub fn run_on<T: Summand>(&self, input: &[T]) -> Vec<Report> {
        Strategy::ALL
            .into_iter()
            .map(|strategy| {
                let _start = Instant::now();
                let sum = strategy.run(input, &self.workers);
                log_debug!(
                    "{strategy} over {} items took {:?}",
                    input.len(),
                    _start.elapsed()
                );
                Report { strategy, sum }
            })
            .collect()
    }
}

impl Default for Demo {
    fn default() -> Self {
        Self {
            len: Self::LEN,
            min: Self::BOUNDS.0,
            max: Self::BOUNDS.1,
            workers: WorkerConfig {
                num_threads: ThreadCount::Count(Self::NUM_THREADS),
                cpu_pinning: CpuPinningPolicy::IfSupported,
            },
        }
    }
}
