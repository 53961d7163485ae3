// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

fn main() {
    divan::main();
}

const NUM_THREADS: &[usize] = &[1, 2, 4, 8];
const LENGTHS: &[usize] = &[10_000, 100_000, 1_000_000];

/// Random digits, the same for every benchmark of a given length.
fn digits(len: usize) -> Vec<i32> {
    ::parasum::SequenceGenerator::from_seed(42).generate(len, 0, 10)
}

/// Baseline benchmarks using serial iterators (without any multi-threading
/// involved).
mod serial {
    use super::{digits, LENGTHS};
    use divan::counter::BytesCount;
    use divan::{black_box, Bencher};

    #[divan::bench(args = LENGTHS)]
    fn sum(bencher: Bencher, len: usize) {
        let input = digits(len);
        let input_slice = input.as_slice();
        bencher
            .counter(BytesCount::of_many::<i32>(len))
            .bench_local(|| {
                black_box(input_slice)
                    .iter()
                    .map(|&x| i64::from(x))
                    .sum::<i64>()
            })
    }
}

/// Benchmarks using Rayon.
mod rayon {
    use super::{digits, LENGTHS, NUM_THREADS};
    use divan::counter::BytesCount;
    use divan::{black_box, Bencher};
    use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

    #[divan::bench(consts = NUM_THREADS, args = LENGTHS)]
    fn sum_rayon<const NUM_THREADS: usize>(bencher: Bencher, len: usize) {
        let input = digits(len);
        let input_slice = input.as_slice();
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(NUM_THREADS)
            .build()
            .unwrap();
        // Ideally we'd prefer to run bench_local() inside the Rayon thread pool, but
        // that doesn't work because divan::Bencher isn't Send (and bench_local()
        // consumes it).
        bencher
            .counter(BytesCount::of_many::<i32>(len))
            .bench_local(|| {
                thread_pool.install(|| {
                    black_box(input_slice)
                        .par_iter()
                        .map(|&x| i64::from(x))
                        .sum::<i64>()
                })
            });
    }
}

/// Benchmarks of the strategies in this crate.
mod parasum {
    use super::{digits, LENGTHS, NUM_THREADS};
    use divan::counter::BytesCount;
    use divan::{black_box, Bencher};
    use parasum::{CpuPinningPolicy, Strategy, ThreadCount, WorkerConfig};

    #[divan::bench(consts = NUM_THREADS, args = LENGTHS)]
    fn sum_unsynchronized<const NUM_THREADS: usize>(bencher: Bencher, len: usize) {
        sum_impl::<NUM_THREADS>(bencher, len, Strategy::Unsynchronized)
    }

    #[divan::bench(consts = NUM_THREADS, args = LENGTHS)]
    fn sum_locked<const NUM_THREADS: usize>(bencher: Bencher, len: usize) {
        sum_impl::<NUM_THREADS>(bencher, len, Strategy::LockProtected)
    }

    #[divan::bench(consts = NUM_THREADS, args = LENGTHS)]
    fn sum_atomic<const NUM_THREADS: usize>(bencher: Bencher, len: usize) {
        sum_impl::<NUM_THREADS>(bencher, len, Strategy::Atomic)
    }

    #[divan::bench(consts = NUM_THREADS, args = LENGTHS)]
    fn sum_channel<const NUM_THREADS: usize>(bencher: Bencher, len: usize) {
        sum_impl::<NUM_THREADS>(bencher, len, Strategy::ChannelCollected)
    }

    fn sum_impl<const NUM_THREADS: usize>(bencher: Bencher, len: usize, strategy: Strategy) {
        let input = digits(len);
        let input_slice = input.as_slice();
        let config = WorkerConfig {
            num_threads: ThreadCount::try_from(NUM_THREADS).unwrap(),
            cpu_pinning: CpuPinningPolicy::IfSupported,
        };

        bencher
            .counter(BytesCount::of_many::<i32>(len))
            .bench_local(|| strategy.run(black_box(input_slice), &config));
    }
}
