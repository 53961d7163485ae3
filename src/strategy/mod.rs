// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The summation strategies: a serial baseline and four ways to share the
//! work among threads.

mod atomic;
mod channel;
mod locked;
mod serial;
mod unsynchronized;

use crate::workers::WorkerConfig;
pub use atomic::atomic_sum;
pub use channel::channel_sum;
pub use locked::locked_sum;
pub use serial::serial_sum;
use std::fmt;
pub use unsynchronized::unsynchronized_sum;

/// Items that the strategies can sum: they are read concurrently by the
/// workers and widened to a 64-bit accumulator.
pub trait Summand: Copy + Into<i64> + Sync {
    /// Converts this item to the accumulator type.
    #[inline(always)]
    fn widen(self) -> i64 {
        self.into()
    }
}

impl<T: Copy + Into<i64> + Sync> Summand for T {}

/// A way to compute the sum of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Single-threaded baseline, see [`serial_sum()`].
    Serial,
    /// Racy shared accumulator, see [`unsynchronized_sum()`].
    Unsynchronized,
    /// Mutex-protected shared accumulator, see [`locked_sum()`].
    LockProtected,
    /// Atomic shared accumulator, see [`atomic_sum()`].
    Atomic,
    /// Partial sums sent over a channel, see [`channel_sum()`].
    ChannelCollected,
}

impl Strategy {
    /// All the strategies, in reporting order.
    pub const ALL: [Strategy; 5] = [
        Strategy::Serial,
        Strategy::Unsynchronized,
        Strategy::LockProtected,
        Strategy::Atomic,
        Strategy::ChannelCollected,
    ];

    /// Name under which this strategy's result is reported.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Serial => "serialSum",
            Strategy::Unsynchronized => "raceConditionSum",
            Strategy::LockProtected => "mutexSum",
            Strategy::Atomic => "atomicSum",
            Strategy::ChannelCollected => "channelSum",
        }
    }

    /// Whether this strategy always returns the exact sum.
    pub fn is_exact(self) -> bool {
        !matches!(self, Strategy::Unsynchronized)
    }

    /// Sums the input with this strategy. The serial strategy ignores the
    /// worker configuration.
    pub fn run<T: Summand>(self, input: &[T], config: &WorkerConfig) -> i64 {
        match self {
            Strategy::Serial => serial_sum(input),
            Strategy::Unsynchronized => unsynchronized_sum(input, config),
            Strategy::LockProtected => locked_sum(input, config),
            Strategy::Atomic => atomic_sum(input, config),
            Strategy::ChannelCollected => channel_sum(input, config),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result of running one strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    /// Strategy that computed the sum.
    pub strategy: Strategy,
    /// Sum that it computed.
    pub sum: i64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.strategy, self.sum)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::SequenceGenerator;

    /// Item that panics when converted to an integer if it is zero.
    #[derive(Clone, Copy)]
    struct PanicsOnZero(u32);

    impl From<PanicsOnZero> for i64 {
        fn from(x: PanicsOnZero) -> i64 {
            if x.0 == 0 {
                panic!("arithmetic panic");
            }
            x.0.into()
        }
    }

    fn threads(num_threads: usize) -> WorkerConfig {
        WorkerConfig::with_threads(num_threads)
    }

    macro_rules! expand_tests {
        ( $strategy:expr, ) => {};
        ( $strategy:expr, $case:ident, $( $others:tt )* ) => {
            #[test]
            fn $case() {
                $crate::strategy::test::$case($strategy);
            }

            expand_tests!($strategy, $($others)*);
        };
        ( $strategy:expr, $case:ident => fail($msg:expr), $( $others:tt )* ) => {
            #[test]
            #[should_panic(expected = $msg)]
            fn $case() {
                $crate::strategy::test::$case($strategy);
            }

            expand_tests!($strategy, $($others)*);
        };
    }

    macro_rules! strategy_tests {
        ( $mod:ident, $strategy:expr, $( $tests:tt )* ) => {
            mod $mod {
                use super::*;

                expand_tests!($strategy, $($tests)*);
            }
        };
    }

    macro_rules! exact_parallel_tests {
        ( $mod:ident, $strategy:expr ) => {
            strategy_tests!(
                $mod,
                $strategy,
                test_sum_integers,
                test_sum_small_scenario,
                test_sum_twice,
                test_sum_random,
                test_sum_uneven_blocks,
                test_sum_more_threads_than_items,
                test_sum_no_overflow,
                test_single_thread,
                test_empty,
                test_one_panic => fail("A worker thread panicked!"),
                test_many_panics => fail("A worker thread panicked!"),
            );
        };
    }

    exact_parallel_tests!(locked, Strategy::LockProtected);
    exact_parallel_tests!(atomic, Strategy::Atomic);
    exact_parallel_tests!(channel, Strategy::ChannelCollected);

    strategy_tests!(
        unsynchronized,
        Strategy::Unsynchronized,
        test_single_thread,
        test_empty,
        test_one_panic => fail("A worker thread panicked!"),
        test_many_panics => fail("A worker thread panicked!"),
    );

    fn test_sum_integers(strategy: Strategy) {
        let input = (0..=10_000).collect::<Vec<u32>>();
        let sum = strategy.run(&input, &threads(4));
        assert_eq!(sum, 5_000 * 10_001);
    }

    fn test_sum_small_scenario(strategy: Strategy) {
        let input = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(strategy.run(&input, &threads(4)), 36);
    }

    fn test_sum_twice(strategy: Strategy) {
        let input = SequenceGenerator::from_seed(42).generate(100_000, 0, 10);
        let config = threads(8);
        // The same input can be summed multiple times, with a fresh accumulator
        // each time.
        let sum1 = strategy.run(&input, &config);
        let sum2 = strategy.run(&input, &config);
        assert_eq!(sum1, serial_sum(&input));
        assert_eq!(sum2, sum1);
    }

    fn test_sum_random(strategy: Strategy) {
        let mut generator = SequenceGenerator::from_seed(42);
        for len in [1, 10, 1_000, 123_457] {
            let input = generator.generate(len, -100, 100);
            let expected = serial_sum(&input);
            for num_threads in 1..=9 {
                assert_eq!(strategy.run(&input, &threads(num_threads)), expected);
            }
        }
    }

    fn test_sum_uneven_blocks(strategy: Strategy) {
        // 8 workers, the last of which gets 7 + 7 items.
        let input = (1..=63).collect::<Vec<u8>>();
        assert_eq!(strategy.run(&input, &threads(8)), 63 * 64 / 2);
    }

    fn test_sum_more_threads_than_items(strategy: Strategy) {
        let input = [5i16, 6, 7];
        assert_eq!(strategy.run(&input, &threads(16)), 18);
    }

    fn test_sum_no_overflow(strategy: Strategy) {
        let input = vec![u32::MAX; 64];
        assert_eq!(strategy.run(&input, &threads(8)), 64 * u32::MAX as i64);
    }

    fn test_single_thread(strategy: Strategy) {
        let input = SequenceGenerator::from_seed(7).generate(50_000, 0, 10);
        assert_eq!(strategy.run(&input, &threads(1)), serial_sum(&input));
    }

    fn test_empty(strategy: Strategy) {
        for num_threads in [1, 2, 8] {
            assert_eq!(strategy.run::<i32>(&[], &threads(num_threads)), 0);
        }
    }

    fn test_one_panic(strategy: Strategy) {
        let input = (0..=10_000).map(PanicsOnZero).collect::<Vec<_>>();
        strategy.run(&input, &threads(4));
    }

    fn test_many_panics(strategy: Strategy) {
        let input = (0..=10_000)
            .map(|x| PanicsOnZero(x % 2))
            .collect::<Vec<_>>();
        strategy.run(&input, &threads(4));
    }

    #[test]
    fn test_serial_small_scenario() {
        assert_eq!(Strategy::Serial.run(&[1, 2, 3, 4, 5, 6, 7, 8], &threads(4)), 36);
    }

    #[test]
    fn test_names() {
        let names = Strategy::ALL.map(Strategy::name);
        assert_eq!(
            names,
            [
                "serialSum",
                "raceConditionSum",
                "mutexSum",
                "atomicSum",
                "channelSum"
            ]
        );
    }

    #[test]
    fn test_is_exact() {
        let exact = Strategy::ALL.into_iter().filter(|s| s.is_exact()).count();
        assert_eq!(exact, 4);
        assert!(!Strategy::Unsynchronized.is_exact());
    }

    #[test]
    fn test_report_display() {
        let report = Report {
            strategy: Strategy::Atomic,
            sum: 225_000_123,
        };
        assert_eq!(report.to_string(), "atomicSum: 225000123");
    }
}
