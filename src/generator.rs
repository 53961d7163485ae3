// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Random input sequences.

use crate::macros::log_debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of random sequences, owning its random number generator.
///
/// The generator is seeded once, upon creation. Successive calls to
/// [`generate()`](Self::generate) continue the same random stream rather than
/// reseeding it.
pub struct SequenceGenerator {
    rng: ChaCha12Rng,
}

impl SequenceGenerator {
    /// Creates a generator seeded from the current time, so that separate
    /// runs produce different sequences.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        log_debug!("Seeding the sequence generator with {seed}");
        Self::from_seed(seed)
    }

    /// Creates a generator with a fixed seed, for reproducible sequences.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Creates a vector of `len` integers, each drawn uniformly from
    /// `min..max`.
    ///
    /// Panics if `min >= max`.
    ///
    /// ```
    /// # use parasum::SequenceGenerator;
    /// let mut generator = SequenceGenerator::from_seed(42);
    /// let sequence = generator.generate(1_000, 0, 10);
    /// assert_eq!(sequence.len(), 1_000);
    /// assert!(sequence.iter().all(|x| (0..10).contains(x)));
    /// ```
    pub fn generate(&mut self, len: usize, min: i32, max: i32) -> Vec<i32> {
        assert!(
            min < max,
            "cannot generate values in the empty range {min}..{max}"
        );
        (0..len).map(|_| self.rng.random_range(min..max)).collect()
    }
}
