// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sums 50 million random digits with every strategy and prints one line per
//! strategy.

use parasum::{Demo, SequenceGenerator};

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let mut generator = SequenceGenerator::from_time();
    for report in Demo::default().run(&mut generator) {
        println!("{report}");
    }
}
