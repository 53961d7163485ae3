// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![doc = include_str!("../README.md")]
#![forbid(missing_docs, unsafe_code)]

mod demo;
mod generator;
mod macros;
mod partition;
mod strategy;
mod sync;
mod workers;

pub use demo::Demo;
pub use generator::SequenceGenerator;
pub use partition::{blocks, partition};
pub use strategy::{
    atomic_sum, channel_sum, locked_sum, serial_sum, unsynchronized_sum, Report, Strategy,
    Summand,
};
pub use sync::RacyCell;
pub use workers::{CpuPinningPolicy, ThreadCount, WorkerConfig};
