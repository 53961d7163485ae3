// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Internal logging macros. Each of them forwards to the matching [`log`]
//! macro when the corresponding feature is enabled, and expands to an empty
//! block otherwise, so that call sites don't need their own `#[cfg]`.
//!
//! Arguments are not evaluated when logging is disabled. Bindings that are only
//! used in log statements must therefore be prefixed with an underscore.

/// Worker lifecycle: spawning, pinning, signaling, joining.
macro_rules! log_debug {
    ( $($args:tt)* ) => {{
        #[cfg(feature = "log")]
        log::debug!( $($args)* );
    }};
}

/// Conditions that don't prevent a strategy from completing.
macro_rules! log_warn {
    ( $($args:tt)* ) => {{
        #[cfg(feature = "log")]
        log::warn!( $($args)* );
    }};
}

/// Worker failures, right before they are propagated as a panic.
macro_rules! log_error {
    ( $($args:tt)* ) => {{
        #[cfg(feature = "log")]
        log::error!( $($args)* );
    }};
}

/// Per-strategy summaries, only with the `log_parallelism` feature.
macro_rules! log_info {
    ( $($args:tt)* ) => {{
        #[cfg(feature = "log_parallelism")]
        log::info!( $($args)* );
    }};
}

/// Per-block details, only with the `log_parallelism` feature.
macro_rules! log_trace {
    ( $($args:tt)* ) => {{
        #[cfg(feature = "log_parallelism")]
        log::trace!( $($args)* );
    }};
}

pub(crate) use log_debug;
pub(crate) use log_error;
pub(crate) use log_info;
pub(crate) use log_trace;
pub(crate) use log_warn;
