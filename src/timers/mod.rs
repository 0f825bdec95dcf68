//! Hierarchical wall-clock timers for profiling polish attempts.

mod timers;
pub use timers::*;

cfg_if::cfg_if! {
    if #[cfg(target_family = "wasm")] {
        pub(crate) use web_time::{Duration, Instant};
    } else {
        pub(crate) use std::time::{Duration, Instant};
    }
}
