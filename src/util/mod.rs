//! Utility modules: injectable clock and sleep.

pub mod clock;

pub use clock::{Clock, Sleeper, SystemClock, TokioSleeper};
