//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The only port is the clock, and a hand-written `ManualClock` is all the
//! tests need to control the timeline.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
