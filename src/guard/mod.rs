//! Request deadline guard
//!
//! Bounds caller-visible latency of a request without cancelling the work
//! behind it.

mod timeout;

pub use timeout::{GuardError, GuardResult, TimeoutGuard};
