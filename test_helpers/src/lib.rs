//! Test helpers shared across crates.
//!
//! This crate provides a shared call log for asserting step order, an
//! invocation counter, and a `figment::Jail` wrapper for configuration tests.

pub mod call_log;
pub mod counter;
pub mod jail;

pub use call_log::CallLog;
pub use counter::Counter;
pub use jail::with_env;
