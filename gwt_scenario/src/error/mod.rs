//! Error types produced while building and evaluating scenarios.

mod constructors;
mod types;

pub use types::{BoxError, ScenarioError, ScenarioResult};
