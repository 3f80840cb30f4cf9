//! Given/when/then scenarios with parameter injection.
//!
//! A [`Scenario`] collects conditions (`given`), actions (`when`) and finally
//! an assertion (`then`). Values produced by earlier steps are kept in a
//! [`ParameterStore`] and injected into later steps: a parameter receives the
//! value stored under its name, or failing that a stored value of one of the
//! types it accepts.
//!
//! ```
//! use gwt_scenario::{Scenario, literal, step};
//!
//! Scenario::new()
//!     .given_as("a", literal(10))
//!     .given_as("b", literal(20))
//!     .when_as("sum", step!(|a: i32, b: i32| a + b))
//!     .then(step!(|sum: i32| assert_eq!(sum, 30)))?;
//! # Ok::<_, gwt_scenario::ScenarioError>(())
//! ```
//!
//! Steps built with [`step!`] carry their parameter names; plain closures are
//! injected by type only (see [`IntoStep`]). Suite-wide settings such as the
//! auth provider used by [`Scenario::acting_as`] come from [`SuiteConfig`].

extern crate self as gwt_scenario;

pub use gwt_scenario_macros::{StepOutput, step};

mod auth;
mod config;
mod error;
mod evaluate;
mod expect;
mod fake;
mod registry;
mod resolve;
mod scenario;
mod step;
mod store;
mod test_case;
mod value;

pub use auth::{ActingAs, AuthProvider, AuthProviders};
pub use config::{
    DEFAULT_RESPONSE_KEY, DEFAULT_USER_KEY, ENV_PREFIX, ScenarioConfig, SuiteConfig,
};
pub use error::{BoxError, ScenarioError, ScenarioResult};
pub use evaluate::{Phase, evaluate, run_assertion};
pub use expect::ErrorExpectation;
pub use fake::Fake;
pub use registry::{CallbackRegistry, Entry};
pub use resolve::resolve_arguments;
pub use scenario::{Condition, DeferredMarker, IntoCondition, Literal, Scenario, literal};
pub use step::{Args, IntoStep, ParamSpec, Signature, Step, StepOutput};
pub use store::ParameterStore;
pub use test_case::GivenWhenThen;
pub use value::{Value, ValueType};
