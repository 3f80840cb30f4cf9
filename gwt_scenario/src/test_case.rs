//! Entry points for test cases that start scenarios from `self`.

use std::any::Any;
use std::error::Error as StdError;

use crate::auth::ActingAs;
use crate::config::ScenarioConfig;
use crate::error::ScenarioResult;
use crate::fake::Fake;
use crate::scenario::{IntoCondition, Scenario};
use crate::step::IntoStep;

/// Starts a fresh [`Scenario`] from a test case.
///
/// Every provided method builds a new scenario with
/// [`GivenWhenThen::scenario_config`] and forwards to the builder method of the
/// same name. Implementors usually override only `scenario_config`.
///
/// # Examples
///
/// ```
/// use gwt_scenario::{GivenWhenThen, literal, step};
///
/// struct Checkout;
///
/// impl GivenWhenThen for Checkout {}
///
/// Checkout
///     .given_as("price", literal(12_u32))
///     .when(step!(|price: u32| price * 2))
///     .then(step!(|response: u32| assert_eq!(response, 24)))?;
/// # Ok::<_, gwt_scenario::ScenarioError>(())
/// ```
pub trait GivenWhenThen {
    /// Configuration for scenarios started from this test case.
    fn scenario_config(&self) -> ScenarioConfig {
        ScenarioConfig::default()
    }

    /// A fresh scenario carrying [`GivenWhenThen::scenario_config`].
    fn scenario(&self) -> Scenario {
        Scenario::with_config(self.scenario_config())
    }

    /// See [`Scenario::fake`].
    fn fake<F: Fake>(&self) -> Scenario {
        self.scenario().fake::<F>()
    }

    /// See [`Scenario::acting_as`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Scenario::acting_as`].
    fn acting_as<P: Any>(&self, principal: P) -> ScenarioResult<Scenario> {
        self.scenario().acting_as(principal)
    }

    /// See [`Scenario::acting_as_with`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Scenario::acting_as_with`].
    fn acting_as_with<P: Any>(&self, principal: P, options: ActingAs) -> ScenarioResult<Scenario> {
        self.scenario().acting_as_with(principal, options)
    }

    /// See [`Scenario::throws`].
    fn throws<E: StdError + 'static>(&self) -> Scenario {
        self.scenario().throws::<E>()
    }

    /// See [`Scenario::throws_with_message`].
    fn throws_with_message<E: StdError + 'static>(&self, message: impl Into<String>) -> Scenario {
        self.scenario().throws_with_message::<E>(message)
    }

    /// See [`Scenario::given`].
    fn given<M>(&self, condition: impl IntoCondition<M>) -> Scenario {
        self.scenario().given(condition)
    }

    /// See [`Scenario::given_as`].
    fn given_as<M>(&self, key: &str, condition: impl IntoCondition<M>) -> Scenario {
        self.scenario().given_as(key, condition)
    }

    /// See [`Scenario::when`].
    fn when<M>(&self, action: impl IntoStep<M>) -> Scenario {
        self.scenario().when(action)
    }

    /// See [`Scenario::when_as`].
    fn when_as<M>(&self, key: &str, action: impl IntoStep<M>) -> Scenario {
        self.scenario().when_as(key, action)
    }

    /// See [`Scenario::then`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Scenario::then`].
    fn then<M>(&self, assertion: impl IntoStep<M>) -> ScenarioResult<Scenario> {
        self.scenario().then(assertion)
    }
}
