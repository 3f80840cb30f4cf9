//! Fluent given/when/then builder.
//!
//! Builder calls only accumulate state: literal conditions are stored at once,
//! deferred conditions and actions are registered. Nothing runs until
//! [`Scenario::then`], which drains the conditions, then the actions, and
//! finally runs the assertion, injecting stored values into every step.

use std::any::{Any, type_name};
use std::error::Error as StdError;
use std::marker::PhantomData;

use tracing::debug;

use crate::auth::ActingAs;
use crate::config::{ScenarioConfig, ensure_guard};
use crate::error::{ScenarioError, ScenarioResult};
use crate::evaluate::{Phase, evaluate, run_assertion};
use crate::expect::ErrorExpectation;
use crate::fake::Fake;
use crate::registry::CallbackRegistry;
use crate::step::{IntoStep, Step};
use crate::store::ParameterStore;
use crate::value::Value;

/// A condition passed to [`Scenario::given`].
#[derive(Debug)]
pub enum Condition {
    /// A value stored as soon as the condition is given.
    Literal(Value),
    /// A step evaluated when the scenario runs.
    Deferred(Step),
}

/// A plain value given as a condition; see [`literal`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal<T>(T);

/// Wraps `value` so `given` stores it instead of treating it as a step.
///
/// # Examples
///
/// ```
/// use gwt_scenario::{Scenario, literal};
///
/// let scenario = Scenario::new().given_as("limit", literal(10_u32));
/// assert_eq!(scenario.store().get_as::<u32>("limit"), Some(&10));
/// ```
#[must_use]
pub const fn literal<T: Any>(value: T) -> Literal<T> {
    Literal(value)
}

/// Values accepted by [`Scenario::given`].
///
/// Implemented for [`Condition`], for [`Literal`] values and bare [`Value`]s,
/// which are stored immediately, and for everything implementing
/// [`IntoStep`], which is deferred.
pub trait IntoCondition<Marker> {
    /// Converts `self` into a [`Condition`].
    fn into_condition(self) -> Condition;
}

/// Marker selecting the deferred [`IntoCondition`] implementation.
#[derive(Debug)]
pub struct DeferredMarker<M>(PhantomData<M>);

impl IntoCondition<Self> for Condition {
    fn into_condition(self) -> Condition {
        self
    }
}

impl<T: Any> IntoCondition<Self> for Literal<T> {
    fn into_condition(self) -> Condition {
        Condition::Literal(Value::new(self.0))
    }
}

impl IntoCondition<Self> for Value {
    fn into_condition(self) -> Condition {
        Condition::Literal(self)
    }
}

impl<S, M> IntoCondition<DeferredMarker<M>> for S
where
    S: IntoStep<M>,
{
    fn into_condition(self) -> Condition {
        Condition::Deferred(self.into_step())
    }
}

/// A behavioural test scenario.
///
/// # Examples
///
/// ```
/// use gwt_scenario::{Scenario, literal, step};
///
/// Scenario::new()
///     .given_as("a", literal(10))
///     .given_as("b", step!(|| 20))
///     .when_as("sum", step!(|a: i32, b: i32| a + b))
///     .then(step!(|sum: i32| assert_eq!(sum, 30)))?;
/// # Ok::<_, gwt_scenario::ScenarioError>(())
/// ```
#[derive(Debug, Default)]
pub struct Scenario {
    config: ScenarioConfig,
    conditions: CallbackRegistry,
    actions: CallbackRegistry,
    store: ParameterStore,
    expected: Option<ErrorExpectation>,
}

impl Scenario {
    /// Creates a scenario with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scenario carrying `config`.
    #[must_use]
    pub fn with_config(config: ScenarioConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Activates the fake implementation of facade `F` immediately.
    #[must_use]
    pub fn fake<F: Fake>(self) -> Self {
        debug!(facade = type_name::<F>(), "activating fake");
        F::fake();
        self
    }

    /// Authenticates `principal` through the configured auth provider before
    /// the other conditions that follow it run.
    ///
    /// The principal returned by the provider is stored under the configured
    /// user key (`user` by default).
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::AuthProviderMissing`] when the configuration
    /// has no auth provider.
    pub fn acting_as<P: Any>(self, principal: P) -> ScenarioResult<Self> {
        self.acting_as_with(principal, ActingAs::new())
    }

    /// Like [`Scenario::acting_as`], with an explicit key, abilities, or
    /// guard.
    ///
    /// An empty key stores the principal under the key inferred from its
    /// type, as an unkeyed condition would.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::AuthProviderMissing`] when the configuration
    /// has no auth provider and [`ScenarioError::UnknownGuard`] when the
    /// requested guard is not defined.
    pub fn acting_as_with<P: Any>(mut self, principal: P, options: ActingAs) -> ScenarioResult<Self> {
        let provider = self
            .config
            .auth_provider()
            .ok_or(ScenarioError::AuthProviderMissing)?;
        let (requested_key, abilities, requested_guard) = options.into_parts();
        if let Some(guard) = requested_guard.as_deref() {
            ensure_guard(guard, self.config.guards())?;
        }
        let guard = requested_guard.or_else(|| self.config.guard().map(str::to_owned));
        let key = requested_key.unwrap_or_else(|| self.config.user_key().to_owned());
        let stored = Value::new(principal);
        debug!(%key, guard = guard.as_deref(), abilities = abilities.len(), "acting as principal");
        let step = Step::opaque(move |_args| {
            provider
                .acting_as(stored.clone(), &abilities, guard.as_deref())
                .map(Some)
                .map_err(ScenarioError::step)
        });
        self.conditions.add(step, Some(&key));
        Ok(self)
    }

    /// Expects the scenario to fail with an error of type `E`.
    #[must_use]
    pub fn throws<E: StdError + 'static>(mut self) -> Self {
        self.expected = Some(ErrorExpectation::of::<E>());
        self
    }

    /// Expects the scenario to fail with an error of type `E` whose message
    /// contains `message`.
    #[must_use]
    pub fn throws_with_message<E: StdError + 'static>(mut self, message: impl Into<String>) -> Self {
        self.expected = Some(ErrorExpectation::of::<E>().with_message(message));
        self
    }

    /// Adds an unkeyed condition.
    ///
    /// Literal results and deferred results are stored under the key inferred
    /// from their type.
    #[must_use]
    pub fn given<M>(mut self, condition: impl IntoCondition<M>) -> Self {
        self.add_condition(None, condition.into_condition());
        self
    }

    /// Adds a condition whose result is stored under `key`.
    ///
    /// An empty key behaves like [`Scenario::given`].
    #[must_use]
    pub fn given_as<M>(mut self, key: &str, condition: impl IntoCondition<M>) -> Self {
        self.add_condition(Some(key), condition.into_condition());
        self
    }

    /// Adds an action whose result is stored under the configured response
    /// key (`response` by default).
    #[must_use]
    pub fn when<M>(mut self, action: impl IntoStep<M>) -> Self {
        let key = self.config.response_key().to_owned();
        self.actions.add(action.into_step(), Some(&key));
        self
    }

    /// Adds an action whose result is stored under `key`, or unkeyed when
    /// `key` is empty.
    #[must_use]
    pub fn when_as<M>(mut self, key: &str, action: impl IntoStep<M>) -> Self {
        self.actions.add(action.into_step(), Some(key));
        self
    }

    /// Runs the pending conditions and actions, then `assertion`.
    ///
    /// Pending steps run once; calling `then` again only runs the new
    /// assertion against the stored values.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a step unless it satisfies the
    /// expectation registered with [`Scenario::throws`], and
    /// [`ScenarioError::ExpectationUnmet`] when an expectation was registered
    /// but nothing failed.
    pub fn then<M>(mut self, assertion: impl IntoStep<M>) -> ScenarioResult<Self> {
        let mut step = assertion.into_step();
        let outcome = self.run(&mut step);
        match (outcome, self.expected.take()) {
            (Ok(()), None) => Ok(self),
            (Ok(()), Some(expected)) => Err(ScenarioError::ExpectationUnmet {
                expected: expected.to_string(),
            }),
            (Err(err), Some(expected)) if expected.is_satisfied_by(&err) => {
                debug!(%expected, error = %err, "expected failure observed");
                Ok(self)
            }
            (Err(err), _) => Err(err),
        }
    }

    /// Values stored so far.
    #[must_use]
    pub const fn store(&self) -> &ParameterStore {
        &self.store
    }

    /// Configuration the scenario was created with.
    #[must_use]
    pub const fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Number of conditions not yet evaluated.
    #[must_use]
    pub fn pending_conditions(&self) -> usize {
        self.conditions.len()
    }

    /// Number of actions not yet evaluated.
    #[must_use]
    pub fn pending_actions(&self) -> usize {
        self.actions.len()
    }

    fn add_condition(&mut self, key: Option<&str>, condition: Condition) {
        match condition {
            Condition::Literal(value) => self.store_literal(key, value),
            Condition::Deferred(step) => self.conditions.add(step, key),
        }
    }

    fn store_literal(&mut self, key: Option<&str>, value: Value) {
        if let Some(explicit) = key.filter(|candidate| !candidate.is_empty()) {
            debug!(key = explicit, ty = %value.value_type(), "storing literal condition");
            self.store.set(explicit, value);
        } else {
            let inferred = self.store.insert_inferred(value);
            debug!(key = %inferred, "storing literal condition");
        }
    }

    fn run(&mut self, assertion: &mut Step) -> ScenarioResult<()> {
        self.store = evaluate(&mut self.conditions, self.store.clone(), Phase::Condition)?;
        self.store = evaluate(&mut self.actions, self.store.clone(), Phase::Action)?;
        run_assertion(assertion, &self.store)
    }
}
