//! Primary error enum for scenario evaluation flows.

use figment::Error as FigmentError;
use thiserror::Error;

/// Boxed error raised by user-supplied steps and collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur while configuring or evaluating a scenario.
///
/// Configuration variants are raised eagerly, before any step runs. Step
/// failures are reported through [`ScenarioError::Step`], whose `Display`
/// output is the original error message and whose source is the original
/// error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScenarioError {
    /// The configuration selects an auth provider that was never registered.
    #[error("auth provider '{name}' is not registered")]
    UnsupportedAuthProvider {
        /// Name requested by the configuration.
        name: String,
    },

    /// The requested auth guard is absent from the known guards.
    #[error("auth guard '{guard}' is not defined (known guards: {known})")]
    UnknownGuard {
        /// Guard requested by the configuration or the caller.
        guard: String,
        /// Comma-separated list of guards the configuration defines.
        known: String,
    },

    /// `acting_as` was called on a scenario without an auth provider.
    #[error("acting_as requires an auth provider in the scenario configuration")]
    AuthProviderMissing,

    /// Loading the suite configuration failed.
    #[error("failed to load scenario configuration: {0}")]
    Config(#[from] Box<FigmentError>),

    /// No stored value could be injected for a required parameter.
    #[error("missing argument #{position} ('{parameter}') of type {expected}")]
    MissingArgument {
        /// Zero-based position of the parameter in the step signature.
        position: usize,
        /// Declared parameter name, or `_` for type-only parameters.
        parameter: String,
        /// Type the step declared for the parameter.
        expected: String,
    },

    /// The injected value at a position does not have the declared type.
    #[error("argument #{position} ('{parameter}') expected {expected}, found {found}")]
    ArgumentType {
        /// Zero-based position of the parameter in the step signature.
        position: usize,
        /// Declared parameter name, or `_` for type-only parameters.
        parameter: String,
        /// Type the step declared for the parameter.
        expected: String,
        /// Type of the value the resolver supplied at that position.
        found: String,
    },

    /// A condition, action, or assertion failed.
    #[error("{0}")]
    Step(#[source] BoxError),

    /// An error expectation was registered but the scenario completed.
    #[error("expected the scenario to fail with {expected}, but it completed")]
    ExpectationUnmet {
        /// Description of the expected error.
        expected: String,
    },
}
