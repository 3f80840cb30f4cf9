//! Constructors and inspection helpers for `ScenarioError`.

use std::error::Error as StdError;

use figment::Error as FigmentError;

use super::{BoxError, ScenarioError};
use crate::value::ValueType;

impl ScenarioError {
    /// Wrap an error raised by a step without altering its message.
    ///
    /// # Examples
    ///
    /// ```
    /// use gwt_scenario::ScenarioError;
    /// let err = ScenarioError::step("boom");
    /// assert_eq!(err.to_string(), "boom");
    /// ```
    #[must_use]
    pub fn step(source: impl Into<BoxError>) -> Self {
        Self::Step(source.into())
    }

    /// Construct a configuration error from a [`figment::Error`].
    #[must_use]
    pub fn config(source: FigmentError) -> Self {
        Self::Config(Box::new(source))
    }

    pub(crate) fn missing_argument(position: usize, parameter: &str, expected: ValueType) -> Self {
        Self::MissingArgument {
            position,
            parameter: parameter.to_owned(),
            expected: expected.short_name(),
        }
    }

    pub(crate) fn argument_type(
        position: usize,
        parameter: &str,
        expected: &str,
        found: ValueType,
    ) -> Self {
        Self::ArgumentType {
            position,
            parameter: parameter.to_owned(),
            expected: expected.to_owned(),
            found: found.short_name(),
        }
    }

    pub(crate) fn unknown_guard(guard: &str, known: &[String]) -> Self {
        Self::UnknownGuard {
            guard: guard.to_owned(),
            known: known.join(", "),
        }
    }

    /// Returns `true` when the error is a configuration problem raised before
    /// evaluation.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedAuthProvider { .. }
                | Self::UnknownGuard { .. }
                | Self::AuthProviderMissing
                | Self::Config(_)
        )
    }

    /// Returns the original step error when it has type `E`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gwt_scenario::ScenarioError;
    /// let err = ScenarioError::step(std::fmt::Error);
    /// assert!(err.downcast_ref::<std::fmt::Error>().is_some());
    /// ```
    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            Self::Step(source) => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}
