//! Positional access to the arguments resolved for a step.

use std::any::Any;

use crate::error::{ScenarioError, ScenarioResult};
use crate::value::{Value, ValueType};

/// Arguments injected into a step, consumed in declaration order.
///
/// The resolver omits parameters it cannot match, so later arguments move up
/// one position. A required parameter that finds the list exhausted reports
/// [`ScenarioError::MissingArgument`]; one that receives a shifted value of
/// another type reports [`ScenarioError::ArgumentType`].
#[derive(Debug)]
pub struct Args {
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl Args {
    pub(crate) fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Number of arguments not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// Takes the next argument as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::MissingArgument`] when no argument is left and
    /// [`ScenarioError::ArgumentType`] when the next argument is not a `T`.
    pub fn required<T: Any + Clone>(&mut self, parameter: &str) -> ScenarioResult<T> {
        let position = self.advance();
        let value = self.values.next().ok_or_else(|| {
            ScenarioError::missing_argument(position, parameter, ValueType::of::<T>())
        })?;
        downcast(&value, position, parameter)
    }

    /// Takes the next argument as `T`, or `None` when none is left.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::ArgumentType`] when the next argument is not a
    /// `T`.
    pub fn optional<T: Any + Clone>(&mut self, parameter: &str) -> ScenarioResult<Option<T>> {
        let position = self.advance();
        self.values
            .next()
            .map(|value| downcast(&value, position, parameter))
            .transpose()
    }

    /// Takes the next argument without checking its type.
    ///
    /// Union parameters use this and inspect the [`Value`] themselves.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::MissingArgument`] when no argument is left.
    pub fn value(&mut self, parameter: &str) -> ScenarioResult<Value> {
        let position = self.advance();
        self.values.next().ok_or_else(|| {
            ScenarioError::missing_argument(position, parameter, ValueType::of::<Value>())
        })
    }

    fn advance(&mut self) -> usize {
        let position = self.position;
        self.position += 1;
        position
    }
}

fn downcast<T: Any + Clone>(value: &Value, position: usize, parameter: &str) -> ScenarioResult<T> {
    value.cloned::<T>().ok_or_else(|| {
        ScenarioError::argument_type(
            position,
            parameter,
            &ValueType::of::<T>().short_name(),
            value.value_type(),
        )
    })
}
