//! Expected failures registered with `throws`.

use std::any::type_name;
use std::error::Error as StdError;
use std::fmt;

use crate::value::short_type_name;

type Matcher = fn(&(dyn StdError + 'static)) -> bool;

/// An error a scenario is expected to fail with.
///
/// The expectation is satisfied by any error in the failure's source chain
/// that has type `E` and, when a message is given, whose `Display` output
/// contains that message.
#[derive(Clone)]
pub struct ErrorExpectation {
    matcher: Matcher,
    type_name: &'static str,
    message: Option<String>,
}

impl ErrorExpectation {
    /// Expects an error of type `E`.
    #[must_use]
    pub fn of<E: StdError + 'static>() -> Self {
        Self {
            matcher: is_error_of::<E>,
            type_name: type_name::<E>(),
            message: None,
        }
    }

    /// Additionally requires the error message to contain `message`.
    ///
    /// An empty message places no requirement on the text.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let text = message.into();
        self.message = (!text.is_empty()).then_some(text);
        self
    }

    /// Returns `true` when `err`, or an error it wraps, meets the expectation.
    ///
    /// # Examples
    ///
    /// ```
    /// use gwt_scenario::{ErrorExpectation, ScenarioError};
    ///
    /// let expectation = ErrorExpectation::of::<std::fmt::Error>().with_message("formatting");
    /// assert!(expectation.is_satisfied_by(&ScenarioError::step(std::fmt::Error)));
    /// assert!(!expectation.is_satisfied_by(&ScenarioError::step("other")));
    /// ```
    #[must_use]
    pub fn is_satisfied_by(&self, err: &(dyn StdError + 'static)) -> bool {
        let mut current = Some(err);
        while let Some(candidate) = current {
            if (self.matcher)(candidate) && self.message_matches(candidate) {
                return true;
            }
            current = candidate.source();
        }
        false
    }

    fn message_matches(&self, err: &(dyn StdError + 'static)) -> bool {
        self.message
            .as_deref()
            .is_none_or(|message| err.to_string().contains(message))
    }
}

impl fmt::Display for ErrorExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&short_type_name(self.type_name))?;
        if let Some(message) = &self.message {
            write!(f, " containing \"{message}\"")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ErrorExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorExpectation")
            .field("type_name", &self.type_name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

fn is_error_of<E: StdError + 'static>(err: &(dyn StdError + 'static)) -> bool {
    err.is::<E>()
}
