//! Sequential evaluation of registered steps.

use std::fmt;

use tracing::debug;

use crate::error::ScenarioResult;
use crate::registry::CallbackRegistry;
use crate::resolve::resolve_arguments;
use crate::step::Step;
use crate::store::ParameterStore;

/// Stage of a scenario a step belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Setup registered through `given`.
    Condition,
    /// Behaviour under test registered through `when`.
    Action,
    /// Verification passed to `then`.
    Assertion,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Condition => "condition",
            Self::Action => "action",
            Self::Assertion => "assertion",
        })
    }
}

/// Drains `registry`, running each step against the growing `store`.
///
/// Each step's arguments are resolved against the values stored so far, and a
/// produced value is stored under the entry's key, or under the key inferred
/// from its type when the entry is unkeyed. The first failing step aborts the
/// remaining ones.
///
/// # Errors
///
/// Returns the first error raised while injecting arguments into, or running,
/// a step.
pub fn evaluate(
    registry: &mut CallbackRegistry,
    mut store: ParameterStore,
    phase: Phase,
) -> ScenarioResult<ParameterStore> {
    for (key, mut step) in registry.drain_all() {
        let arguments = resolve_arguments(step.signature(), &store);
        debug!(
            %phase,
            key = key.as_deref().unwrap_or("<unkeyed>"),
            arguments = arguments.len(),
            "evaluating step"
        );
        let Some(value) = step.invoke(arguments)? else {
            continue;
        };
        match key {
            Some(key) => {
                store.set(key, value);
            }
            None => {
                store.insert_inferred(value);
            }
        }
    }
    Ok(store)
}

/// Runs `assertion` with arguments injected from `store`, discarding its
/// result.
///
/// # Errors
///
/// Returns the error raised while injecting arguments into, or running, the
/// assertion.
pub fn run_assertion(assertion: &mut Step, store: &ParameterStore) -> ScenarioResult<()> {
    let arguments = resolve_arguments(assertion.signature(), store);
    debug!(phase = %Phase::Assertion, arguments = arguments.len(), "evaluating step");
    assertion.invoke(arguments).map(drop)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rstest::rstest;

    use super::*;
    use crate::error::ScenarioError;
    use crate::step::{IntoStep, ParamSpec, Signature};
    use crate::value::Value;

    #[rstest]
    fn later_steps_see_earlier_results() -> ScenarioResult<()> {
        let mut registry = CallbackRegistry::new();
        registry.add((|| 4_u32).into_step(), Some("base"));
        registry.add((|base: u32| base * 10).into_step(), Some("scaled"));

        let store = evaluate(&mut registry, ParameterStore::new(), Phase::Condition)?;
        assert_eq!(store.get_as::<u32>("scaled"), Some(&40));
        assert!(registry.is_empty());
        Ok(())
    }

    #[rstest]
    fn unkeyed_results_use_the_inferred_key() -> ScenarioResult<()> {
        let mut registry = CallbackRegistry::new();
        registry.add((|| 7_i32).into_step(), None);
        let store = evaluate(&mut registry, ParameterStore::new(), Phase::Condition)?;
        assert_eq!(store.get_as::<i32>("i32"), Some(&7));
        Ok(())
    }

    #[rstest]
    fn unit_results_are_not_stored() -> ScenarioResult<()> {
        let mut registry = CallbackRegistry::new();
        registry.add((|| ()).into_step(), Some("nothing"));
        let store = evaluate(&mut registry, ParameterStore::new(), Phase::Action)?;
        assert!(store.is_empty());
        Ok(())
    }

    #[rstest]
    fn failures_abort_the_remaining_steps() {
        let ran = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&ran);
        let last = Rc::clone(&ran);

        let mut registry = CallbackRegistry::new();
        registry.add(
            (move || first.borrow_mut().push("first")).into_step(),
            None,
        );
        registry.add((|| Err::<(), _>("declined")).into_step(), None);
        registry.add((move || last.borrow_mut().push("last")).into_step(), None);

        let outcome = evaluate(&mut registry, ParameterStore::new(), Phase::Action);
        assert!(matches!(outcome, Err(ScenarioError::Step(_))));
        assert_eq!(*ran.borrow(), ["first"]);
    }

    #[rstest]
    fn assertions_receive_injected_values() -> ScenarioResult<()> {
        let mut store = ParameterStore::new();
        store.set("response", Value::new(String::from("ok")));
        let mut assertion = Step::new(
            Signature::empty().param(ParamSpec::named("response").accepts::<String>()),
            |args| {
                let response: String = args.required("response")?;
                assert_eq!(response, "ok");
                Ok(Some(Value::new(1_u8)))
            },
        );
        run_assertion(&mut assertion, &store)?;
        assert_eq!(store.len(), 1);
        Ok(())
    }
}
