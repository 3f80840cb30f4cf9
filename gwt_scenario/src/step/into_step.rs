//! Conversion of plain closures into steps with type-only parameters.

use std::any::Any;

use super::{Args, ParamSpec, Signature, Step, StepOutput};

/// Placeholder name reported for parameters that have no declared name.
const UNNAMED: &str = "_";

/// Values that can be registered as a step.
///
/// Implemented for [`Step`] itself and for closures of up to six parameters
/// whose parameter types are `Clone + 'static` and whose return type
/// implements [`StepOutput`]. Closure parameters carry no names, so they are
/// injected by type only; use [`step!`](crate::step!) when a parameter must
/// bind to a key.
///
/// The `Marker` parameter only keeps the closure implementations apart and is
/// always inferred.
///
/// # Examples
///
/// ```
/// use gwt_scenario::IntoStep;
///
/// let step = (|count: u32, label: String| format!("{label}:{count}")).into_step();
/// let params = step.signature().params().map(<[_]>::len);
/// assert_eq!(params, Some(2));
/// ```
pub trait IntoStep<Marker> {
    /// Converts `self` into a [`Step`].
    fn into_step(self) -> Step;
}

impl IntoStep<Self> for Step {
    fn into_step(self) -> Step {
        self
    }
}

macro_rules! closure_into_step {
    ($($param:ident $arg:ident),+) => {
        impl<F, R, $($param),*> IntoStep<fn($($param),*) -> R> for F
        where
            F: FnMut($($param),*) -> R + 'static,
            R: StepOutput,
            $($param: Any + Clone,)*
        {
            fn into_step(self) -> Step {
                let mut call = self;
                let signature = Signature::Described(vec![$(ParamSpec::of::<$param>()),+]);
                Step::new(signature, move |args: &mut Args| {
                    $(let $arg = args.required::<$param>(UNNAMED)?;)*
                    call($($arg),*).into_output()
                })
            }
        }
    };
}

impl<F, R> IntoStep<fn() -> R> for F
where
    F: FnMut() -> R + 'static,
    R: StepOutput,
{
    fn into_step(self) -> Step {
        let mut call = self;
        Step::new(Signature::empty(), move |_args: &mut Args| call().into_output())
    }
}

closure_into_step!(A a);
closure_into_step!(A a, B b);
closure_into_step!(A a, B b, C c);
closure_into_step!(A a, B b, C c, D d);
closure_into_step!(A a, B b, C c, D d, E e);
closure_into_step!(A a, B b, C c, D d, E e, G g);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::value::{Value, ValueType};

    #[rstest]
    fn closures_declare_type_only_parameters() {
        let step = (|_amount: u64, _note: String| ()).into_step();
        let params = step.signature().params().unwrap_or_default();
        assert_eq!(params.len(), 2);
        assert!(params.iter().all(|param| param.name().is_none()));
        assert_eq!(
            params.first().map(ParamSpec::accepted),
            Some([ValueType::of::<u64>()].as_slice())
        );
    }

    #[rstest]
    fn closures_receive_injected_values() {
        let mut step = (|amount: u64| amount + 1).into_step();
        let produced = step.invoke(vec![Value::new(41_u64)]);
        assert_eq!(
            produced.ok().flatten().and_then(|value| value.cloned::<u64>()),
            Some(42)
        );
    }

    #[rstest]
    fn zero_argument_closures_are_described() {
        let step = (|| "ok").into_step();
        assert_eq!(step.signature(), &Signature::empty());
    }
}
