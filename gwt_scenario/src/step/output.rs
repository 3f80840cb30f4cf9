//! Conversion of step return values into stored values.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{BoxError, ScenarioError, ScenarioResult};
use crate::value::Value;

/// Return types a step may produce.
///
/// `()` and `None` produce nothing, so nothing is stored. `Result` fails the
/// step with its error or produces its success value. Scalars, strings, and
/// the standard containers produce themselves. Other types implement the trait
/// with `#[derive(StepOutput)]` or are returned wrapped in `Some`.
///
/// # Examples
///
/// ```
/// use gwt_scenario::{StepOutput, Value};
///
/// #[derive(Clone, StepOutput)]
/// struct Receipt {
///     number: u32,
/// }
///
/// let produced = Receipt { number: 4 }.into_output()?;
/// assert!(produced.is_some_and(|value| value.is::<Receipt>()));
/// assert!(().into_output()?.is_none());
/// # Ok::<_, gwt_scenario::ScenarioError>(())
/// ```
pub trait StepOutput {
    /// Converts the return value into the value to store, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Step`] when the return value is an error.
    fn into_output(self) -> ScenarioResult<Option<Value>>;
}

impl StepOutput for () {
    fn into_output(self) -> ScenarioResult<Option<Value>> {
        Ok(None)
    }
}

impl StepOutput for Value {
    fn into_output(self) -> ScenarioResult<Option<Value>> {
        Ok(Some(self))
    }
}

impl<T: Any> StepOutput for Option<T> {
    fn into_output(self) -> ScenarioResult<Option<Value>> {
        Ok(self.map(Value::new))
    }
}

impl<T, E> StepOutput for Result<T, E>
where
    T: StepOutput,
    E: Into<BoxError>,
{
    fn into_output(self) -> ScenarioResult<Option<Value>> {
        self.map_err(ScenarioError::step)?.into_output()
    }
}

macro_rules! produces_itself {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StepOutput for $ty {
                fn into_output(self) -> ScenarioResult<Option<Value>> {
                    Ok(Some(Value::new(self)))
                }
            }
        )*
    };
}

produces_itself!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
);

macro_rules! produces_container {
    ($($container:ident<$($param:ident),+>),* $(,)?) => {
        $(
            impl<$($param: Any),+> StepOutput for $container<$($param),+> {
                fn into_output(self) -> ScenarioResult<Option<Value>> {
                    Ok(Some(Value::new(self)))
                }
            }
        )*
    };
}

produces_container!(
    Vec<T>,
    VecDeque<T>,
    BTreeSet<T>,
    HashSet<T>,
    BTreeMap<K, V>,
    HashMap<K, V>,
    Box<T>,
    Rc<T>,
    Arc<T>,
);

macro_rules! produces_tuple {
    ($(($($param:ident),+)),* $(,)?) => {
        $(
            impl<$($param: Any),+> StepOutput for ($($param,)+) {
                fn into_output(self) -> ScenarioResult<Option<Value>> {
                    Ok(Some(Value::new(self)))
                }
            }
        )*
    };
}

produces_tuple!((A, B), (A, B, C), (A, B, C, D));
