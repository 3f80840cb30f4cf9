//! Steps and the signature descriptions the resolver injects against.
//!
//! A [`Step`] pairs a callback with a [`Signature`] built once, when the step
//! is created. The signature lists each declared parameter's name (when the
//! callback has one) and the types it accepts. The resolver reads only the
//! signature; the callback then pulls its arguments from [`Args`] in
//! declaration order.
//!
//! Steps can be created three ways:
//!
//! - the [`step!`](crate::step!) macro, which reads parameter names and types
//!   straight from a closure;
//! - any closure whose parameters are `Clone + 'static`, via [`IntoStep`], which
//!   yields type-only parameters;
//! - [`Step::new`] and [`Step::opaque`] for hand-written signatures.

mod args;
mod into_step;
mod output;

use std::any::Any;
use std::fmt;

pub use args::Args;
pub use into_step::IntoStep;
pub use output::StepOutput;

use crate::error::ScenarioResult;
use crate::value::{Value, ValueType};

type StepFn = dyn FnMut(&mut Args) -> ScenarioResult<Option<Value>>;

/// Declared parameter of a step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamSpec {
    name: Option<String>,
    accepts: Vec<ValueType>,
}

impl ParamSpec {
    /// A parameter that can be injected by `name` or by type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            accepts: Vec::new(),
        }
    }

    /// A parameter that can only be injected by type.
    #[must_use]
    pub const fn unnamed() -> Self {
        Self {
            name: None,
            accepts: Vec::new(),
        }
    }

    /// An unnamed parameter accepting `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self::unnamed().accepts::<T>()
    }

    /// Adds `T` to the accepted types.
    ///
    /// Calling this more than once declares a union parameter.
    #[must_use]
    pub fn accepts<T: Any>(self) -> Self {
        self.accepts_type(ValueType::of::<T>())
    }

    /// Adds `ty` to the accepted types.
    #[must_use]
    pub fn accepts_type(mut self, ty: ValueType) -> Self {
        self.accepts.push(ty);
        self
    }

    /// Declared parameter name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Accepted types in declaration order.
    #[must_use]
    pub fn accepted(&self) -> &[ValueType] {
        &self.accepts
    }

    /// Returns `true` when a value of type `ty` may be injected.
    #[must_use]
    pub fn matches(&self, ty: ValueType) -> bool {
        self.accepts.iter().any(|accepted| *accepted == ty)
    }
}

/// Description of a step's declared parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Signature {
    /// Parameters in declaration order.
    Described(Vec<ParamSpec>),
    /// The parameters are unknown; the step is invoked without arguments.
    #[default]
    Opaque,
}

impl Signature {
    /// A signature without parameters.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Described(Vec::new())
    }

    /// Appends `param`, turning an opaque signature into a described one.
    ///
    /// # Examples
    ///
    /// ```
    /// use gwt_scenario::{ParamSpec, Signature};
    ///
    /// let signature = Signature::empty()
    ///     .param(ParamSpec::named("amount").accepts::<u64>())
    ///     .param(ParamSpec::of::<String>());
    /// assert_eq!(signature.params().map(<[ParamSpec]>::len), Some(2));
    /// ```
    #[must_use]
    pub fn param(self, param: ParamSpec) -> Self {
        match self {
            Self::Described(mut params) => {
                params.push(param);
                Self::Described(params)
            }
            Self::Opaque => Self::Described(vec![param]),
        }
    }

    /// Declared parameters, or `None` for an opaque signature.
    #[must_use]
    pub fn params(&self) -> Option<&[ParamSpec]> {
        match self {
            Self::Described(params) => Some(params),
            Self::Opaque => None,
        }
    }
}

/// A callback registered as a condition, action, or assertion.
pub struct Step {
    signature: Signature,
    call: Box<StepFn>,
}

impl Step {
    /// Creates a step from a signature and a callback reading its arguments
    /// from [`Args`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gwt_scenario::{ParamSpec, Signature, Step, Value};
    ///
    /// let double = Step::new(
    ///     Signature::empty().param(ParamSpec::named("amount").accepts::<u64>()),
    ///     |args| {
    ///         let amount: u64 = args.required("amount")?;
    ///         Ok(Some(Value::new(amount * 2)))
    ///     },
    /// );
    /// assert!(double.signature().params().is_some());
    /// ```
    pub fn new<F>(signature: Signature, call: F) -> Self
    where
        F: FnMut(&mut Args) -> ScenarioResult<Option<Value>> + 'static,
    {
        Self {
            signature,
            call: Box::new(call),
        }
    }

    /// Creates a step whose parameters are unknown.
    ///
    /// Opaque steps are always invoked with an empty [`Args`].
    pub fn opaque<F>(call: F) -> Self
    where
        F: FnMut(&mut Args) -> ScenarioResult<Option<Value>> + 'static,
    {
        Self::new(Signature::Opaque, call)
    }

    /// The step's declared parameters.
    #[must_use]
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn invoke(&mut self, arguments: Vec<Value>) -> ScenarioResult<Option<Value>> {
        let mut args = Args::new(arguments);
        (self.call)(&mut args)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
