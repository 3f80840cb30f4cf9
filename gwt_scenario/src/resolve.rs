//! Parameter injection: matching declared parameters against stored values.
//!
//! Each declared parameter is resolved independently:
//!
//! 1. A value stored under the parameter's name wins outright.
//! 2. Otherwise the store is walked in descending key order and the **last**
//!    value whose type the parameter accepts is kept, so among several values
//!    of one type the one with the smallest key is injected. A union parameter
//!    accepts each of its types equally; the smallest key wins whichever
//!    listed type it holds.
//! 3. A parameter that matches nothing is left out of the argument list
//!    rather than filled with a placeholder.
//!
//! Opaque signatures resolve to no arguments at all. Matching is by presence:
//! zero, `false`, and empty values are injected like any other value.

use tracing::trace;

use crate::step::{ParamSpec, Signature};
use crate::store::ParameterStore;
use crate::value::Value;

/// Computes the positional arguments for a step with `signature`.
///
/// # Examples
///
/// ```
/// use gwt_scenario::{ParamSpec, ParameterStore, Signature, Value, resolve_arguments};
///
/// let mut store = ParameterStore::new();
/// store.set("b", Value::new(2_i32));
/// store.set("a", Value::new(1_i32));
///
/// let signature = Signature::empty().param(ParamSpec::of::<i32>());
/// let args = resolve_arguments(&signature, &store);
/// assert_eq!(args.first().and_then(|value| value.cloned::<i32>()), Some(1));
/// ```
#[must_use]
pub fn resolve_arguments(signature: &Signature, store: &ParameterStore) -> Vec<Value> {
    let Some(params) = signature.params() else {
        trace!("signature is opaque; injecting no arguments");
        return Vec::new();
    };
    let descending = store.sorted_descending();
    params
        .iter()
        .enumerate()
        .filter_map(|(position, param)| {
            let found = find_matching(param, store, &descending);
            if found.is_none() {
                trace!(position, parameter = ?param.name(), "no stored value matches; omitting");
            }
            found
        })
        .collect()
}

fn find_matching(
    param: &ParamSpec,
    store: &ParameterStore,
    descending: &[(&str, &Value)],
) -> Option<Value> {
    if let Some(value) = param.name().and_then(|name| store.get(name)) {
        trace!(parameter = ?param.name(), "injecting by name");
        return Some(value.clone());
    }

    let mut candidate = None;
    for (key, value) in descending {
        if param.matches(value.value_type()) {
            candidate = Some((*key, *value));
        }
    }
    candidate.map(|(key, value)| {
        trace!(parameter = ?param.name(), key, ty = %value.value_type(), "injecting by type");
        value.clone()
    })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::value::ValueType;

    #[fixture]
    fn store() -> ParameterStore {
        let mut store = ParameterStore::new();
        store.set("b", Value::new(20_i32));
        store.set("a", Value::new(10_i32));
        store.set("c", Value::new(30_i32));
        store.set("label", Value::new(String::from("invoice")));
        store
    }

    fn ints(values: &[Value]) -> Vec<Option<i32>> {
        values.iter().map(Value::cloned::<i32>).collect()
    }

    #[rstest]
    fn name_match_beats_type_match(store: ParameterStore) {
        let signature = Signature::empty().param(ParamSpec::named("c").accepts::<i32>());
        assert_eq!(ints(&resolve_arguments(&signature, &store)), [Some(30)]);
    }

    #[rstest]
    fn name_match_ignores_the_declared_type(store: ParameterStore) {
        let signature = Signature::empty().param(ParamSpec::named("label").accepts::<i32>());
        let args = resolve_arguments(&signature, &store);
        assert!(args.first().is_some_and(|value| value.is::<String>()));
    }

    #[rstest]
    fn smallest_key_wins_among_type_matches(store: ParameterStore) {
        let signature = Signature::empty().param(ParamSpec::named("total").accepts::<i32>());
        assert_eq!(ints(&resolve_arguments(&signature, &store)), [Some(10)]);
    }

    #[rstest]
    fn numeric_keys_order_numerically() {
        let mut store = ParameterStore::new();
        store.set("9", Value::new(9_u8));
        store.set("10", Value::new(10_u8));
        let signature = Signature::empty().param(ParamSpec::of::<u8>());
        let args = resolve_arguments(&signature, &store);
        assert_eq!(args.first().and_then(Value::cloned::<u8>), Some(9));
    }

    #[rstest]
    fn union_parameters_accept_any_listed_type(store: ParameterStore) {
        let param = ParamSpec::unnamed().accepts::<u64>().accepts::<String>();
        let signature = Signature::empty().param(param);
        let args = resolve_arguments(&signature, &store);
        assert!(args.first().is_some_and(|value| value.is::<String>()));
    }

    #[rstest]
    #[case::u64_listed_first(ParamSpec::unnamed().accepts::<u64>().accepts::<String>())]
    #[case::string_listed_first(ParamSpec::unnamed().accepts::<String>().accepts::<u64>())]
    fn union_parameters_take_the_smallest_key_of_any_listed_type(#[case] param: ParamSpec) {
        let mut store = ParameterStore::new();
        store.set("b", Value::new(7_u64));
        store.set("a", Value::new(String::from("s")));
        let signature = Signature::empty().param(param);
        let args = resolve_arguments(&signature, &store);
        assert_eq!(
            args.first().and_then(Value::cloned::<String>).as_deref(),
            Some("s")
        );
    }

    #[rstest]
    fn unmatched_parameters_are_omitted(store: ParameterStore) {
        let signature = Signature::empty()
            .param(ParamSpec::named("missing").accepts::<bool>())
            .param(ParamSpec::named("a").accepts::<i32>());
        assert_eq!(ints(&resolve_arguments(&signature, &store)), [Some(10)]);
    }

    #[rstest]
    fn opaque_signatures_receive_nothing(store: ParameterStore) {
        assert!(resolve_arguments(&Signature::Opaque, &store).is_empty());
    }

    #[rstest]
    #[case::zero(Value::new(0_i64))]
    #[case::empty_string(Value::new(String::new()))]
    #[case::false_flag(Value::new(false))]
    #[case::empty_vec(Value::new(Vec::<u8>::new()))]
    fn falsy_values_still_match(#[case] value: Value) {
        let ty: ValueType = value.value_type();
        let mut store = ParameterStore::new();
        store.set("only", value);
        let signature = Signature::empty().param(ParamSpec::unnamed().accepts_type(ty));
        assert_eq!(resolve_arguments(&signature, &store).len(), 1);
    }
}
