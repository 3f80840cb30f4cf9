//! Insertion-ordered store of values produced during a scenario.

use std::any::Any;
use std::cmp::Ordering;

use indexmap::IndexMap;
use tracing::warn;

use crate::value::{Value, ValueType};

/// Named values available for injection into later steps.
///
/// Keys are unique. Writing an existing key replaces its value without moving
/// the entry, so insertion order reflects when a key was first written.
///
/// # Examples
///
/// ```
/// use gwt_scenario::{ParameterStore, Value};
///
/// let mut store = ParameterStore::new();
/// store.set("total", Value::new(30_u32));
/// let key = store.insert_inferred(Value::new(String::from("paid")));
///
/// assert_eq!(key, "String");
/// assert_eq!(store.get_as::<u32>("total"), Some(&30));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParameterStore {
    entries: IndexMap<String, Value>,
}

impl ParameterStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Store `value` under the key inferred from its runtime type and return
    /// that key.
    pub fn insert_inferred(&mut self, value: Value) -> String {
        let key = value.inferred_key();
        if self.entries.contains_key(&key) {
            warn!(key = %key, "inferred key overwrites an existing value");
        }
        self.entries.insert(key.clone(), value);
        key
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Borrows the value stored under `key` as `T`.
    #[must_use]
    pub fn get_as<T: Any>(&self, key: &str) -> Option<&T> {
        self.get(key).and_then(Value::downcast_ref::<T>)
    }

    /// Returns the first value, in insertion order, whose type is `ty`.
    #[must_use]
    pub fn find_by_type(&self, ty: ValueType) -> Option<&Value> {
        self.entries.values().find(|value| value.value_type() == ty)
    }

    /// Returns `true` when a value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Entries ordered by key, largest first.
    ///
    /// Integer keys compare numerically and sort below every other key, which
    /// compare lexicographically. Equal keys keep insertion order.
    pub(crate) fn sorted_descending(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(left, _), (right, _)| compare_keys(right, left));
        entries
    }
}

pub(crate) fn compare_keys(left: &str, right: &str) -> Ordering {
    match (left.parse::<i64>(), right.parse::<i64>()) {
        (Ok(left_num), Ok(right_num)) => left_num.cmp(&right_num),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => left.cmp(right),
    }
}
