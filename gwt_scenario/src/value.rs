//! Type-erased values exchanged between steps.
//!
//! A [`Value`] is a cheaply clonable handle to any `'static` value together
//! with its [`ValueType`]. The type is what the resolver matches parameters
//! against, and its short name is the key under which unkeyed results are
//! stored.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Runtime type identity of a stored value.
///
/// Equality and hashing use the [`TypeId`] only; the name is carried for
/// diagnostics and key inference.
#[derive(Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// Returns the type identity of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gwt_scenario::ValueType;
    /// assert_eq!(ValueType::of::<String>().short_name(), "String");
    /// ```
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the underlying [`TypeId`].
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the fully qualified type name reported by the compiler.
    #[must_use]
    pub const fn full_name(&self) -> &'static str {
        self.name
    }

    /// Returns the type name with module paths removed from every segment.
    #[must_use]
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }

    /// Returns `true` when this is the type of `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl Hash for ValueType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueType").field(&self.name).finish()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// Shared handle to a value produced or supplied during a scenario.
///
/// Cloning a `Value` clones the handle, never the payload.
#[derive(Clone)]
pub struct Value {
    ty: ValueType,
    inner: Rc<dyn Any>,
}

impl Value {
    /// Wraps `value`.
    #[must_use]
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            ty: ValueType::of::<T>(),
            inner: Rc::new(value),
        }
    }

    /// Returns the runtime type of the wrapped value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.ty
    }

    /// Returns `true` when the wrapped value has type `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.ty.is::<T>()
    }

    /// Borrows the wrapped value as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.inner).downcast_ref::<T>()
    }

    /// Clones the wrapped value out as `T`.
    #[must_use]
    pub fn cloned<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    /// Key used when the value is stored without an explicit key.
    ///
    /// # Examples
    ///
    /// ```
    /// use gwt_scenario::Value;
    /// assert_eq!(Value::new(42_i32).inferred_key(), "i32");
    /// assert_eq!(Value::new(vec![String::new()]).inferred_key(), "Vec<String>");
    /// ```
    #[must_use]
    pub fn inferred_key(&self) -> String {
        self.ty.short_name()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value<{}>", self.ty)
    }
}

/// Strips module paths from every path segment of a compiler type name.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`; primitive
/// and reference names such as `i32` and `&str` pass through unchanged.
pub(crate) fn short_type_name(full: &str) -> String {
    let mut short = String::with_capacity(full.len());
    let mut path = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            path.push(ch);
        } else {
            push_last_segment(&mut short, &path);
            path.clear();
            short.push(ch);
        }
    }
    push_last_segment(&mut short, &path);
    short
}

fn push_last_segment(out: &mut String, path: &str) {
    if let Some(segment) = path.rsplit("::").next() {
        out.push_str(segment);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Invoice {
        total: u64,
    }

    #[rstest]
    #[case("i32", "i32")]
    #[case("&str", "&str")]
    #[case("alloc::string::String", "String")]
    #[case("alloc::vec::Vec<alloc::string::String>", "Vec<String>")]
    #[case(
        "alloc::collections::btree::map::BTreeMap<alloc::string::String, u8>",
        "BTreeMap<String, u8>"
    )]
    #[case("core::option::Option<my_app::models::User>", "Option<User>")]
    #[case("(i32, alloc::string::String)", "(i32, String)")]
    #[case("[u8; 4]", "[u8; 4]")]
    fn shortens_type_names(#[case] full: &str, #[case] expected: &str) {
        assert_eq!(short_type_name(full), expected);
    }

    #[rstest]
    fn inferred_keys_follow_runtime_types() {
        assert_eq!(Value::new(Invoice { total: 3 }).inferred_key(), "Invoice");
        assert_eq!(
            Value::new(BTreeMap::<String, i64>::new()).inferred_key(),
            "BTreeMap<String, i64>"
        );
    }

    #[rstest]
    fn downcasts_share_the_payload() {
        let value = Value::new(Invoice { total: 12 });
        let copy = value.clone();
        assert!(copy.is::<Invoice>());
        assert_eq!(copy.cloned::<Invoice>(), Some(Invoice { total: 12 }));
        assert!(value.downcast_ref::<u64>().is_none());
    }

    #[rstest]
    fn value_types_compare_by_identity() {
        assert_eq!(ValueType::of::<u8>(), Value::new(1_u8).value_type());
        assert_ne!(ValueType::of::<u8>(), ValueType::of::<i8>());
    }
}
