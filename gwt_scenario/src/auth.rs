//! Authentication providers that act as a principal for a scenario.
//!
//! Providers are registered by name in [`AuthProviders`]; the suite
//! configuration selects one of them, optionally with a guard, and
//! [`Scenario::acting_as`](crate::Scenario::acting_as) turns a principal into a
//! condition that authenticates it when the scenario runs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::value::Value;

/// Provider able to authenticate a principal for the duration of a test.
pub trait AuthProvider: Send + Sync {
    /// Acts as `principal` with `abilities` on `guard`, returning the
    /// principal to inject into later steps.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider cannot authenticate the principal.
    fn acting_as(
        &self,
        principal: Value,
        abilities: &[String],
        guard: Option<&str>,
    ) -> Result<Value, BoxError>;
}

impl<F> AuthProvider for F
where
    F: Fn(Value, &[String], Option<&str>) -> Result<Value, BoxError> + Send + Sync,
{
    fn acting_as(
        &self,
        principal: Value,
        abilities: &[String],
        guard: Option<&str>,
    ) -> Result<Value, BoxError> {
        self(principal, abilities, guard)
    }
}

/// Named auth providers a suite configuration can select from.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use gwt_scenario::{AuthProvider, AuthProviders, BoxError, Value};
///
/// struct Session;
///
/// impl AuthProvider for Session {
///     fn acting_as(
///         &self,
///         principal: Value,
///         _abilities: &[String],
///         _guard: Option<&str>,
///     ) -> Result<Value, BoxError> {
///         Ok(principal)
///     }
/// }
///
/// let providers = AuthProviders::new().register("session", Arc::new(Session));
/// assert!(providers.get("session").is_some());
/// assert!(providers.get("token").is_none());
/// ```
#[derive(Clone, Default)]
pub struct AuthProviders {
    providers: BTreeMap<String, Arc<dyn AuthProvider>>,
}

impl AuthProviders {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            providers: BTreeMap::new(),
        }
    }

    /// Registers `provider` under `name`, replacing any provider of that name.
    #[must_use]
    pub fn register(mut self, name: impl Into<String>, provider: Arc<dyn AuthProvider>) -> Self {
        self.providers.insert(name.into(), provider);
        self
    }

    /// Returns the provider registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn AuthProvider>> {
        self.providers.get(name).cloned()
    }

    /// Registered provider names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }
}

impl fmt::Debug for AuthProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Options for [`Scenario::acting_as_with`](crate::Scenario::acting_as_with).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActingAs {
    key: Option<String>,
    abilities: Vec<String>,
    guard: Option<String>,
}

impl ActingAs {
    /// Options using the configured key and guard and no abilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the authenticated principal under `key`.
    ///
    /// An empty key stores it under the key inferred from its type instead.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Grants `ability` to the principal.
    #[must_use]
    pub fn ability(mut self, ability: impl Into<String>) -> Self {
        self.abilities.push(ability.into());
        self
    }

    /// Authenticates on `guard` instead of the configured guard.
    #[must_use]
    pub fn guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = Some(guard.into());
        self
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Vec<String>, Option<String>) {
        (self.key, self.abilities, self.guard)
    }
}
