//! Suite-level configuration threaded into every scenario.
//!
//! [`SuiteConfig`] is the serialisable form, layered by `figment` from
//! defaults, an optional TOML file, and `GWT_`-prefixed environment variables.
//! Converting it with [`SuiteConfig::into_scenario_config`] validates the
//! auth provider and guard eagerly and yields the [`ScenarioConfig`] that
//! builders carry.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{AuthProvider, AuthProviders};
use crate::error::{ScenarioError, ScenarioResult};

/// Key actions store their result under unless given one.
pub const DEFAULT_RESPONSE_KEY: &str = "response";

/// Key `acting_as` stores the principal under unless given one.
pub const DEFAULT_USER_KEY: &str = "user";

/// Prefix of the environment variables read by [`SuiteConfig::load`].
pub const ENV_PREFIX: &str = "GWT_";

/// Serialisable suite settings.
///
/// # Examples
///
/// ```
/// use gwt_scenario::SuiteConfig;
///
/// let config = SuiteConfig::default();
/// assert_eq!(config.response_key, "response");
/// assert_eq!(config.guards, ["web"]);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SuiteConfig {
    /// Name of the registered auth provider used by `acting_as`.
    pub auth_provider: Option<String>,
    /// Guard passed to the auth provider when a call does not name one.
    pub auth_guard: Option<String>,
    /// Guards defined for the suite.
    pub guards: Vec<String>,
    /// Key actions store their result under by default.
    pub response_key: String,
    /// Key `acting_as` stores the principal under by default.
    pub user_key: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            auth_provider: None,
            auth_guard: None,
            guards: vec![String::from("web")],
            response_key: String::from(DEFAULT_RESPONSE_KEY),
            user_key: String::from(DEFAULT_USER_KEY),
        }
    }
}

impl SuiteConfig {
    /// Layers defaults, the TOML file at `file` (when given and present), and
    /// `GWT_` environment variables, in increasing precedence.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads settings from defaults and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Config`] when a layer cannot be extracted.
    pub fn load() -> ScenarioResult<Self> {
        Self::load_from(None)
    }

    /// Loads settings from defaults, `file`, and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Config`] when a layer cannot be extracted.
    pub fn load_from(file: Option<&Path>) -> ScenarioResult<Self> {
        Self::figment(file).extract().map_err(ScenarioError::config)
    }

    /// Validates the settings against `providers` and builds the scenario
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::UnsupportedAuthProvider`] when the selected
    /// provider is not registered and [`ScenarioError::UnknownGuard`] when the
    /// configured guard is not among [`SuiteConfig::guards`].
    pub fn into_scenario_config(self, providers: &AuthProviders) -> ScenarioResult<ScenarioConfig> {
        let auth = self
            .auth_provider
            .map(|name| match providers.get(&name) {
                Some(provider) => Ok(AuthBinding { name, provider }),
                None => Err(ScenarioError::UnsupportedAuthProvider { name }),
            })
            .transpose()?;
        if let Some(guard) = &self.auth_guard {
            ensure_guard(guard, &self.guards)?;
        }
        debug!(
            provider = auth.as_ref().map(|binding| binding.name.as_str()),
            guard = self.auth_guard.as_deref(),
            "scenario configuration validated"
        );
        Ok(ScenarioConfig {
            auth,
            guard: self.auth_guard,
            guards: self.guards,
            response_key: self.response_key,
            user_key: self.user_key,
        })
    }
}

pub(crate) fn ensure_guard(guard: &str, known: &[String]) -> ScenarioResult<()> {
    if known.iter().any(|candidate| candidate == guard) {
        Ok(())
    } else {
        Err(ScenarioError::unknown_guard(guard, known))
    }
}

#[derive(Clone)]
pub(crate) struct AuthBinding {
    pub(crate) name: String,
    pub(crate) provider: Arc<dyn AuthProvider>,
}

/// Validated configuration carried by every [`Scenario`](crate::Scenario).
///
/// The default configuration has no auth provider, a single `web` guard, and
/// the default response and user keys.
#[derive(Clone)]
pub struct ScenarioConfig {
    auth: Option<AuthBinding>,
    guard: Option<String>,
    guards: Vec<String>,
    response_key: String,
    user_key: String,
}

impl ScenarioConfig {
    /// Name of the selected auth provider.
    #[must_use]
    pub fn auth_provider_name(&self) -> Option<&str> {
        self.auth.as_ref().map(|binding| binding.name.as_str())
    }

    /// Guard used when `acting_as` does not name one.
    #[must_use]
    pub fn guard(&self) -> Option<&str> {
        self.guard.as_deref()
    }

    /// Guards defined for the suite.
    #[must_use]
    pub fn guards(&self) -> &[String] {
        &self.guards
    }

    /// Key actions store their result under by default.
    #[must_use]
    pub fn response_key(&self) -> &str {
        &self.response_key
    }

    /// Key `acting_as` stores the principal under by default.
    #[must_use]
    pub fn user_key(&self) -> &str {
        &self.user_key
    }

    pub(crate) fn auth_provider(&self) -> Option<Arc<dyn AuthProvider>> {
        self.auth.as_ref().map(|binding| Arc::clone(&binding.provider))
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let suite = SuiteConfig::default();
        Self {
            auth: None,
            guard: None,
            guards: suite.guards,
            response_key: suite.response_key,
            user_key: suite.user_key,
        }
    }
}

impl fmt::Debug for ScenarioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioConfig")
            .field("auth_provider", &self.auth_provider_name())
            .field("guard", &self.guard)
            .field("guards", &self.guards)
            .field("response_key", &self.response_key)
            .field("user_key", &self.user_key)
            .finish()
    }
}
