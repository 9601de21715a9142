use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use auth::Authenticator;
use auth::JwtAuthenticator;
use auth::SecurityTokenAuthenticator;
use serde::Deserialize;

use crate::authenticator::errors::LoaderError;

/// One `[[authenticators]]` entry of the authenticators file.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatorSettings {
    pub name: String,
    pub kind: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub secret: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl AuthenticatorSettings {
    /// Shared secret, required by the token based kinds.
    ///
    /// # Errors
    /// * `MissingSetting` - No non-empty secret was configured
    pub fn require_secret(&self) -> Result<&str, LoaderError> {
        self.secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| LoaderError::MissingSetting {
                name: self.name.clone(),
                setting: "secret".to_string(),
            })
    }
}

/// Builds an authenticator from its settings.
pub type AuthenticatorFactory =
    Arc<dyn Fn(&AuthenticatorSettings) -> Result<Arc<dyn Authenticator>, LoaderError> + Send + Sync>;

/// Maps configured kinds to the factories that build them.
#[derive(Clone, Default)]
pub struct AuthenticatorCatalog {
    factories: HashMap<String, AuthenticatorFactory>,
}

impl AuthenticatorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the kinds bundled with the auth crate:
    /// `jwt` and `security_token`.
    pub fn with_builtin() -> Self {
        Self::new()
            .register("jwt", |settings| {
                let secret = settings.require_secret()?;
                Ok(Arc::new(JwtAuthenticator::new(secret.as_bytes())) as Arc<dyn Authenticator>)
            })
            .register("security_token", |settings| {
                let secret = settings.require_secret()?;
                Ok(Arc::new(SecurityTokenAuthenticator::new(secret.as_bytes()))
                    as Arc<dyn Authenticator>)
            })
    }

    /// Add or replace the factory for a kind.
    pub fn register<F>(mut self, kind: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&AuthenticatorSettings) -> Result<Arc<dyn Authenticator>, LoaderError>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(kind.into(), Arc::new(factory));
        self
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Instantiate the authenticator described by `settings`.
    ///
    /// # Errors
    /// * `UnknownKind` - No factory is registered for the kind
    /// * Whatever the factory returns
    pub fn build(
        &self,
        settings: &AuthenticatorSettings,
    ) -> Result<Arc<dyn Authenticator>, LoaderError> {
        let factory = self
            .factories
            .get(&settings.kind)
            .ok_or_else(|| LoaderError::UnknownKind {
                name: settings.name.clone(),
                kind: settings.kind.clone(),
            })?;

        factory(settings)
    }
}

impl fmt::Debug for AuthenticatorCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatorCatalog")
            .field("kinds", &self.kinds())
            .finish()
    }
}
