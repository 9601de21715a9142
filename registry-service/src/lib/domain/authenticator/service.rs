use std::sync::Arc;

use async_trait::async_trait;

use crate::authenticator::errors::RegistryError;
use crate::authenticator::models::AuthenticatorSnapshot;
use crate::authenticator::ports::AuthenticatorLoader;
use crate::authenticator::ports::AuthenticatorServicePort;
use crate::authenticator::registry::AuthenticatorRegistry;

/// Domain service administering the authenticator registry.
///
/// Loads configuration outside the registry lock, then hands the result to
/// the registry for atomic installation.
pub struct AuthenticatorService<L>
where
    L: AuthenticatorLoader,
{
    registry: Arc<AuthenticatorRegistry>,
    loader: Arc<L>,
}

impl<L> AuthenticatorService<L>
where
    L: AuthenticatorLoader,
{
    /// Create a new service over a shared registry.
    ///
    /// # Arguments
    /// * `registry` - Process-wide registry, also handed to the dispatcher
    /// * `loader` - Configuration loader used on reload
    pub fn new(registry: Arc<AuthenticatorRegistry>, loader: Arc<L>) -> Self {
        Self { registry, loader }
    }
}

#[async_trait]
impl<L> AuthenticatorServicePort for AuthenticatorService<L>
where
    L: AuthenticatorLoader,
{
    async fn list_authenticators(&self) -> Result<AuthenticatorSnapshot, RegistryError> {
        self.registry.list().await
    }

    async fn reorder_authenticators(
        &self,
        first: i64,
        second: i64,
    ) -> Result<AuthenticatorSnapshot, RegistryError> {
        self.registry.reorder(first, second).await
    }

    async fn reload_authenticators(&self) -> Result<AuthenticatorSnapshot, RegistryError> {
        let registrations = self.loader.load().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load authenticators from configuration");
            RegistryError::from(e)
        })?;

        self.registry.reload(registrations).await
    }
}
