use async_trait::async_trait;

use crate::authenticator::errors::LoaderError;
use crate::authenticator::errors::RegistryError;
use crate::authenticator::models::AuthenticatorRegistration;
use crate::authenticator::models::AuthenticatorSnapshot;

/// Port for authenticator registry administration.
#[async_trait]
pub trait AuthenticatorServicePort: Send + Sync + 'static {
    /// Ordered authenticators as of now.
    ///
    /// # Returns
    /// Snapshot of the chain
    ///
    /// # Errors
    /// * `NotInitialized` - Registry has never been loaded
    /// * `LockContentionTimeout` - Registry lock not acquired in time
    async fn list_authenticators(&self) -> Result<AuthenticatorSnapshot, RegistryError>;

    /// Swap two authenticators by position.
    ///
    /// # Arguments
    /// * `first` - Position of the first authenticator
    /// * `second` - Position of the second authenticator
    ///
    /// # Returns
    /// Snapshot of the reordered chain
    ///
    /// # Errors
    /// * `IndexOutOfRange` - Either position is outside the chain
    /// * `NotInitialized` - Registry has never been loaded
    /// * `LockContentionTimeout` - Registry lock not acquired in time
    async fn reorder_authenticators(
        &self,
        first: i64,
        second: i64,
    ) -> Result<AuthenticatorSnapshot, RegistryError>;

    /// Replace the chain with freshly loaded configuration.
    ///
    /// # Returns
    /// Snapshot of the reloaded chain
    ///
    /// # Errors
    /// * `InvalidReload` - Configuration could not be loaded or was empty
    /// * `LockContentionTimeout` - Registry lock not acquired in time
    async fn reload_authenticators(&self) -> Result<AuthenticatorSnapshot, RegistryError>;
}

/// Source of authenticators, read from persisted configuration.
///
/// Called only on reload and never while the registry lock is held.
#[async_trait]
pub trait AuthenticatorLoader: Send + Sync + 'static {
    /// Build the ordered authenticator list from current configuration.
    ///
    /// # Returns
    /// Registrations in chain order
    ///
    /// # Errors
    /// * `Configuration` - Configuration could not be read or parsed
    /// * `UnknownKind` - An entry names a kind with no factory
    /// * `MissingSetting` - A factory lacks a required setting
    /// * `InvalidName` - An entry name is not a valid qualified name
    /// * `Empty` - No enabled authenticators were declared
    async fn load(&self) -> Result<Vec<AuthenticatorRegistration>, LoaderError>;
}
