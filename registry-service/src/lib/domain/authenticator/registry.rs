use std::collections::HashSet;
use std::time::Duration;

use super::coordinator::RegistryCoordinator;
use super::errors::RegistryError;
use super::models::AuthenticatorChain;
use super::models::AuthenticatorRegistration;
use super::models::AuthenticatorSnapshot;

/// Ordered, hot-reloadable chain of authenticators.
///
/// One instance is created per process and shared through `Arc` with the
/// administrative interface and the authentication dispatcher. Reads hand
/// out snapshots; `reorder` and `reload` are serialized and atomic.
#[derive(Debug)]
pub struct AuthenticatorRegistry {
    coordinator: RegistryCoordinator<AuthenticatorChain>,
}

impl AuthenticatorRegistry {
    /// Create an empty registry awaiting its first reload.
    ///
    /// # Arguments
    /// * `lock_timeout` - Upper bound on any lock wait
    pub fn new(lock_timeout: Duration) -> Self {
        Self {
            coordinator: RegistryCoordinator::new(AuthenticatorChain::uninitialized(), lock_timeout),
        }
    }

    /// Create a registry already holding an authenticator chain.
    ///
    /// # Errors
    /// * `InvalidReload` - Registrations are empty or contain duplicate names
    pub fn initialize(
        registrations: Vec<AuthenticatorRegistration>,
        lock_timeout: Duration,
    ) -> Result<Self, RegistryError> {
        validate(&registrations)?;

        let chain = AuthenticatorChain::from_registrations(registrations, 1);
        tracing::info!(
            authenticators = chain.len(),
            generation = chain.generation(),
            "Authenticator registry initialized"
        );

        Ok(Self {
            coordinator: RegistryCoordinator::new(chain, lock_timeout),
        })
    }

    /// Ordered entries as of now.
    ///
    /// # Errors
    /// * `NotInitialized` - No chain has been loaded yet
    /// * `LockContentionTimeout` - Read lock not acquired within the bound
    pub async fn list(&self) -> Result<AuthenticatorSnapshot, RegistryError> {
        let chain = self.coordinator.read().await?;
        if !chain.is_initialized() {
            return Err(RegistryError::NotInitialized);
        }

        Ok(AuthenticatorSnapshot::new(chain))
    }

    /// Snapshot for the authentication dispatcher to walk.
    ///
    /// The snapshot keeps yielding the chain as it was when obtained, even if
    /// a reorder or reload completes while it is being walked.
    ///
    /// # Errors
    /// * `NotInitialized` - No chain has been loaded yet
    /// * `LockContentionTimeout` - Read lock not acquired within the bound
    pub async fn snapshot(&self) -> Result<AuthenticatorSnapshot, RegistryError> {
        self.list().await
    }

    /// Swap the entries at two positions.
    ///
    /// Swapping a position with itself succeeds without changing the order.
    ///
    /// # Arguments
    /// * `first` - Position of the first entry
    /// * `second` - Position of the second entry
    ///
    /// # Returns
    /// Snapshot of the chain this reorder published
    ///
    /// # Errors
    /// * `IndexOutOfRange` - Either index is negative or not below the chain length
    /// * `NotInitialized` - No chain has been loaded yet
    /// * `LockContentionTimeout` - Write lock not acquired within the bound
    pub async fn reorder(
        &self,
        first: i64,
        second: i64,
    ) -> Result<AuthenticatorSnapshot, RegistryError> {
        let chain = self
            .coordinator
            .write(|chain| {
                if !chain.is_initialized() {
                    return Err(RegistryError::NotInitialized);
                }

                let length = chain.len();
                let first = checked_index(first, length)?;
                let second = checked_index(second, length)?;

                Ok(chain.with_swapped(first, second, chain.generation() + 1))
            })
            .await
            .inspect_err(|e| tracing::warn!(first, second, error = %e, "Reorder rejected"))?;

        tracing::info!(
            first,
            second,
            generation = chain.generation(),
            "Authenticators reordered"
        );
        Ok(AuthenticatorSnapshot::new(chain))
    }

    /// Replace the whole chain.
    ///
    /// Positions are assigned in the order given; nothing from the previous
    /// chain is kept.
    ///
    /// # Returns
    /// Snapshot of the chain this reload published
    ///
    /// # Errors
    /// * `InvalidReload` - Registrations are empty or contain duplicate names
    /// * `LockContentionTimeout` - Write lock not acquired within the bound
    pub async fn reload(
        &self,
        registrations: Vec<AuthenticatorRegistration>,
    ) -> Result<AuthenticatorSnapshot, RegistryError> {
        // Validation needs no lock
        validate(&registrations).inspect_err(|e| {
            tracing::error!(error = %e, "Reload rejected");
        })?;

        let chain = self
            .coordinator
            .write(move |chain| {
                Ok(AuthenticatorChain::from_registrations(
                    registrations,
                    chain.generation() + 1,
                ))
            })
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Reload failed"))?;

        tracing::info!(
            authenticators = chain.len(),
            generation = chain.generation(),
            "Authenticators reloaded"
        );
        Ok(AuthenticatorSnapshot::new(chain))
    }

    /// Reinstall the chain captured by an earlier snapshot.
    ///
    /// Used to roll back after an experiment, most often from tests.
    ///
    /// # Errors
    /// * `InvalidReload` - Snapshot was taken from an uninitialized registry
    /// * `LockContentionTimeout` - Write lock not acquired within the bound
    pub async fn reset(
        &self,
        snapshot: &AuthenticatorSnapshot,
    ) -> Result<AuthenticatorSnapshot, RegistryError> {
        self.reload(snapshot.chain().registrations()).await
    }
}

fn checked_index(index: i64, length: usize) -> Result<usize, RegistryError> {
    usize::try_from(index)
        .ok()
        .filter(|index| *index < length)
        .ok_or(RegistryError::IndexOutOfRange { index, length })
}

fn validate(registrations: &[AuthenticatorRegistration]) -> Result<(), RegistryError> {
    if registrations.is_empty() {
        return Err(RegistryError::InvalidReload(
            "authenticator list is empty".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(registrations.len());
    for registration in registrations {
        if !seen.insert(registration.name.as_str()) {
            return Err(RegistryError::InvalidReload(format!(
                "duplicate authenticator name: {}",
                registration.name
            )));
        }
    }

    Ok(())
}
