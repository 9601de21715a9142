use std::fmt;
use std::sync::Arc;

use auth::AuthenticationProvider;
use auth::Authenticator;
use chrono::DateTime;
use chrono::Utc;

use crate::authenticator::errors::QualifiedNameError;

/// Stable identifying name of an authenticator implementation.
///
/// Used for reporting only; dispatch never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName(String);

impl QualifiedName {
    const MAX_LENGTH: usize = 256;

    /// Create a validated qualified name.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    /// * `Blank` - Name is empty after trimming
    /// * `TooLong` - Name longer than 256 characters
    /// * `ControlCharacters` - Name contains control characters
    pub fn new(name: impl Into<String>) -> Result<Self, QualifiedNameError> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(QualifiedNameError::Blank);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(QualifiedNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if name.chars().any(char::is_control) {
            return Err(QualifiedNameError::ControlCharacters);
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authenticator handed to the registry for installation.
///
/// Carries no position; the registry assigns positions in input order.
#[derive(Clone)]
pub struct AuthenticatorRegistration {
    pub name: QualifiedName,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AuthenticatorRegistration {
    pub fn new(name: QualifiedName, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            name,
            authenticator,
        }
    }
}

impl fmt::Debug for AuthenticatorRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatorRegistration")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// One slot of the authenticator chain.
///
/// `position` always equals the slot index inside the chain holding it.
#[derive(Clone)]
pub struct AuthenticatorEntry {
    pub position: usize,
    pub name: QualifiedName,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AuthenticatorEntry {
    pub fn provider(&self) -> &dyn AuthenticationProvider {
        self.authenticator.provider()
    }
}

impl fmt::Debug for AuthenticatorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatorEntry")
            .field("position", &self.position)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered authenticator chain as published by the registry.
///
/// Never mutated once built; every change produces a new chain.
#[derive(Debug, Clone)]
pub struct AuthenticatorChain {
    entries: Vec<AuthenticatorEntry>,
    generation: u64,
    updated_at: DateTime<Utc>,
}

impl AuthenticatorChain {
    /// Chain of a registry that has not been loaded yet.
    pub fn uninitialized() -> Self {
        Self {
            entries: Vec::new(),
            generation: 0,
            updated_at: Utc::now(),
        }
    }

    /// Build a chain from registrations, numbering positions in input order.
    pub fn from_registrations(
        registrations: Vec<AuthenticatorRegistration>,
        generation: u64,
    ) -> Self {
        let entries = registrations
            .into_iter()
            .enumerate()
            .map(|(position, registration)| AuthenticatorEntry {
                position,
                name: registration.name,
                authenticator: registration.authenticator,
            })
            .collect();

        Self {
            entries,
            generation,
            updated_at: Utc::now(),
        }
    }

    /// Copy of this chain with two slots swapped and positions renumbered.
    ///
    /// Both indices must be in range.
    pub fn with_swapped(&self, first: usize, second: usize, generation: u64) -> Self {
        let mut entries = self.entries.clone();
        entries.swap(first, second);
        for (position, entry) in entries.iter_mut().enumerate() {
            entry.position = position;
        }

        Self {
            entries,
            generation,
            updated_at: Utc::now(),
        }
    }

    /// Registrations that rebuild this chain in its current order.
    pub fn registrations(&self) -> Vec<AuthenticatorRegistration> {
        self.entries
            .iter()
            .map(|entry| {
                AuthenticatorRegistration::new(entry.name.clone(), Arc::clone(&entry.authenticator))
            })
            .collect()
    }

    pub fn is_initialized(&self) -> bool {
        self.generation > 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Point-in-time view of the authenticator chain.
///
/// Cheap to clone and immune to later reorders and reloads. Iterating it
/// walks the entries in chain order and can be restarted any number of times.
#[derive(Debug, Clone)]
pub struct AuthenticatorSnapshot {
    chain: Arc<AuthenticatorChain>,
}

impl AuthenticatorSnapshot {
    pub fn new(chain: Arc<AuthenticatorChain>) -> Self {
        Self { chain }
    }

    pub fn entries(&self) -> &[AuthenticatorEntry] {
        &self.chain.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AuthenticatorEntry> {
        self.chain.entries.iter()
    }

    /// Providers in chain order, for the authentication dispatcher.
    pub fn providers(&self) -> impl Iterator<Item = &dyn AuthenticationProvider> + '_ {
        self.chain.entries.iter().map(AuthenticatorEntry::provider)
    }

    pub fn names(&self) -> Vec<String> {
        self.chain
            .entries
            .iter()
            .map(|entry| entry.name.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.chain.generation
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.chain.updated_at
    }

    pub(crate) fn chain(&self) -> &AuthenticatorChain {
        &self.chain
    }
}

impl<'a> IntoIterator for &'a AuthenticatorSnapshot {
    type Item = &'a AuthenticatorEntry;
    type IntoIter = std::slice::Iter<'a, AuthenticatorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
