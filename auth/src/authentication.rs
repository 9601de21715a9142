use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Kind of credential carried by an authentication request.
///
/// Providers advertise which kinds they accept through
/// `AuthenticationProvider::supports`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    UsernamePassword,
    BearerToken,
    SecurityToken,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CredentialKind::UsernamePassword => "username_password",
            CredentialKind::BearerToken => "bearer_token",
            CredentialKind::SecurityToken => "security_token",
        };
        f.write_str(name)
    }
}

/// Raw credential presented by a caller.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    UsernamePassword { username: String, password: String },
    BearerToken(String),
    SecurityToken(String),
}

impl Credential {
    pub fn kind(&self) -> CredentialKind {
        match self {
            Credential::UsernamePassword { .. } => CredentialKind::UsernamePassword,
            Credential::BearerToken(_) => CredentialKind::BearerToken,
            Credential::SecurityToken(_) => CredentialKind::SecurityToken,
        }
    }
}

// Secrets never reach log output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::UsernamePassword { username, .. } => f
                .debug_struct("UsernamePassword")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credential::BearerToken(_) => f.write_str("BearerToken(<redacted>)"),
            Credential::SecurityToken(_) => f.write_str("SecurityToken(<redacted>)"),
        }
    }
}

/// Authentication request, and once a provider accepts it, its result.
///
/// A request starts without a principal; a successful provider returns it
/// with the principal filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication {
    pub credential: Credential,
    pub principal: Option<String>,
}

impl Authentication {
    /// Create an unauthenticated request for a credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            principal: None,
        }
    }

    /// Credential kind used to select providers.
    pub fn kind(&self) -> CredentialKind {
        self.credential.kind()
    }

    /// Mark this request as authenticated for a principal.
    pub fn authenticated(mut self, principal: impl ToString) -> Self {
        self.principal = Some(principal.to_string());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}
