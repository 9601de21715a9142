//! Authentication capability library
//!
//! Provides the contract shared by every pluggable authenticator and the
//! infrastructure the bundled authenticators are built on:
//! - Authenticator capability (`Authenticator`, `AuthenticationProvider`)
//! - Authentication requests and credential kinds
//! - JWT token generation and validation
//! - Built-in JWT and security-token authenticators
//!
//! Services own the ordering of authenticators; this crate only describes
//! what a single authenticator can do.
//!
//! # Examples
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_subject("admin", 1);
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("admin"));
//! ```
//!
//! ## Implementing an Authenticator
//! ```
//! use async_trait::async_trait;
//! use auth::{
//!     Authentication, AuthenticationError, AuthenticationProvider, Authenticator, CredentialKind,
//! };
//!
//! struct AllowAll;
//!
//! #[async_trait]
//! impl AuthenticationProvider for AllowAll {
//!     fn supports(&self, _kind: CredentialKind) -> bool {
//!         true
//!     }
//!
//!     async fn authenticate(
//!         &self,
//!         authentication: Authentication,
//!     ) -> Result<Authentication, AuthenticationError> {
//!         Ok(authentication.authenticated("anonymous"))
//!     }
//! }
//!
//! impl Authenticator for AllowAll {
//!     fn provider(&self) -> &dyn AuthenticationProvider {
//!         self
//!     }
//! }
//! ```

pub mod authentication;
pub mod authenticator;
pub mod builtin;
pub mod jwt;

// Re-export commonly used items
pub use authentication::Authentication;
pub use authentication::Credential;
pub use authentication::CredentialKind;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationProvider;
pub use authenticator::Authenticator;
pub use builtin::JwtAuthenticator;
pub use builtin::SecurityTokenAuthenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
