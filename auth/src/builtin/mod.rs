//! Authenticators shipped with the library.
//!
//! Both are thin adapters over [`JwtHandler`](crate::JwtHandler); the token
//! issuer lives outside this crate.

pub mod jwt;
pub mod security_token;

pub use jwt::JwtAuthenticator;
pub use security_token::SecurityTokenAuthenticator;
