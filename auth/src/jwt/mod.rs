pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::SECURITY_TOKEN_KEY_CLAIM;
pub use errors::JwtError;
pub use handler::JwtHandler;
