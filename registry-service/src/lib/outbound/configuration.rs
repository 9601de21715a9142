pub mod catalog;
pub mod loader;

pub use catalog::AuthenticatorCatalog;
pub use catalog::AuthenticatorSettings;
pub use loader::ConfigAuthenticatorLoader;
