pub mod coordinator;
pub mod dispatch;
pub mod errors;
pub mod models;
pub mod ports;
pub mod registry;
pub mod service;

#[cfg(test)]
pub(crate) mod fixtures;
