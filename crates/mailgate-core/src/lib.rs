/// Mailgate Core - Shared library for the Mailgate email proxy
///
/// This crate contains the types and services shared by the two Mailgate
/// Lambda functions: the subscription proxy (mailgate-lists) and the
/// transactional sending proxy (mailgate-send).
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod validation;

// Re-export commonly used types
pub use error::MailgateError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
