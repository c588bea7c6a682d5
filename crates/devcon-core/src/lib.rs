//! Domain layer of the DEVCON chat client.
//!
//! Holds the conversation model, the client configuration and the seams the
//! other crates implement: persistent storage, the remote chat backend, the
//! dashboard endpoints and user notifications.

pub mod backend;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod notification;
pub mod store;

// Re-export common error type
pub use error::DevconError;
