//! HTTP adapters for the DEVCON backend.

mod chat_backend;
mod dashboard_client;
mod http;

pub use chat_backend::HttpChatBackend;
pub use dashboard_client::HttpDashboardClient;
