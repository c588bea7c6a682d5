//! [`ChatBackend`] over HTTP.

use crate::http::{build_client, ensure_success, transport_error};
use async_trait::async_trait;
use devcon_core::backend::{AskRequest, AskResponse, ChatBackend};
use devcon_core::config::ClientConfig;
use devcon_core::error::Result;
use reqwest::Client;
use std::time::Duration;

const ASK_PATH: &str = "/api/v1/ask";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Talks to `POST /api/v1/ask` and the configured status path.
#[derive(Clone)]
pub struct HttpChatBackend {
    client: Client,
    ask_url: String,
    status_url: String,
}

impl HttpChatBackend {
    /// Questions can take a while on a cold service, hence the generous timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    /// Both the status probe and questions are bounded by `timeout`.
    pub fn with_timeout(config: &ClientConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            ask_url: config.endpoint(ASK_PATH),
            status_url: config.endpoint(&config.status_path),
        })
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn check_availability(&self) -> Result<bool> {
        tracing::debug!("[HttpChatBackend] Probing {}", self.status_url);
        let response = self
            .client
            .get(&self.status_url)
            .send()
            .await
            .map_err(|e| transport_error("Status check", e))?;
        Ok(response.status().is_success())
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
        tracing::debug!(
            history = request.history.len(),
            "[HttpChatBackend] Sending question"
        );
        let response = self
            .client
            .post(&self.ask_url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("Ask request", e))?;
        let response = ensure_success("Ask request", response).await?;

        // The body is validated field by field; a malformed one still yields a reply.
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error("Ask request", e))?;
        Ok(AskResponse::from_body(&body))
    }
}
