//! [`DashboardBackend`] over HTTP.

use crate::http::{build_client, read_json, transport_error};
use async_trait::async_trait;
use devcon_core::backend::{AskRequest, AskResponse};
use devcon_core::chat::HistoryWindow;
use devcon_core::config::ClientConfig;
use devcon_core::dashboard::{
    DashboardBackend, DriveFile, FetchFilesRequest, FetchFilesResponse, HealthReport,
    IndexStats, NO_INFORMATION_ANSWER, RebuildReport, RebuildRequest,
};
use devcon_core::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Admin client for the indexing service.
#[derive(Clone)]
pub struct HttpDashboardClient {
    client: Client,
    config: ClientConfig,
}

impl HttpDashboardClient {
    /// Rebuilds can index many documents in one call, so requests may run for minutes.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(Duration::from_secs(600))?,
            config,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path);
        tracing::debug!("[HttpDashboardClient] GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;
        read_json(path, response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        tracing::debug!("[HttpDashboardClient] POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;
        read_json(path, response).await
    }
}

#[async_trait]
impl DashboardBackend for HttpDashboardClient {
    async fn health(&self) -> Result<HealthReport> {
        self.get_json("/api/v1/health").await
    }

    async fn stats(&self) -> Result<IndexStats> {
        match self.get_json::<IndexStats>("/api/v1/stats").await {
            Ok(stats) => Ok(stats),
            Err(err) => {
                tracing::warn!(error = %err, "[HttpDashboardClient] Stats unavailable, deriving from health");
                let health = self.health().await?;
                Ok(IndexStats::from(&health))
            }
        }
    }

    async fn fetch_files(&self, folder_id: &str) -> Result<Vec<DriveFile>> {
        let request = FetchFilesRequest {
            folder_id: folder_id.to_string(),
        };
        let response: FetchFilesResponse = self.post_json("/api/v1/files/fetch", &request).await?;
        tracing::info!(count = response.files.len(), "[HttpDashboardClient] Fetched files");
        Ok(response.files)
    }

    async fn rebuild(&self, request: &RebuildRequest) -> Result<RebuildReport> {
        tracing::info!(
            folder = %request.folder_id,
            files = request.file_ids.as_ref().map_or(0, Vec::len),
            "[HttpDashboardClient] Rebuilding index"
        );
        self.post_json("/api/v1/rebuild", request).await
    }

    async fn probe_answers(&self) -> Result<bool> {
        let request = AskRequest::new("test", HistoryWindow::default());
        let response: AskResponse = self.post_json("/api/v1/ask", &request).await?;
        Ok(response
            .answer
            .is_some_and(|answer| !answer.is_empty() && answer.trim() != NO_INFORMATION_ANSWER))
    }
}
