//! Shared request helpers.

use devcon_core::error::{DevconError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builds the client both adapters use.
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DevconError::internal(format!("Failed to build HTTP client: {}", e)))
}

/// Maps a failure to send or read a request onto a transport error.
pub(crate) fn transport_error(context: &str, err: reqwest::Error) -> DevconError {
    DevconError::transport(
        err.status().map(|s| s.as_u16()),
        format!("{}: {}", context, err),
    )
}

/// Rejects non-2xx responses, keeping the body text for diagnostics.
pub(crate) async fn ensure_success(context: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(DevconError::transport(
        Some(status.as_u16()),
        format!("{} failed: {}", context, body.trim()),
    ))
}

/// Reads a successful response as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(context: &str, response: Response) -> Result<T> {
    let response = ensure_success(context, response).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| transport_error(context, e))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| DevconError::json(format!("{} returned unexpected JSON: {}", context, e)))
}
