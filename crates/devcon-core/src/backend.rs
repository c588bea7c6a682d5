//! Contract with the remote question-answering service.

use crate::chat::{HistoryEntry, HistoryWindow};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Answer used when the backend responds without one.
pub const FALLBACK_ANSWER: &str = "⚠️ No answer provided.";

/// Body of `POST /api/v1/ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
    pub history: Vec<HistoryEntry>,
}

impl AskRequest {
    pub fn new(query: impl Into<String>, history: HistoryWindow) -> Self {
        Self {
            query: query.into(),
            history: history.into_entries(),
        }
    }
}

/// Validated body of an ask response.
///
/// Only `answer` is read. A missing, null or blank answer, or a body that is
/// not a JSON object at all, resolves to [`FALLBACK_ANSWER`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

impl AskResponse {
    pub fn answered(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
        }
    }

    /// Parses a raw response body, degrading to an empty response on malformed JSON.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<AskResponse>(body) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(error = %err, "Ask response was not valid JSON; using fallback answer");
                Self::default()
            }
        }
    }

    pub fn answer_or_fallback(self) -> String {
        match self.answer {
            Some(answer) if !answer.trim().is_empty() => answer,
            _ => FALLBACK_ANSWER.to_string(),
        }
    }
}

/// Remote chat service used by a session.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Single liveness check. `Ok(false)` and `Err(_)` both mean unavailable.
    async fn check_availability(&self) -> Result<bool>;

    /// Sends a question together with its context window.
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_answer_uses_fallback() {
        assert_eq!(AskResponse::from_body(br#"{}"#).answer_or_fallback(), FALLBACK_ANSWER);
        assert_eq!(
            AskResponse::from_body(br#"{"answer": null}"#).answer_or_fallback(),
            FALLBACK_ANSWER
        );
        assert_eq!(
            AskResponse::from_body(br#"{"answer": "  "}"#).answer_or_fallback(),
            FALLBACK_ANSWER
        );
    }

    #[test]
    fn malformed_body_uses_fallback() {
        assert_eq!(
            AskResponse::from_body(b"<html>502</html>").answer_or_fallback(),
            FALLBACK_ANSWER
        );
    }

    #[test]
    fn answer_and_extra_fields_are_accepted() {
        let response = AskResponse::from_body(br#"{"answer": "hi!", "sources": []}"#);
        assert_eq!(response.answer_or_fallback(), "hi!");
    }

    #[test]
    fn request_serializes_query_and_history() {
        let request = AskRequest::new("hello", HistoryWindow::default());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"query": "hello", "history": []}));
    }
}
