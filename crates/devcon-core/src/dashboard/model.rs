//! Wire models of the indexing service's admin endpoints.

use serde::{Deserialize, Serialize};

/// `GET /api/v1/health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rag_status: Option<String>,
    #[serde(default)]
    pub document_count: Option<u64>,
}

impl HealthReport {
    /// The retrieval engine reports itself ready.
    pub fn is_ready(&self) -> bool {
        self.rag_status.as_deref() == Some("ready")
    }
}

/// `GET /api/v1/stats`, or a view derived from the health report when stats are unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    #[serde(default = "unknown_status")]
    pub status: String,
    #[serde(default)]
    pub document_count: u64,
    #[serde(default)]
    pub error: Option<String>,
}

fn unknown_status() -> String {
    "unknown".to_string()
}

impl From<&HealthReport> for IndexStats {
    fn from(health: &HealthReport) -> Self {
        Self {
            status: health
                .rag_status
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(unknown_status),
            document_count: health.document_count.unwrap_or(0),
            error: None,
        }
    }
}

/// A document in the indexed Drive folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_size")]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Drive reports sizes as decimal strings; accept numbers too.
fn lenient_size<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Size>::deserialize(deserializer)? {
        Some(Size::Number(n)) => Some(n),
        Some(Size::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// `POST /api/v1/files/fetch` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFilesRequest {
    pub folder_id: String,
}

/// `POST /api/v1/files/fetch` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FetchFilesResponse {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

/// `POST /api/v1/rebuild` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebuildRequest {
    pub folder_id: String,
    pub batch_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<String>>,
}

impl RebuildRequest {
    /// Rebuilds the whole folder, or only `file_ids` when some are given.
    pub fn new(folder_id: impl Into<String>, batch_size: u32, file_ids: Vec<String>) -> Self {
        Self {
            folder_id: folder_id.into(),
            batch_size,
            file_ids: (!file_ids.is_empty()).then_some(file_ids),
        }
    }
}

/// Per-file outcome inside a rebuild report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDetail {
    pub id: String,
    pub status: String,
}

/// `POST /api/v1/rebuild` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub processed_files: u64,
    #[serde(default)]
    pub failed_files: u64,
    #[serde(default)]
    pub files_details: Vec<FileDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_fall_back_to_health_fields() {
        let health = HealthReport {
            status: Some("ok".into()),
            rag_status: None,
            document_count: Some(12),
        };
        let stats = IndexStats::from(&health);
        assert_eq!(stats.status, "unknown");
        assert_eq!(stats.document_count, 12);
    }

    #[test]
    fn drive_file_accepts_string_sizes() {
        let file: DriveFile = serde_json::from_str(
            r#"{"id": "f1", "name": "Handbook.pdf", "mimeType": "application/pdf", "size": "2048"}"#,
        )
        .unwrap();
        assert_eq!(file.size, Some(2048));
        assert_eq!(file.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(file.status, None);
    }

    #[test]
    fn rebuild_request_omits_empty_selection() {
        let all = RebuildRequest::new("folder", 25, Vec::new());
        let json = serde_json::to_value(&all).unwrap();
        assert!(json.get("file_ids").is_none());

        let some = RebuildRequest::new("folder", 25, vec!["a".into()]);
        let json = serde_json::to_value(&some).unwrap();
        assert_eq!(json["file_ids"], serde_json::json!(["a"]));
    }
}
