//! Admin dashboard for the remote indexing service.
//!
//! Only request/response glue and display helpers live here; indexing itself
//! happens on the service.

mod model;
mod summary;

pub use model::{
    DriveFile, FetchFilesRequest, FetchFilesResponse, FileDetail, HealthReport, IndexStats,
    RebuildReport, RebuildRequest,
};
pub use summary::{
    FileStatusSummary, apply_rebuild_statuses, document_count, filter_files, format_size,
};

use crate::error::Result;
use async_trait::async_trait;

/// Reply the service gives when it has nothing indexed to answer from.
pub const NO_INFORMATION_ANSWER: &str = "I don't have enough information to answer this question.";

/// Admin endpoints of the indexing service.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn health(&self) -> Result<HealthReport>;

    /// Detailed index statistics, falling back to the health report.
    async fn stats(&self) -> Result<IndexStats>;

    async fn fetch_files(&self, folder_id: &str) -> Result<Vec<DriveFile>>;

    async fn rebuild(&self, request: &RebuildRequest) -> Result<RebuildReport>;

    /// Whether the service answers a trivial question from indexed documents.
    async fn probe_answers(&self) -> Result<bool>;
}
