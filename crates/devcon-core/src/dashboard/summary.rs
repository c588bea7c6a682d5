//! Pure helpers behind the dashboard views.

use super::model::{DriveFile, HealthReport, IndexStats, RebuildReport};

/// File counts grouped by indexing status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStatusSummary {
    pub processed: usize,
    pub failed: usize,
    pub available: usize,
    pub total: usize,
}

impl FileStatusSummary {
    pub fn from_files(files: &[DriveFile]) -> Self {
        let count = |status: &str| {
            files
                .iter()
                .filter(|f| f.status.as_deref() == Some(status))
                .count()
        };
        Self {
            processed: count("processed"),
            failed: count("failed"),
            available: count("available"),
            total: files.len(),
        }
    }
}

/// Case-insensitive name search combined with a status filter (`"all"` matches everything).
pub fn filter_files<'a>(
    files: &'a [DriveFile],
    search: &str,
    status_filter: &str,
) -> Vec<&'a DriveFile> {
    let needle = search.to_lowercase();
    files
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&needle))
        .filter(|f| status_filter == "all" || f.status.as_deref() == Some(status_filter))
        .collect()
}

/// Copies per-file statuses from a rebuild report onto the listing.
pub fn apply_rebuild_statuses(files: &mut [DriveFile], report: &RebuildReport) {
    for file in files.iter_mut() {
        if let Some(detail) = report.files_details.iter().find(|d| d.id == file.id) {
            file.status = Some(detail.status.clone());
        }
    }
}

/// Human-readable file size, e.g. `1.5 KB`.
pub fn format_size(bytes: Option<u64>) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let Some(bytes) = bytes.filter(|b| *b > 0) else {
        return "Unknown size".to_string();
    };

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

/// Number of indexed documents, preferring health over stats over the file listing.
pub fn document_count(
    health: Option<&HealthReport>,
    stats: Option<&IndexStats>,
    files: &[DriveFile],
) -> u64 {
    health
        .and_then(|h| h.document_count)
        .filter(|n| *n > 0)
        .or_else(|| stats.map(|s| s.document_count).filter(|n| *n > 0))
        .unwrap_or(files.len() as u64)
}
