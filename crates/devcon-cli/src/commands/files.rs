use super::Output;
use super::utils::print_json;
use anyhow::Result;
use colored::Colorize;
use devcon_core::dashboard::{
    DashboardBackend, DriveFile, FileStatusSummary, filter_files, format_size,
};

pub async fn list(
    client: &dyn DashboardBackend,
    folder_id: &str,
    search: &str,
    status_filter: &str,
    output: Output,
) -> Result<()> {
    let files = client.fetch_files(folder_id).await?;
    let shown = filter_files(&files, search, status_filter);

    if output.json {
        return print_json(&serde_json::to_value(&shown)?);
    }

    if shown.is_empty() {
        println!("No files match.");
    }
    for file in &shown {
        println!("{}", file_line(file));
    }
    println!();
    println!("{}", summary_line(&FileStatusSummary::from_files(&files)));
    Ok(())
}

pub(crate) fn file_line(file: &DriveFile) -> String {
    let status = file.status.as_deref().unwrap_or("available");
    let status = match status {
        "processed" => status.green(),
        "failed" => status.red(),
        other => other.normal(),
    };
    format!(
        "{:<44} {:>12}  {:<10} {}",
        file.id.bright_black(),
        format_size(file.size),
        status,
        file.name
    )
}

pub(crate) fn summary_line(summary: &FileStatusSummary) -> String {
    format!(
        "{} files: {} processed, {} failed, {} available",
        summary.total, summary.processed, summary.failed, summary.available
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_line_defaults_status_and_formats_size() {
        colored::control::set_override(false);
        let file = DriveFile {
            id: "abc".into(),
            name: "Chapter Guide.pdf".into(),
            mime_type: None,
            size: Some(1536),
            modified_time: None,
            status: None,
        };
        let line = file_line(&file);
        assert!(line.contains("1.5 KB"));
        assert!(line.contains("available"));
        assert!(line.ends_with("Chapter Guide.pdf"));
    }

    #[test]
    fn test_summary_line() {
        let summary = FileStatusSummary {
            processed: 2,
            failed: 1,
            available: 3,
            total: 6,
        };
        assert_eq!(
            summary_line(&summary),
            "6 files: 2 processed, 1 failed, 3 available"
        );
    }
}
