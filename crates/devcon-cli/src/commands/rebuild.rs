use super::Output;
use super::files::{file_line, summary_line};
use super::utils::print_json;
use anyhow::Result;
use colored::Colorize;
use devcon_core::dashboard::{
    DashboardBackend, FileStatusSummary, RebuildReport, RebuildRequest, apply_rebuild_statuses,
};

pub fn confirmation_prompt(request: &RebuildRequest) -> String {
    match &request.file_ids {
        Some(ids) => format!("Re-index {} selected file(s)?", ids.len()),
        None => format!(
            "Re-index every document in folder {}? This may take several minutes.",
            request.folder_id
        ),
    }
}

/// Runs the rebuild, then lists the folder with the per-file outcomes applied.
pub async fn rebuild(
    client: &dyn DashboardBackend,
    request: &RebuildRequest,
    output: Output,
) -> Result<()> {
    if !output.json {
        println!("{}", "Rebuilding index...".bright_black());
    }
    let report = client.rebuild(request).await?;

    if output.json {
        return print_json(&serde_json::to_value(&report)?);
    }
    println!("{}", report_line(&report));

    let mut files = client.fetch_files(&request.folder_id).await?;
    apply_rebuild_statuses(&mut files, &report);
    let touched: Vec<_> = files
        .iter()
        .filter(|f| report.files_details.iter().any(|d| d.id == f.id))
        .collect();
    for file in touched {
        println!("{}", file_line(file));
    }
    println!("{}", summary_line(&FileStatusSummary::from_files(&files)));
    Ok(())
}

fn report_line(report: &RebuildReport) -> String {
    let line = format!(
        "Rebuild {}: {} processed, {} failed",
        if report.status.is_empty() { "finished" } else { report.status.as_str() },
        report.processed_files,
        report.failed_files
    );
    if report.failed_files > 0 {
        line.yellow().to_string()
    } else {
        line.green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use devcon_core::dashboard::{DriveFile, FileDetail, HealthReport, IndexStats};
    use devcon_core::error::Result as CoreResult;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeDashboard {
        rebuilds: Mutex<Vec<RebuildRequest>>,
    }

    #[async_trait]
    impl DashboardBackend for FakeDashboard {
        async fn health(&self) -> CoreResult<HealthReport> {
            Ok(HealthReport::default())
        }

        async fn stats(&self) -> CoreResult<IndexStats> {
            Ok(IndexStats::from(&HealthReport::default()))
        }

        async fn fetch_files(&self, _folder_id: &str) -> CoreResult<Vec<DriveFile>> {
            Ok(vec![DriveFile {
                id: "a".into(),
                name: "Guide".into(),
                mime_type: None,
                size: None,
                modified_time: None,
                status: None,
            }])
        }

        async fn rebuild(&self, request: &RebuildRequest) -> CoreResult<RebuildReport> {
            self.rebuilds.lock().unwrap().push(request.clone());
            Ok(RebuildReport {
                status: "completed".into(),
                processed_files: 1,
                failed_files: 0,
                files_details: vec![FileDetail {
                    id: "a".into(),
                    status: "processed".into(),
                }],
            })
        }

        async fn probe_answers(&self) -> CoreResult<bool> {
            Ok(true)
        }
    }

    #[test]
    fn test_prompt_mentions_scope() {
        let all = RebuildRequest::new("folder", 25, vec![]);
        assert!(confirmation_prompt(&all).contains("every document"));

        let some = RebuildRequest::new("folder", 25, vec!["a".into(), "b".into()]);
        assert_eq!(confirmation_prompt(&some), "Re-index 2 selected file(s)?");
    }

    #[test]
    fn test_report_line() {
        colored::control::set_override(false);
        let report = RebuildReport {
            status: "completed".into(),
            processed_files: 4,
            failed_files: 1,
            files_details: vec![],
        };
        assert_eq!(report_line(&report), "Rebuild completed: 4 processed, 1 failed");
    }

    #[tokio::test]
    async fn test_rebuild_sends_request_once() {
        let fake = FakeDashboard::default();
        let request = RebuildRequest::new("folder", 25, vec!["a".into()]);

        rebuild(&fake, &request, Output::default()).await.unwrap();

        let sent = fake.rebuilds.lock().unwrap().clone();
        assert_eq!(sent, vec![request]);
    }
}
