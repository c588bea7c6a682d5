use super::Output;
use super::utils::print_json;
use anyhow::Result;
use colored::Colorize;
use devcon_core::dashboard::{DashboardBackend, HealthReport, IndexStats, document_count};
use serde_json::json;

pub async fn status(client: &dyn DashboardBackend, folder_id: &str, output: Output) -> Result<()> {
    let (health, documents) = overview(client, folder_id).await?;
    if output.json {
        return print_json(&json!({ "health": health, "document_count": documents }));
    }
    for line in health_lines(&health, documents) {
        println!("{}", line);
    }
    Ok(())
}

/// Health is required; stats and the file listing only refine the document count.
async fn overview(client: &dyn DashboardBackend, folder_id: &str) -> Result<(HealthReport, u64)> {
    let health = client.health().await?;
    let stats = match client.stats().await {
        Ok(stats) => Some(stats),
        Err(err) => {
            tracing::warn!(error = %err, "Index stats unavailable");
            None
        }
    };
    let files = match client.fetch_files(folder_id).await {
        Ok(files) => files,
        Err(err) => {
            tracing::warn!(error = %err, "File listing unavailable");
            Vec::new()
        }
    };
    let documents = document_count(Some(&health), stats.as_ref(), &files);
    Ok((health, documents))
}

pub async fn stats(client: &dyn DashboardBackend, output: Output) -> Result<()> {
    let stats = client.stats().await?;
    if output.json {
        return print_json(&serde_json::to_value(&stats)?);
    }
    for line in stats_lines(&stats) {
        println!("{}", line);
    }
    Ok(())
}

pub async fn test_rag(client: &dyn DashboardBackend) -> Result<()> {
    if client.probe_answers().await? {
        println!("{}", "✅ RAG system has embedded documents and is answering.".green());
    } else {
        println!(
            "{}",
            "⚠️ RAG system responded but has no indexed documents to answer from.".yellow()
        );
    }
    Ok(())
}

fn health_lines(health: &HealthReport, documents: u64) -> Vec<String> {
    let status = health.status.as_deref().unwrap_or("unknown");
    let rag = health.rag_status.as_deref().unwrap_or("unknown");
    let rag = if health.is_ready() {
        rag.green().to_string()
    } else {
        rag.yellow().to_string()
    };
    vec![
        format!("Service:    {}", status),
        format!("RAG engine: {}", rag),
        format!("Documents:  {}", documents),
    ]
}

fn stats_lines(stats: &IndexStats) -> Vec<String> {
    let mut lines = vec![
        format!("Status:     {}", stats.status),
        format!("Documents:  {}", stats.document_count),
    ];
    if let Some(error) = &stats.error {
        lines.push(format!("Error:      {}", error.red()));
    }
    lines
}
