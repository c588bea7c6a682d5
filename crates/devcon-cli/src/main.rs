use anyhow::Result;
use clap::{Parser, Subcommand};
use devcon_infrastructure::{ConfigService, DevconPaths, LogTarget, init_logging};
use devcon_interaction::HttpDashboardClient;

mod commands;

#[derive(Parser)]
#[command(name = "devcon")]
#[command(about = "DEVCON AI admin dashboard - index status, Drive files and rebuilds", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config file and DEVCON_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service health and retrieval engine status
    Status,
    /// Show index statistics
    Stats,
    /// List documents in the indexed Drive folder
    Files {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,
        /// Only show files with this status (processed, failed, available, all)
        #[arg(long, default_value = "all")]
        status: String,
        /// Drive folder to list (defaults to the configured folder)
        #[arg(long)]
        folder: Option<String>,
    },
    /// Re-index the folder, or only the given files
    Rebuild {
        /// File id to re-index; repeat for several
        #[arg(long = "file")]
        files: Vec<String>,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Drive folder to rebuild (defaults to the configured folder)
        #[arg(long)]
        folder: Option<String>,
    },
    /// Check that the service answers from indexed documents
    TestRag,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LogTarget::Stderr);

    let config = ConfigService::new(DevconPaths::from_env())
        .with_backend_override(cli.backend_url)
        .get_config();
    tracing::debug!(backend = %config.backend_url, "Using backend");
    let client = HttpDashboardClient::new(config.clone())?;
    let output = commands::Output { json: cli.json };

    match cli.command {
        Commands::Status => {
            commands::status::status(&client, &config.drive_folder_id, output).await?
        }
        Commands::Stats => commands::status::stats(&client, output).await?,
        Commands::Files {
            search,
            status,
            folder,
        } => {
            let folder = folder.unwrap_or_else(|| config.drive_folder_id.clone());
            commands::files::list(&client, &folder, &search, &status, output).await?
        }
        Commands::Rebuild { files, yes, folder } => {
            let folder = folder.unwrap_or_else(|| config.drive_folder_id.clone());
            let request = devcon_core::dashboard::RebuildRequest::new(
                folder,
                config.rebuild_batch_size,
                files,
            );
            if !yes && !commands::utils::confirm(&commands::rebuild::confirmation_prompt(&request))? {
                println!("Rebuild cancelled.");
                return Ok(());
            }
            commands::rebuild::rebuild(&client, &request, output).await?
        }
        Commands::TestRag => commands::status::test_rag(&client).await?,
    }

    Ok(())
}
