//! hss
//!
//! Command line wrapper around `StorageClient`: save a file, delete a stored
//! object, or import a remote resource into the HTTP Storage Service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use hss_client::{Locator, Settings, StorageClient, DEFAULT_MAX_REDIRECTS};

#[derive(Parser, Debug)]
#[command(name = "hss", version, about = "HTTP Storage Service client")]
struct Cli {
    /// API endpoint for writes and deletes (overrides HSS_STORAGE__API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Application storage path (overrides HSS_STORAGE__APP_PATH)
    #[arg(long, global = true)]
    app_path: Option<String>,

    /// Read/CDN endpoint for returned URLs (overrides HSS_STORAGE__READ_URL)
    #[arg(long, global = true)]
    read_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a file and print its stored URL
    Save {
        file: PathBuf,
        #[arg(long)]
        content_type: String,
    },
    /// Delete a previously stored object by URL
    Delete { url: String },
    /// Fetch a remote URI and store its body
    Import {
        uri: String,
        #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
        max_redirects: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Structured logs go to stderr; stdout carries command output only
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hss_client=info,hss=info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load().context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        settings.storage.api_url = api_url;
    }
    if let Some(app_path) = cli.app_path {
        settings.storage.app_path = app_path;
    }
    if cli.read_url.is_some() {
        settings.storage.read_url = cli.read_url;
    }

    let client = StorageClient::from_settings(&settings).context("Invalid storage configuration")?;

    info!(
        api_url = %client.config().api_url(),
        app_path = %client.config().app_path(),
        "Starting hss v{}",
        env!("CARGO_PKG_VERSION")
    );

    match cli.command {
        Command::Save { file, content_type } => {
            let payload = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let url = client.save(payload, &content_type).await?;
            println!("{}", url);
        }
        Command::Delete { url } => {
            let locator: Locator = url.parse()?;
            client.delete(&locator).await?;
        }
        Command::Import { uri, max_redirects } => {
            let url = client.import(&uri, max_redirects).await?;
            println!("{}", url);
        }
    }

    Ok(())
}
