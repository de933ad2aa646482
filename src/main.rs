use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitalrisk::config::{api_key_from_env, resolve_config, BASE_URL_ENV};
use vitalrisk::{run_assessment, AssessmentApi, HttpAssessmentClient};

#[derive(Parser)]
#[command(name = "vitalrisk")]
#[command(about = "Scores patient risk from the assessment API and submits the result")]
struct Cli {
    /// YAML configuration file (defaults to ./config.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Fetch and classify without submitting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitalrisk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = resolve_config(cli.config.as_deref())?;
    config.apply_overrides(std::env::var(BASE_URL_ENV).ok(), cli.base_url)?;

    let api_key = api_key_from_env()?;
    let client = HttpAssessmentClient::from_config(&config, api_key);
    tracing::info!(base_url = client.base_url(), "starting assessment run");

    let classification = run_assessment(&client).await?;

    println!("Submission Data:");
    println!("{}", serde_json::to_string_pretty(&classification)?);

    if cli.dry_run {
        tracing::info!("dry run, skipping submission");
        return Ok(());
    }

    match client.submit(&classification).await {
        Ok(receipt) => {
            println!("{} {}", receipt.status, serde_json::to_string_pretty(&receipt.body)?);
        }
        Err(err) => {
            // Submission failures end the run without a retry.
            match err.status() {
                Some(status) => tracing::error!(status, error = %err, "submission rejected"),
                None => tracing::error!(error = %err, "submission failed"),
            }
        }
    }

    Ok(())
}
