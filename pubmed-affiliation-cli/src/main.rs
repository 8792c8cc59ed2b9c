use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use pubmed_affiliation::PubMedError;
use tracing::error;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "get-papers-list",
    about = "Fetch research papers with pharmaceutical/biotech company affiliations",
    long_about = "Searches PubMed and keeps papers where at least one author is affiliated \
                  with a pharmaceutical or biotech company. Results go to a CSV file or the console."
)]
struct Cli {
    #[command(flatten)]
    papers: commands::papers::Papers,

    /// Print debug information during execution
    #[arg(short, long)]
    debug: bool,

    /// API key for NCBI E-utilities (increases rate limit)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Email for NCBI requests (required by NCBI)
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", default_value = "PubMedAffiliationFilter")]
    tool: String,

    /// Maximum requests per second (default: 3, or 10 with an API key)
    #[arg(long)]
    rate_limit: Option<f64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing with indicatif layer for progress output
    let filter = if cli.debug { "debug" } else { "info" };

    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let client = commands::create_pubmed_client(
        cli.api_key.as_deref(),
        cli.email.as_deref(),
        &cli.tool,
        cli.rate_limit,
    )?;

    cli.papers.execute(&client).await
}

/// Configuration problems are user errors and go to stderr plainly
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<PubMedError>() {
        Some(e) if e.is_configuration() => eprintln!("Error: {}", e),
        _ => error!("An error occurred: {:#}", err),
    }
}
