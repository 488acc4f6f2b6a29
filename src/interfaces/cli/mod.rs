pub mod report;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{debug, info};

use crate::application::WorkflowController;
use crate::infrastructure::analysis_client::HttpAnalysisClient;
use crate::infrastructure::config::AnalysisConfig;
use crate::infrastructure::storage::read_file_input;
use crate::interfaces::mock_server::{MockAnalysisService, MockResponse};

#[derive(Parser)]
#[command(
    name = "dataset-inspector",
    version,
    about = "Send a CSV or XLSX dataset to the analysis service and print its quality report"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a dataset. Only the first file is used when several are given.
    Analyze(AnalyzeArgs),

    /// Run a local stand-in for the analysis service.
    MockService(MockServiceArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Analysis service base URL (overrides DATASET_INSPECTOR_API_BASE_URL).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds (overrides DATASET_INSPECTOR_TIMEOUT_MS).
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MockServiceArgs {
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// JSON file served as the response body (defaults to a sample report).
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,

    /// HTTP status to answer with.
    #[arg(long, default_value_t = 200)]
    pub status: u16,

    /// Delay before answering, to exercise client timeouts.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

pub async fn execute(command: Command, config: AnalysisConfig) -> anyhow::Result<()> {
    match command {
        Command::Analyze(args) => analyze(args, config).await,
        Command::MockService(args) => mock_service(args).await,
    }
}

async fn analyze(args: AnalyzeArgs, config: AnalysisConfig) -> anyhow::Result<()> {
    let config = config.with_overrides(args.base_url, args.timeout_ms);
    info!(
        endpoint = %config.endpoint(),
        timeout_ms = config.timeout().as_millis() as u64,
        "Using analysis service"
    );

    let mut inputs = Vec::with_capacity(1);
    if let Some((first, rest)) = args.files.split_first() {
        if !rest.is_empty() {
            debug!(
                file = %first.display(),
                discarded = rest.len(),
                "Multiple files given, keeping the first"
            );
        }
        inputs.push(read_file_input(first).await?);
    }

    let client = HttpAnalysisClient::new(&config);
    let mut controller = WorkflowController::new(config.timeout());

    if let Err(err) = controller.select(inputs) {
        bail!(err.user_message());
    }
    let file_name = controller
        .candidate()
        .map(|candidate| format!("{} ({})", candidate.name(), candidate.display_size()))
        .unwrap_or_default();

    match controller.analyze(&client).await {
        Ok(result) => {
            if args.json {
                let json = serde_json::to_string_pretty(&result)
                    .context("Failed to serialize analysis result")?;
                println!("{}", json);
            } else {
                print!("{}", report::render(&file_name, &result));
            }
            Ok(())
        }
        Err(err) => bail!(err.user_message()),
    }
}

async fn mock_service(args: MockServiceArgs) -> anyhow::Result<()> {
    let mut response = match &args.fixture {
        Some(path) => MockResponse::from_fixture(path, args.status)?,
        None if args.status == 200 => MockResponse::default(),
        None => MockResponse::new(args.status, r#"{"detail":"mock failure"}"#),
    };
    response.delay_ms = args.delay_ms;

    let service = MockAnalysisService::start(args.port, response).await?;
    println!(
        "Mock analysis service listening on {}/analyze_dataset/ (Ctrl-C to stop)",
        service.base_url()
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    service.stop().await;
    Ok(())
}
