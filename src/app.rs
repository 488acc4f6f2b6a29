use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::AnalysisConfig;
use crate::interfaces::cli::{self, Cli};

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AnalysisConfig::load();
    cli::execute(cli.command, config).await
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
