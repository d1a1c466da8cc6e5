use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use prisma_analytics::{
    analysis::RequestOrchestrator,
    config::Config,
    headless::{run_once, HeadlessOptions},
    output::FsExporter,
    types::{AnalysisRequest, AppError},
    utils::{init_file_logger, init_stderr_logger},
};

/// AI interpretation of educational-analytics charts
#[derive(Parser, Debug)]
#[command(name = "prisma-analytics", version, about)]
struct Cli {
    /// Run a single analysis and print it instead of opening the TUI
    #[arg(long)]
    headless: bool,

    /// Topic identifier, e.g. "foco" or "grupo"
    #[arg(long, requires = "headless")]
    topic: Option<String>,

    /// Question to ask about the chart
    #[arg(long, requires = "headless")]
    question: Option<String>,

    /// Gemini API key; defaults to GOOGLE_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    /// Save the analysis as a .txt file in the export directory
    #[arg(long, requires = "headless")]
    save: bool,

    /// Print HTML instead of plain text
    #[arg(long, requires = "headless")]
    html: bool,

    /// Directory for the TUI log file; defaults to PRISMA_LOG_DIR
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(dir) = &cli.log_dir {
        config.paths.log_dir = dir.clone();
    }

    if cli.headless {
        init_stderr_logger()?;
        return run_headless(cli, config).await;
    }

    if let Some(key) = cli.api_key {
        config.llm.google_api_key = key;
    }

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = init_file_logger(&config.paths.log_dir)?;
    info!("Logging to {}", config.paths.log_dir.display());

    prisma_analytics::tui::run(config).await?;
    Ok(ExitCode::SUCCESS)
}

async fn run_headless(cli: Cli, config: Config) -> anyhow::Result<ExitCode> {
    let orchestrator = RequestOrchestrator::from_config(&config)?;
    let exporter = FsExporter::new(config.paths.export_dir.clone());

    let credential = cli.api_key.or(Some(config.llm.google_api_key.clone()));
    let request = AnalysisRequest::new(
        cli.topic.unwrap_or_default(),
        cli.question.unwrap_or_default(),
        credential,
    );
    let options = HeadlessOptions {
        html: cli.html,
        save: cli.save,
    };

    let mut stdout = std::io::stdout().lock();
    match run_once(&orchestrator, &exporter, request, &options, &mut stdout).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(AppError::Validation(message)) => {
            eprintln!("{}", message);
            Ok(ExitCode::from(2))
        }
        Err(e) => Err(e.into()),
    }
}
