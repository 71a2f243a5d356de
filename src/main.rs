use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use askdocs::{QueryClient, QueryClientBuilder, QueryForm, SubmitOutcome, logging, tui};
use clap::{Parser, Subcommand};

/// askdocs - ask questions about your documents from the terminal
#[derive(Parser)]
#[command(name = "askdocs")]
#[command(about = "Ask questions about your documents from the terminal")]
#[command(version)]
struct Cli {
    /// Query endpoint URL (overrides ASKDOCS_ENDPOINT)
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,

    /// Give up on a request after this many seconds (default: wait indefinitely)
    #[arg(long, global = true, value_name = "SECONDS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Launch interactive terminal UI (default)
    Tui,
    /// Ask a single question and print the answer
    Ask(AskCommand),
}

/// Ask a single question
#[derive(Parser)]
struct AskCommand {
    /// The question to send; may be empty
    #[arg(value_name = "QUERY")]
    query: String,
}

fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match cli.command {
        None | Some(Commands::Tui) => handle_tui(cli.endpoint, cli.timeout_secs),
        Some(Commands::Ask(cmd)) => handle_ask(&cmd, cli.endpoint, cli.timeout_secs),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}

/// Builds the query client from command-line overrides.
///
/// Anything not given on the command line falls back to the environment and
/// then to the built-in default.
fn build_client(endpoint: Option<String>, timeout_secs: Option<u64>) -> Result<QueryClient> {
    let mut builder = QueryClientBuilder::new();
    if let Some(url) = endpoint {
        builder = builder.endpoint(url);
    }
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().context("Failed to create query client")
}

/// Runs the interactive form. Logs go to a file so the terminal stays clean.
fn handle_tui(endpoint: Option<String>, timeout_secs: Option<u64>) -> Result<i32> {
    let log_path = logging::get_log_path()?;
    logging::init_file_logging(&log_path)?;

    let client = build_client(endpoint, timeout_secs)?;
    tui::run(Arc::new(client))?;
    Ok(0)
}

/// Submits one question and prints what the form would display.
///
/// Exits 0 when an answer arrived and 1 when the query failed.
fn handle_ask(
    cmd: &AskCommand,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<i32> {
    logging::init_stderr_logging()?;

    let client = build_client(endpoint, timeout_secs)?;
    let mut form = QueryForm::new();
    form.on_query_change(cmd.query.as_str());

    let outcome = form.submit(&client);
    println!("{}", form.answer());

    Ok(match outcome {
        Some(SubmitOutcome::Answered) => 0,
        Some(SubmitOutcome::Failed) | None => 1,
    })
}
