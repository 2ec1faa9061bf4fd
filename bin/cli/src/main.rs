//! skein: run workflow graphs from the command line.
//!
//! Live messaging and notes connectors are owned by the platform; the CLI
//! records what a run would post or create and prints it after the trace.

mod config;

use clap::{Parser, Subcommand};
use config::RunnerConfig;
use skein_engine::{Collaborators, Engine, EngineSettings, RunContext};
use skein_integrations::{RecordingNotes, RecordingSink};
use skein_providers::{
    ChatClient, CredentialChain, ProviderClient, ProviderKind, ScriptedChat, StaticCredentials,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "skein", about = "Run workflow graphs", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Execute a workflow graph from a JSON file.
    Run {
        /// Path to the serialized `{nodes, edges}` graph.
        graph: PathBuf,
        /// Free-form run input; becomes the initial carried value.
        #[arg(long)]
        input: Option<String>,
        /// Pre-selected messaging channel; repeatable. Takes priority over
        /// channels in node metadata.
        #[arg(long = "channel")]
        channels: Vec<String>,
        /// Use a deterministic in-memory model instead of live providers.
        #[arg(long)]
        dry_run: bool,
    },
}

// Leading `::` distinguishes the config crate from our `config` module.
use ::config::ConfigError;

/// Errors the CLI can fail with before a run starts.
#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Io { path: PathBuf, reason: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Io { path, reason } => {
                write!(f, "could not read {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for CliError {}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            graph,
            input,
            channels,
            dry_run,
        } => match run_workflow(&graph, input, channels, dry_run).await {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Runs one workflow and prints the trace. Returns the run's success flag.
async fn run_workflow(
    path: &Path,
    input: Option<String>,
    channels: Vec<String>,
    dry_run: bool,
) -> Result<bool, CliError> {
    let config = RunnerConfig::from_env().map_err(CliError::Config)?;
    let raw = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let chat: Arc<dyn ChatClient> = if dry_run {
        Arc::new(ScriptedChat::echoing())
    } else {
        let credentials =
            CredentialChain::standard(StaticCredentials::from(config.api_keys.clone()));
        Arc::new(
            ProviderClient::new(credentials)
                .with_base_url(ProviderKind::Ollama, config.ollama_url.clone()),
        )
    };
    let sink = Arc::new(RecordingSink::new());
    let notes = Arc::new(RecordingNotes::new());

    let engine = Engine::new(Collaborators::new(chat, sink.clone(), notes.clone()))
        .with_settings(EngineSettings::default().with_max_steps(config.max_steps));

    let mut context = RunContext::new().with_channels(channels);
    if let Some(input) = input {
        context = context.with_input(input);
    }

    let report = engine.execute_serialized(&raw, &context).await;

    for line in &report.logs {
        println!("{line}");
    }
    for (post_channels, body) in sink.posts() {
        println!("-> would post to {}: {body}", post_channels.join(", "));
    }
    for (destination, title, _body) in notes.entries() {
        println!("-> would create note '{title}' in {destination}");
    }
    println!(
        "{}: {}",
        if report.success { "ok" } else { "failed" },
        report.message
    );

    Ok(report.success)
}
