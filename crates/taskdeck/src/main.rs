//! CLI entry point for taskdeck.

use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use commands::TaskService;
use config::{ApiOverrides, ProjectConfig};
use tasks::StatusFilter;

mod commands;
mod config;
mod tasks;
mod tui;

/// Terminal front end for a task API.
#[derive(Parser, Debug)]
#[command(
    name = "taskdeck",
    version,
    about = "taskdeck: browse and complete tasks served by a JSON API"
)]
struct Cli {
    /// Directory holding `.taskdeck/config.toml` (defaults to current).
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Base URL of the task API; overrides the config file.
    #[arg(long, conflicts_with = "data_file")]
    api_url: Option<String>,

    /// JSON file to serve tasks from instead of an HTTP API.
    #[arg(long)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tasks.
    Ls {
        /// Only list tasks with this status.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
        /// Output format.
        #[arg(long, value_enum, default_value_t = LsFormat::Table)]
        format: LsFormat,
    },

    /// Show a single task as JSON.
    Show {
        #[arg(long)]
        task: u64,
    },

    /// Mark a task as done.
    Done {
        #[arg(long)]
        task: u64,
        /// Reopen the task instead.
        #[arg(long)]
        undo: bool,
    },

    /// Poll the task list and print a summary after every refresh.
    Watch {
        /// Seconds between refreshes; defaults to `fetch.poll_interval_secs` or 5.
        #[arg(long)]
        interval_secs: Option<u64>,
        /// Stop after this many refreshes (at least 1).
        #[arg(long)]
        limit: Option<NonZeroUsize>,
    },

    /// Launch interactive terminal UI.
    Tui,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LsFormat {
    Table,
    Json,
}

const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_secs(5);

fn main() -> Result<()> {
    let Cli {
        dir,
        api_url,
        data_file,
        cmd,
    } = Cli::parse();

    if should_install_tracing(&cmd) {
        install_tracing();
    }

    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    let overrides = ApiOverrides { api_url, data_file };
    execute_command(&dir, &overrides, cmd)
}

fn execute_command(dir: &std::path::Path, overrides: &ApiOverrides, command: Command) -> Result<()> {
    let config = ProjectConfig::load(dir)?;
    let client = Arc::new(config.client(overrides)?);
    let runtime = tokio::runtime::Runtime::new()?;

    match command {
        Command::Tui => tui::run(&runtime, client, &config),
        other => {
            let service = TaskService::new(client, config.fetch.clone());
            let mut stdout = io::stdout().lock();
            runtime.block_on(commands::run(other, &service, &mut stdout))
        }
    }
}

const fn should_install_tracing(cmd: &Command) -> bool {
    !matches!(cmd, Command::Tui)
}

fn install_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}
