mod cmd_analyze;
mod cmd_outcomes;
mod input;
mod render;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tributary",
    version,
    about = "Organizational interaction metrics over event logs"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every analyzer over an event log
    Analyze {
        /// JSONL event log, one interaction event per line
        #[arg(long)]
        events: PathBuf,
        /// Analysis config (.yaml, .yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Also classify actors into flow/entropy quadrants
        #[arg(long)]
        quadrants: bool,
        /// Reference time for thread age (RFC 3339; default: now)
        #[arg(long)]
        now: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify each thread's outcome
    Outcomes {
        /// JSONL event log, one interaction event per line
        #[arg(long)]
        events: PathBuf,
        /// Reference time for thread age (RFC 3339; default: now)
        #[arg(long)]
        now: Option<String>,
        /// Stall threshold in days
        #[arg(long)]
        stall_days: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tributary=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Analyze {
            events,
            config,
            quadrants,
            now,
            json,
        } => cmd_analyze::execute(&cmd_analyze::AnalyzeArgs {
            events: &events,
            config: config.as_deref(),
            quadrants,
            now: now.as_deref(),
            json,
        }),
        Command::Outcomes {
            events,
            now,
            stall_days,
            json,
        } => cmd_outcomes::execute(&events, now.as_deref(), stall_days, json),
    }
}
