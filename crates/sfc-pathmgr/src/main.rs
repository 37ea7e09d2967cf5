//! sfpctl - service function path sequencing tool
//!
//! Applies hop ordering and service index assignment to a path collection
//! document on disk.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sfc_pathmgr::commands::{self, PathCommand};
use sfc_pathmgr::document;
use tracing::{error, info};

/// Service function path sequencing tool
#[derive(Parser, Debug)]
#[command(name = "sfpctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short = 'l', long, default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Put hops in traversal order by their stored hop numbers
    Order(Target),
    /// Number hops and assign service indexes from their list order
    Renumber(Target),
    /// Derive starting indexes from the hop lists, then renumber
    Reindex(Target),
    /// Print the number of service function hops of each path
    Count {
        /// Path collection document (JSON)
        file: PathBuf,

        /// Only report this path
        #[arg(short, long)]
        path: Option<String>,
    },
}

#[derive(Args, Debug)]
struct Target {
    /// Path collection document (JSON)
    file: PathBuf,

    /// Only process this path
    #[arg(short, long)]
    path: Option<String>,

    /// Rewrite the document instead of printing it
    #[arg(short, long)]
    in_place: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.json_logs);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("sfpctl: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    let (path_command, target) = match command {
        Command::Order(target) => (PathCommand::Order, target),
        Command::Renumber(target) => (PathCommand::Renumber, target),
        Command::Reindex(target) => (PathCommand::Reindex, target),
        Command::Count { file, path } => {
            let paths = document::read_paths(&file)?;
            for (name, count) in commands::hop_counts(&paths, path.as_deref())? {
                println!("{}\t{}", name, count);
            }
            return Ok(());
        }
    };

    let mut paths = document::read_paths(&target.file)?;
    let processed = commands::apply(path_command, &mut paths, target.path.as_deref())
        .with_context(|| format!("{} failed", path_command.as_str()))?;

    if target.in_place {
        document::write_paths(&target.file, &paths)?;
        info!(
            file = %target.file.display(),
            processed,
            "Rewrote path document"
        );
    } else {
        println!("{}", document::encode_paths(&paths)?);
    }

    Ok(())
}

fn init_logging(log_level: &str, json: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init();
    } else {
        tracing_subscriber::registry().with(filter).with(layer).init();
    }
}
