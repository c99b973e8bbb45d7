//! Haulback CLI - pull a storefront order history into files

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{peek, run};

/// Haulback - walk your storefront order history and export it
#[derive(Parser)]
#[command(name = "haul", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the order history month by month and export the line items
    Run {
        /// Path to the run configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Path to the session channel file
        #[arg(long)]
        session: Option<PathBuf>,
        /// First month to query, as YYYY-MM (overrides the config file)
        #[arg(long)]
        start: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a single month and show its line items without exporting
    Peek {
        /// Month to query, as YYYY-MM
        period: String,
        /// Path to the run configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Path to the session channel file
        #[arg(long)]
        session: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    output::init_color();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            session,
            start,
            json,
        } => run::run(config, session, start, json),
        Commands::Peek {
            period,
            config,
            session,
            json,
        } => peek::run(&period, config, session, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
