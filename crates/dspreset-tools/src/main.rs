use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::Env;

use dspreset_tools::commands;
use dspreset_tools::OutputFormat;

#[derive(Parser)]
#[command(name = "dspreset")]
#[command(about = "Decent Sampler preset inspection and layout editing tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show control types and counts in a preset
    Info {
        /// .dspreset file to inspect
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Offset position and size of selected control types
    Nudge(commands::nudge::NudgeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger with default level (overridden by RUST_LOG)
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Info { file, format } => commands::info::execute(&file, format),
        Commands::Nudge(args) => commands::nudge::execute(args),
    }
}
