use clap::ValueEnum;

pub mod commands;
pub mod utils;

// Re-export dspreset for external use
pub use dspreset;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}
