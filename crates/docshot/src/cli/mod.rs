//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{CaptureCommand, PublishCommand};

/// Docshot - documentation preview screenshots for CI
#[derive(Debug, Parser)]
#[command(name = "docshot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress output; errors and results are still printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a markdown document in the doc preview tool and screenshot it
    Capture(CaptureCommand),

    /// Upload screenshots to S3 and print their URLs as JSON
    Publish(PublishCommand),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub fn execute(&self) -> anyhow::Result<i32> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match &self.command {
            Commands::Capture(cmd) => cmd.execute(self),
            Commands::Publish(cmd) => cmd.execute(self),
        }
    }
}
