use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

/// golift - build orchestrator for Go function services
#[derive(Parser)]
#[command(name = "golift")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to the project file
  #[arg(short, long, global = true, default_value = "golift.yml")]
  project: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate entrypoints and compile the selected functions
  Build {
    /// Build only this function
    function: Option<String>,
  },

  /// Start helpers and run the configured test suite
  Test {
    /// Require this function to be declared before running
    function: Option<String>,
  },

  /// Print the project with descriptors rewritten to ship compiled binaries
  Package {
    /// Rewrite only this function
    function: Option<String>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // Initialize logging; --verbose raises the default filter.
  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt().with_env_filter(filter).without_time().init();

  match cli.command {
    Commands::Build { function } => cmd::cmd_build(&cli.project, function.as_deref()),
    Commands::Test { function } => cmd::cmd_test(&cli.project, function.as_deref()),
    Commands::Package { function } => cmd::cmd_package(&cli.project, function.as_deref()),
  }
}
