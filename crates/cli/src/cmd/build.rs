//! Implementation of the `golift build` command.
//!
//! Loads the project, resolves build options, then runs the build phase:
//! entrypoint generation for every symbol handler, followed by one compiler
//! invocation per selected function, in declared order.

use std::path::Path;

use anyhow::{Context, Result};

use golift_lib::build::run_build;
use golift_lib::config::Config;
use golift_lib::exec::ShellRunner;

use crate::cmd::load_project;
use crate::output;

/// Execute the build command.
///
/// Prints a summary with the number of entrypoints generated and functions
/// built. The first failing compiler invocation aborts the run; its command
/// line is part of the error output so it can be rerun by hand.
pub fn cmd_build(project_file: &Path, function: Option<&str>) -> Result<()> {
  let (project, project_root) = load_project(project_file)?;
  let config = Config::resolve(&project.build);
  let runner = ShellRunner::in_dir(&project_root);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let summary = rt
    .block_on(run_build(&project, &config, &project_root, function, &runner))
    .context("Build failed")?;

  output::print_success("Build complete!");
  output::print_stat("Entrypoints generated", &summary.entrypoints_generated.to_string());
  output::print_stat("Functions built", &summary.functions_built.to_string());

  Ok(())
}
