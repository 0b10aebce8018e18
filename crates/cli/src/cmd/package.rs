//! Implementation of the `golift package` command.
//!
//! Applies the predeploy rewrite to the selected functions and prints the
//! resulting project. The rewrite itself is pure; substituting the new
//! descriptors back into the project happens here, at the caller.

use std::path::Path;

use anyhow::{Context, Result};

use golift_lib::config::Config;
use golift_lib::package::prepare_for_packaging;
use golift_lib::select::select_functions;

use crate::cmd::load_project;

/// Execute the package command.
pub fn cmd_package(project_file: &Path, function: Option<&str>) -> Result<()> {
  let (project, _project_root) = load_project(project_file)?;
  let config = Config::resolve(&project.build);

  let selected = select_functions(&project, function, &config).context("Selection failed")?;

  let mut rewritten = project.clone();
  for descriptor in &selected {
    let packaged = prepare_for_packaging(descriptor, &config);
    if let Some(slot) = rewritten.functions.iter_mut().find(|f| f.name == packaged.name) {
      *slot = packaged;
    }
  }

  let yaml = serde_yaml::to_string(&rewritten).context("Failed to serialize project")?;
  print!("{}", yaml);

  Ok(())
}
