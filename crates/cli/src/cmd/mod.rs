mod build;
mod package;

pub use build::cmd_build;
pub use package::cmd_package;
pub use test::cmd_test;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use golift_lib::project::Project;

/// Load the project file and determine the project root (its directory).
fn load_project(project_file: &Path) -> Result<(Project, PathBuf)> {
  let absolute = std::path::absolute(project_file)
    .with_context(|| format!("Failed to resolve project path {}", project_file.display()))?;

  let project = Project::from_file(&absolute)
    .with_context(|| format!("Failed to load project {}", project_file.display()))?;

  let root = absolute
    .parent()
    .map(Path::to_path_buf)
    .unwrap_or_else(|| PathBuf::from("."));
  Ok((project, root))
}
