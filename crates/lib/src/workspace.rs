//! Workspace-relative import path computation.
//!
//! Generated entrypoints import the handler's package by the path Go resolves
//! inside the workspace, i.e. the package directory with the workspace root
//! prefix removed. A project living outside the workspace root would produce
//! a meaningless import, so that case is rejected instead of emitting a
//! program that cannot compile.

use std::path::Path;

use crate::error::{Error, Result};

/// Compute the import path for `package_dir` relative to `workspace_root`.
///
/// The result always uses forward slashes, whatever the platform separator.
///
/// # Errors
///
/// `Error::Configuration` when `package_dir` does not live under
/// `workspace_root`.
pub fn import_path(package_dir: &Path, workspace_root: &Path) -> Result<String> {
  let relative = package_dir.strip_prefix(workspace_root).map_err(|_| {
    Error::Configuration(format!(
      "module path outside workspace root: {} (root {})",
      package_dir.display(),
      workspace_root.display()
    ))
  })?;

  let segments: Vec<&str> = relative
    .components()
    .map(|c| c.as_os_str().to_str().unwrap_or_default())
    .collect();
  Ok(segments.join("/"))
}
