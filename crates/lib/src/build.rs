//! Build phase orchestration.
//!
//! Sequencing contract: every required entrypoint is validated and generated
//! before any compilation starts, then the selected functions compile one at
//! a time in declared order. The first failure halts the phase; artifacts
//! already produced are left in place.

use std::path::Path;

use tracing::{debug, error, info};

use crate::codegen;
use crate::config::Config;
use crate::entrypoint::{EntryPointSpec, classify, output_binary};
use crate::error::{Error, Result};
use crate::exec::{CommandRunner, RunError};
use crate::project::{FunctionDescriptor, Registry};
use crate::select::select_functions;
use crate::template::CommandSpec;
use crate::workspace;

/// Counters from a completed build run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
  /// Functions whose build command ran successfully.
  pub functions_built: usize,

  /// Entrypoint programs written before compilation.
  pub entrypoints_generated: usize,
}

/// Run the build phase for the selected functions.
///
/// `project_root` is the directory the project file lives in; generated files
/// and build commands are relative to it.
pub async fn run_build<R: Registry, C: CommandRunner>(
  registry: &R,
  config: &Config,
  project_root: &Path,
  function: Option<&str>,
  runner: &C,
) -> Result<BuildSummary> {
  let selected = select_functions(registry, function, config)?;

  let classified: Vec<(FunctionDescriptor, Option<EntryPointSpec>)> = selected
    .into_iter()
    .map(|f| {
      let spec = classify(&f, config);
      (f, spec)
    })
    .collect();

  let mut summary = BuildSummary::default();

  // Wrapper generation is a precondition of building: validate and write
  // every entrypoint before the first compiler invocation.
  for (descriptor, spec) in &classified {
    let Some(spec) = spec else { continue };

    let workspace_root = config.workspace_root.as_deref().ok_or_else(|| {
      Error::Configuration("workspace root not configured and GOPATH is not set".to_string())
    })?;
    let package_dir = project_root.join(&spec.module_path);
    let import = workspace::import_path(&package_dir, workspace_root)?;

    codegen::write_entrypoint(project_root, spec, &import, config).await?;
    debug!(function = %descriptor.name, file = %spec.generated_file, "entrypoint ready");
    summary.entrypoints_generated += 1;
  }

  for (descriptor, spec) in &classified {
    let Some(handler) = descriptor.handler.as_deref() else {
      debug!(function = %descriptor.name, "no handler, skipping");
      continue;
    };

    let source = spec.as_ref().map(|s| s.generated_file.as_str()).unwrap_or(handler);
    let binary = output_binary(handler, config);

    let command = CommandSpec::prefixed(&config.build_prefix, &config.build_cmd)
      .var("bin", binary)
      .var("source", source)
      .render()?;

    match runner.run(&command).await {
      Ok(()) => summary.functions_built += 1,
      Err(RunError::Exit { code }) => {
        error!(cmd = %command, code = ?code, "build command failed");
        return Err(Error::Compile { command, code });
      }
      Err(RunError::Io(e)) => return Err(Error::Io(e)),
    }
  }

  info!(
    built = summary.functions_built,
    generated = summary.entrypoints_generated,
    "build phase complete"
  );
  Ok(summary)
}
