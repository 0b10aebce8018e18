//! Function selection: which descriptors the pipeline operates on.

use tracing::debug;

use crate::config::Config;
use crate::consts::GO_SOURCE_SUFFIX;
use crate::error::{Error, Result};
use crate::project::{FunctionDescriptor, Registry};

/// Select the functions a build or test run targets.
///
/// With a requested name, the result is exactly that descriptor; the runtime
/// filter does not apply (asking for a function by name is an explicit
/// choice). Without one, every declared descriptor is considered in declared
/// order, then filtered: a descriptor passes when its own runtime equals the
/// target, or when it declares none and the project default equals the
/// target. A project configured for a different default runtime therefore
/// only contributes functions that explicitly opt in.
///
/// When `use_bin_path_for_handler` is set, handlers are first mapped from
/// compiled-binary form back to source form: the bin path prefix is stripped
/// and the Go source suffix appended. The rewrite is purely textual and never
/// consults the filesystem.
///
/// Returns owned clones; the registry is never mutated.
pub fn select_functions<R: Registry>(
  registry: &R,
  requested: Option<&str>,
  config: &Config,
) -> Result<Vec<FunctionDescriptor>> {
  let candidates: Vec<FunctionDescriptor> = match requested {
    Some(name) => {
      let descriptor = registry
        .function(name)
        .ok_or_else(|| Error::UnknownFunction(name.to_string()))?;
      vec![descriptor.clone()]
    }
    None => registry
      .function_names()
      .iter()
      .filter_map(|name| registry.function(name))
      .cloned()
      .collect(),
  };

  let candidates: Vec<FunctionDescriptor> = if config.use_bin_path_for_handler {
    candidates
      .into_iter()
      .map(|f| remap_bin_handler(f, &config.bin_path))
      .collect()
  } else {
    candidates
  };

  if requested.is_some() {
    return Ok(candidates);
  }

  let default_runtime = registry.default_runtime();
  let selected: Vec<FunctionDescriptor> = candidates
    .into_iter()
    .filter(|f| matches_runtime(f, default_runtime, &config.runtime))
    .collect();

  debug!(count = selected.len(), runtime = %config.runtime, "functions selected");
  Ok(selected)
}

fn matches_runtime(descriptor: &FunctionDescriptor, default_runtime: Option<&str>, target: &str) -> bool {
  match descriptor.runtime.as_deref() {
    Some(runtime) => runtime == target,
    None => default_runtime == Some(target),
  }
}

fn remap_bin_handler(mut descriptor: FunctionDescriptor, bin_path: &str) -> FunctionDescriptor {
  if let Some(handler) = descriptor.handler.as_deref() {
    let prefix = format!("{}/", bin_path);
    let stripped = handler.strip_prefix(&prefix).unwrap_or(handler);
    descriptor.handler = Some(format!("{}.{}", stripped, GO_SOURCE_SUFFIX));
  }
  descriptor
}
