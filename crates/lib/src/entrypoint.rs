//! Handler classification and derived output paths.
//!
//! A handler string denotes one of two things:
//! - a standalone Go program (`legacy/main.go`) that compiles as-is, or
//! - a library function reference (`entrypoints/widget.Handle`) that needs a
//!   generated program invoking the exported symbol.
//!
//! Everything here is pure path algebra: no I/O, deterministic, safe to call
//! repeatedly.

use crate::config::Config;
use crate::consts::{GENERATED_FILE_NAME, GO_SOURCE_SUFFIX};
use crate::project::FunctionDescriptor;

/// A handler that names an exported symbol, with the paths derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointSpec {
  /// Package path portion of the handler, e.g. `entrypoints/widget`.
  pub module_path: String,

  /// Last segment of the package path, used as the import alias.
  pub module_name: String,

  /// Name of the exported function to invoke.
  pub symbol: String,

  /// Where the generated program is written, relative to the project root.
  /// Joins the generation root, the module path, and the symbol, so two
  /// symbols in the same package never collide.
  pub generated_file: String,
}

/// Decide whether a descriptor needs a generated entrypoint.
///
/// Returns `None` for descriptors that are not this pipeline's concern:
/// no handler, no dot in the handler, a `.go` handler that is already a
/// standalone program, or a malformed reference (empty package portion, or a
/// path separator after the last dot). Such descriptors are skipped, not
/// errors.
pub fn classify(descriptor: &FunctionDescriptor, config: &Config) -> Option<EntryPointSpec> {
  let handler = descriptor.handler.as_deref()?;
  let (module_path, trailing) = handler.rsplit_once('.')?;

  if trailing == GO_SOURCE_SUFFIX {
    return None;
  }
  if module_path.is_empty() || trailing.contains('/') {
    return None;
  }

  let module_name = module_path.rsplit('/').next().unwrap_or(module_path).to_string();
  let generated_file = format!(
    "{}/{}/{}/{}",
    config.generated_path, module_path, trailing, GENERATED_FILE_NAME
  );

  Some(EntryPointSpec {
    module_path: module_path.to_string(),
    module_name,
    symbol: trailing.to_string(),
    generated_file,
  })
}

/// Path of the compiled binary for a handler, under the configured bin root.
///
/// The trailing dot segment is stripped (`.go` for standalone sources, the
/// symbol name for library references); a handler without a dot joins as-is.
pub fn output_binary(handler: &str, config: &Config) -> String {
  let stem = handler.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(handler);
  format!("{}/{}", config.bin_path, stem)
}
