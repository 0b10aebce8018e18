//! Generated entrypoint programs.
//!
//! A library function reference has no `main`; this module writes the minimal
//! program that imports the runtime adapter and hands it the exported symbol.
//! Generation is deterministic: identical inputs produce identical bytes, so
//! regenerating over an existing file is a no-op rewrite.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::config::Config;
use crate::entrypoint::EntryPointSpec;
use crate::error::{Error, Result};
use crate::template;

const ENTRYPOINT_TEMPLATE: &str = r#"package main

import (
	"{{adapter}}"

	{{module}} "{{import}}"
)

func main() {
	{{start}}.Start({{module}}.{{symbol}})
}
"#;

/// Render the entrypoint program for `spec`.
///
/// `import_path` is the workspace-relative path of the handler's package; the
/// adapter package and its short name come from the configuration.
pub fn render_entrypoint(spec: &EntryPointSpec, import_path: &str, config: &Config) -> Result<String> {
  let start = config
    .adapter_package
    .rsplit('/')
    .next()
    .unwrap_or(config.adapter_package.as_str());

  let source = template::render(
    ENTRYPOINT_TEMPLATE,
    &[
      ("adapter", config.adapter_package.as_str()),
      ("start", start),
      ("module", spec.module_name.as_str()),
      ("import", import_path),
      ("symbol", spec.symbol.as_str()),
    ],
  )?;
  Ok(source)
}

/// Write the generated program to its derived path under `project_root`,
/// creating parent directories as needed.
///
/// Filesystem failures surface as [`Error::Generation`] carrying the target
/// path.
pub async fn write_entrypoint(
  project_root: &Path,
  spec: &EntryPointSpec,
  import_path: &str,
  config: &Config,
) -> Result<PathBuf> {
  let source = render_entrypoint(spec, import_path, config)?;
  let path = project_root.join(&spec.generated_file);

  let write = async {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).await?;
    }
    fs::write(&path, source).await
  };

  write.await.map_err(|e| Error::Generation {
    path: spec.generated_file.clone(),
    message: e.to_string(),
  })?;

  debug!(path = %path.display(), symbol = %spec.symbol, "entrypoint generated");
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entrypoint::classify;
  use crate::project::FunctionDescriptor;
  use tempfile::TempDir;

  fn widget_spec(config: &Config) -> EntryPointSpec {
    classify(&FunctionDescriptor::new("f", "entrypoints/widget.Handle"), config).unwrap()
  }

  #[test]
  fn renders_adapter_import_and_symbol_invocation() {
    let config = Config::default();
    let spec = widget_spec(&config);

    let source = render_entrypoint(&spec, "orders/entrypoints/widget", &config).unwrap();

    assert!(source.starts_with("package main"));
    assert!(source.contains(r#""github.com/aws/aws-lambda-go/lambda""#));
    assert!(source.contains(r#"widget "orders/entrypoints/widget""#));
    assert!(source.contains("lambda.Start(widget.Handle)"));
  }

  #[test]
  fn adapter_short_name_follows_configured_package() {
    let mut config = Config::default();
    config.adapter_package = "github.com/acme/runtime".to_string();
    let spec = widget_spec(&config);

    let source = render_entrypoint(&spec, "orders/entrypoints/widget", &config).unwrap();
    assert!(source.contains("runtime.Start(widget.Handle)"));
  }

  #[tokio::test]
  async fn writes_to_derived_path() {
    let config = Config::default();
    let spec = widget_spec(&config);
    let root = TempDir::new().unwrap();

    let path = write_entrypoint(root.path(), &spec, "orders/entrypoints/widget", &config)
      .await
      .unwrap();

    assert_eq!(
      path,
      root.path().join("generatedEntrypoints/entrypoints/widget/Handle/main.go")
    );
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("lambda.Start(widget.Handle)"));
  }

  #[tokio::test]
  async fn regeneration_is_byte_identical() {
    let config = Config::default();
    let spec = widget_spec(&config);
    let root = TempDir::new().unwrap();

    let path = write_entrypoint(root.path(), &spec, "orders/entrypoints/widget", &config)
      .await
      .unwrap();
    let first = std::fs::read(&path).unwrap();

    write_entrypoint(root.path(), &spec, "orders/entrypoints/widget", &config)
      .await
      .unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
  }

  #[tokio::test]
  async fn unwritable_target_is_a_generation_error() {
    let config = Config::default();
    let spec = widget_spec(&config);
    let root = TempDir::new().unwrap();

    // Occupy the generation root with a file so create_dir_all fails.
    std::fs::write(root.path().join("generatedEntrypoints"), "not a directory").unwrap();

    let err = write_entrypoint(root.path(), &spec, "orders/entrypoints/widget", &config)
      .await
      .unwrap_err();

    assert!(matches!(err, Error::Generation { ref path, .. }
      if path == "generatedEntrypoints/entrypoints/widget/Handle/main.go"));
  }
}
