//! Build configuration: user overrides merged over built-in defaults.
//!
//! The project file's `build:` section deserializes into [`RawConfig`], where
//! every field is optional. [`Config::resolve`] fills the gaps so the rest of
//! the pipeline never has to ask whether an option is set. The resolved value
//! is immutable for the whole invocation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{GOPATH_ENV, WORKSPACE_SRC_DIR};

const DEFAULT_BUILD_PREFIX: &str = "env GOOS=linux";
const DEFAULT_BUILD_CMD: &str = r#"go build -ldflags="-s -w" -o {{bin}} {{source}}"#;
const DEFAULT_TEST_CMD: &str = "go test {{test}}";
const DEFAULT_BIN_PATH: &str = "bin";
const DEFAULT_RUNTIME: &str = "go1.x";
const DEFAULT_ADAPTER_PACKAGE: &str = "github.com/aws/aws-lambda-go/lambda";
const DEFAULT_GENERATED_PATH: &str = "generatedEntrypoints";
const DEFAULT_HELPER_STARTUP_MS: u64 = 500;

/// Build options as written in the project file.
///
/// Unknown keys are ignored rather than rejected; validation of option names
/// is the caller's concern, not this type's.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawConfig {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub build_prefix: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub build_cmd: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub test_cmd: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bin_path: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub runtime: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub adapter_package: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub generated_path: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub workspace_root: Option<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub use_bin_path_for_handler: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub minimize_package: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub helpers: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub helper_startup_ms: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tests: Option<Vec<String>>,
}

/// Resolved build options. Every field has a usable value.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  /// Cross-compilation environment prefix prepended to every build command.
  pub build_prefix: String,
  /// Build command template with `{{bin}}` and `{{source}}` placeholders.
  pub build_cmd: String,
  /// Test command template with a `{{test}}` placeholder.
  pub test_cmd: String,
  /// Root directory for compiled binaries.
  pub bin_path: String,
  /// Target runtime identifier; functions on other runtimes are ignored.
  pub runtime: String,
  /// Import path of the runtime adapter every generated entrypoint uses.
  pub adapter_package: String,
  /// Root directory for generated entrypoint programs.
  pub generated_path: String,
  /// Workspace root import paths are relative to. Resolved once at
  /// construction: explicit override, else `$GOPATH/src`. `None` when
  /// neither is available; validation fails only if a wrapper actually
  /// needs it.
  pub workspace_root: Option<PathBuf>,
  /// Interpret handlers as compiled binary paths and map them back to
  /// source form before selection.
  pub use_bin_path_for_handler: bool,
  /// Rewrite package specs at predeploy to ship only the compiled binary.
  pub minimize_package: bool,
  /// Helper processes started before the test suite.
  pub helpers: Vec<String>,
  /// Delay after starting helpers, giving them time to come up.
  pub helper_startup_ms: u64,
  /// Test identifiers passed to the test command template, in order.
  pub tests: Vec<String>,
}

impl Config {
  /// Merge user overrides over the built-in defaults.
  ///
  /// Never fails, whatever subset of options the user supplied. The GOPATH
  /// fallback for the workspace root is read here, exactly once.
  pub fn resolve(raw: &RawConfig) -> Self {
    let workspace_root = raw.workspace_root.clone().or_else(default_workspace_root);

    Self {
      build_prefix: raw.build_prefix.clone().unwrap_or_else(|| DEFAULT_BUILD_PREFIX.to_string()),
      build_cmd: raw.build_cmd.clone().unwrap_or_else(|| DEFAULT_BUILD_CMD.to_string()),
      test_cmd: raw.test_cmd.clone().unwrap_or_else(|| DEFAULT_TEST_CMD.to_string()),
      bin_path: raw.bin_path.clone().unwrap_or_else(|| DEFAULT_BIN_PATH.to_string()),
      runtime: raw.runtime.clone().unwrap_or_else(|| DEFAULT_RUNTIME.to_string()),
      adapter_package: raw
        .adapter_package
        .clone()
        .unwrap_or_else(|| DEFAULT_ADAPTER_PACKAGE.to_string()),
      generated_path: raw
        .generated_path
        .clone()
        .unwrap_or_else(|| DEFAULT_GENERATED_PATH.to_string()),
      workspace_root,
      use_bin_path_for_handler: raw.use_bin_path_for_handler.unwrap_or(false),
      minimize_package: raw.minimize_package.unwrap_or(true),
      helpers: raw.helpers.clone().unwrap_or_default(),
      helper_startup_ms: raw.helper_startup_ms.unwrap_or(DEFAULT_HELPER_STARTUP_MS),
      tests: raw.tests.clone().unwrap_or_default(),
    }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self::resolve(&RawConfig::default())
  }
}

fn default_workspace_root() -> Option<PathBuf> {
  std::env::var(GOPATH_ENV).ok().map(|gopath| PathBuf::from(gopath).join(WORKSPACE_SRC_DIR))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use temp_env::with_var;

  #[test]
  #[serial]
  fn absent_overrides_fall_back_to_defaults() {
    with_var(GOPATH_ENV, None::<&str>, || {
      let config = Config::resolve(&RawConfig::default());

      assert_eq!(config.build_prefix, "env GOOS=linux");
      assert_eq!(config.build_cmd, r#"go build -ldflags="-s -w" -o {{bin}} {{source}}"#);
      assert_eq!(config.test_cmd, "go test {{test}}");
      assert_eq!(config.bin_path, "bin");
      assert_eq!(config.runtime, "go1.x");
      assert_eq!(config.adapter_package, "github.com/aws/aws-lambda-go/lambda");
      assert_eq!(config.generated_path, "generatedEntrypoints");
      assert_eq!(config.workspace_root, None);
      assert!(!config.use_bin_path_for_handler);
      assert!(config.minimize_package);
      assert!(config.helpers.is_empty());
      assert_eq!(config.helper_startup_ms, 500);
      assert!(config.tests.is_empty());
    });
  }

  #[test]
  fn present_overrides_win() {
    let raw = RawConfig {
      build_prefix: Some(String::new()),
      build_cmd: Some("go build -o {{bin}} {{source}}".to_string()),
      bin_path: Some(".bin".to_string()),
      runtime: Some("go1.21".to_string()),
      tests: Some(vec!["./...".to_string()]),
      ..RawConfig::default()
    };

    let config = Config::resolve(&raw);

    assert_eq!(config.build_prefix, "");
    assert_eq!(config.build_cmd, "go build -o {{bin}} {{source}}");
    assert_eq!(config.bin_path, ".bin");
    assert_eq!(config.runtime, "go1.21");
    assert_eq!(config.tests, vec!["./...".to_string()]);
    // Untouched options still resolve.
    assert_eq!(config.test_cmd, "go test {{test}}");
  }

  #[test]
  #[serial]
  fn workspace_root_from_gopath() {
    with_var(GOPATH_ENV, Some("/home/dev/go"), || {
      let config = Config::resolve(&RawConfig::default());
      assert_eq!(config.workspace_root, Some(PathBuf::from("/home/dev/go/src")));
    });
  }

  #[test]
  #[serial]
  fn explicit_workspace_root_beats_gopath() {
    with_var(GOPATH_ENV, Some("/home/dev/go"), || {
      let raw = RawConfig {
        workspace_root: Some(PathBuf::from("/ws/src")),
        ..RawConfig::default()
      };
      let config = Config::resolve(&raw);
      assert_eq!(config.workspace_root, Some(PathBuf::from("/ws/src")));
    });
  }

  #[test]
  fn unknown_yaml_keys_are_ignored() {
    let raw: RawConfig = serde_yaml::from_str(
      r#"
binPath: out
notARealOption: 42
"#,
    )
    .unwrap();

    assert_eq!(raw.bin_path.as_deref(), Some("out"));
  }

  #[test]
  fn camel_case_keys_deserialize() {
    let raw: RawConfig = serde_yaml::from_str(
      r#"
useBinPathForHandler: true
helperStartupMs: 1200
adapterPackage: github.com/acme/adapter
"#,
    )
    .unwrap();

    assert_eq!(raw.use_bin_path_for_handler, Some(true));
    assert_eq!(raw.helper_startup_ms, Some(1200));
    assert_eq!(raw.adapter_package.as_deref(), Some("github.com/acme/adapter"));
  }
}
