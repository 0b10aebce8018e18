//! Project file types: the declarative description of a service.
//!
//! The project file (`golift.yml` by convention) names the service, its
//! default runtime, build options, and the deployable functions. Functions
//! are a sequence, not a map: declared order determines build sequencing,
//! which is visible in the command stream, so it must survive
//! deserialization.
//!
//! # Example
//!
//! ```yaml
//! service: orders
//! runtime: go1.x
//! build:
//!   tests: ["./..."]
//! functions:
//!   - name: create
//!     handler: entrypoints/orders.Create
//!   - name: legacy
//!     handler: legacy/main.go
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::RawConfig;
use crate::error::{Error, Result};

/// Packaging directives for a single function.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSpec {
  /// Package this function separately from the rest of the service.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub individually: Option<bool>,

  /// Patterns to include in the deployment artifact.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub include: Vec<String>,

  /// Patterns to exclude from the deployment artifact.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub exclude: Vec<String>,
}

/// One deployable function as declared in the project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
  pub name: String,

  /// Path to a Go source file, a `pkg/path.Symbol` reference, or (after
  /// predeploy) a compiled binary.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub handler: Option<String>,

  /// Runtime override; inherits the project default when absent.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub runtime: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub package: Option<PackageSpec>,
}

impl FunctionDescriptor {
  pub fn new(name: impl Into<String>, handler: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      handler: Some(handler.into()),
      runtime: None,
      package: None,
    }
  }
}

/// The evaluated project: service metadata plus declared functions in order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
  pub service: String,

  /// Default runtime inherited by functions without an explicit one.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub runtime: Option<String>,

  /// Build options; every field falls back to a built-in default.
  #[serde(default)]
  pub build: RawConfig,

  #[serde(default)]
  pub functions: Vec<FunctionDescriptor>,
}

impl Project {
  /// Load and parse a project file.
  pub fn from_file(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content)
      .map_err(|e| Error::Configuration(format!("invalid project file {}: {}", path.display(), e)))
  }
}

/// Read access to the declared functions of a project.
///
/// The orchestrator consumes this seam instead of [`Project`] directly so
/// tests can supply registries without touching the filesystem.
pub trait Registry {
  /// Declared function names, in declaration order.
  fn function_names(&self) -> Vec<String>;

  /// Fetch one descriptor by name.
  fn function(&self, name: &str) -> Option<&FunctionDescriptor>;

  /// The project-level default runtime, if any.
  fn default_runtime(&self) -> Option<&str>;
}

impl Registry for Project {
  fn function_names(&self) -> Vec<String> {
    self.functions.iter().map(|f| f.name.clone()).collect()
  }

  fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
    self.functions.iter().find(|f| f.name == name)
  }

  fn default_runtime(&self) -> Option<&str> {
    self.runtime.as_deref()
  }
}
