//! Error types for golift-lib.

use thiserror::Error;

use crate::template::TemplateError;

/// Errors that can occur while orchestrating builds and tests.
#[derive(Debug, Error)]
pub enum Error {
  /// Configuration is malformed or inconsistent with the project layout.
  #[error("configuration error: {0}")]
  Configuration(String),

  /// A generated entrypoint could not be written.
  #[error("failed to generate entrypoint {path}: {message}")]
  Generation { path: String, message: String },

  /// The external compiler exited non-zero.
  #[error("build command failed with exit code {code:?}: {command}")]
  Compile { command: String, code: Option<i32> },

  /// The external test runner exited non-zero.
  #[error("test command failed with exit code {code:?}: {command}")]
  Test { command: String, code: Option<i32> },

  /// A command or source template could not be rendered.
  #[error("template error: {0}")]
  Template(#[from] TemplateError),

  /// A function name was requested that the project does not declare.
  #[error("unknown function: {0}")]
  UnknownFunction(String),

  /// I/O error outside of command execution.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
