//! External process execution.
//!
//! Commands arrive here as fully rendered shell strings and run through the
//! system shell with stdout/stderr passed through, so the console shows
//! exactly what an operator would see running the command by hand. Every
//! command is logged before it is spawned; the log stream is the reproducible
//! record of a build.

use std::path::PathBuf;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::info;

/// Failure modes of a spawned command.
#[derive(Debug, Error)]
pub enum RunError {
  /// The command ran and exited non-zero.
  #[error("exited with code {code:?}")]
  Exit { code: Option<i32> },

  /// The command could not be spawned at all.
  #[error("{0}")]
  Io(#[from] std::io::Error),
}

/// Runs shell command strings to completion.
///
/// The orchestrators are generic over this seam so tests can record commands
/// without spawning processes.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
  /// Run `command` to completion, inheriting stdout/stderr.
  async fn run(&self, command: &str) -> Result<(), RunError>;
}

/// Starts auxiliary helper processes (emulators and the like) that tests
/// depend on. Helpers run in the background; nothing waits for them to exit.
pub trait HelperHost {
  fn start(&self, id: &str) -> Result<(), RunError>;
}

/// Runs commands through the system shell.
#[derive(Debug, Default, Clone)]
pub struct ShellRunner {
  cwd: Option<PathBuf>,
}

impl ShellRunner {
  /// Run every command with the given working directory.
  pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
    Self { cwd: Some(cwd.into()) }
  }
}

impl CommandRunner for ShellRunner {
  async fn run(&self, command: &str) -> Result<(), RunError> {
    info!(cmd = %command, "running");

    let (shell, flag) = shell_invocation();
    let mut invocation = Command::new(shell);
    invocation.arg(flag).arg(command).stdin(Stdio::null());
    if let Some(cwd) = &self.cwd {
      invocation.current_dir(cwd);
    }

    let status = invocation.status().await?;
    if status.success() {
      Ok(())
    } else {
      Err(RunError::Exit { code: status.code() })
    }
  }
}

/// Spawns helpers as detached shell commands.
#[derive(Debug, Default, Clone)]
pub struct ShellHelperHost {
  cwd: Option<PathBuf>,
}

impl ShellHelperHost {
  pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
    Self { cwd: Some(cwd.into()) }
  }
}

impl HelperHost for ShellHelperHost {
  fn start(&self, id: &str) -> Result<(), RunError> {
    info!(helper = %id, "starting helper");

    let (shell, flag) = shell_invocation();
    let mut invocation = Command::new(shell);
    invocation.arg(flag).arg(id).stdin(Stdio::null());
    if let Some(cwd) = &self.cwd {
      invocation.current_dir(cwd);
    }

    // The child keeps running on its own; dropping the handle does not kill it.
    invocation.spawn()?;
    Ok(())
  }
}

fn shell_invocation() -> (&'static str, &'static str) {
  #[cfg(unix)]
  {
    ("/bin/sh", "-c")
  }

  #[cfg(windows)]
  {
    ("cmd.exe", "/C")
  }
}
