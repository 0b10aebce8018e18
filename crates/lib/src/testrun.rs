//! Test phase orchestration.
//!
//! Helpers come up first, then the configured test commands run in order,
//! stopping at the first failure. The outcome is handed back to the caller;
//! this module never terminates the process, whatever the result.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::exec::{CommandRunner, HelperHost, RunError};
use crate::project::Registry;
use crate::template::CommandSpec;

/// Outcome of a test run, for the caller to map to an exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestRunOutcome {
  /// Every configured test command exited zero. `ran` is zero when the
  /// project configures no tests at all.
  Passed { ran: usize },

  /// A test command exited non-zero; later tests were not run. `command` is
  /// the literal string to reproduce the failure by hand.
  Failed { command: String, code: Option<i32> },
}

impl TestRunOutcome {
  pub fn is_passed(&self) -> bool {
    matches!(self, TestRunOutcome::Passed { .. })
  }

  /// Convert the outcome into a result, turning `Failed` into
  /// [`Error::Test`].
  pub fn into_result(self) -> Result<usize> {
    match self {
      TestRunOutcome::Passed { ran } => Ok(ran),
      TestRunOutcome::Failed { command, code } => Err(Error::Test { command, code }),
    }
  }
}

/// Run the configured test suite.
///
/// A supplied function name only has to be declared in the project; the suite
/// itself is project-level. Helper-start failures abort the phase before any
/// test command runs.
pub async fn run_tests<R: Registry, C: CommandRunner, H: HelperHost>(
  registry: &R,
  config: &Config,
  function: Option<&str>,
  runner: &C,
  host: &H,
) -> Result<TestRunOutcome> {
  if let Some(name) = function {
    registry
      .function(name)
      .ok_or_else(|| Error::UnknownFunction(name.to_string()))?;
  }

  for helper in &config.helpers {
    host.start(helper).map_err(|e| match e {
      RunError::Io(e) => Error::Io(e),
      RunError::Exit { code } => {
        Error::Configuration(format!("helper '{}' failed to start (code {:?})", helper, code))
      }
    })?;
  }

  if !config.helpers.is_empty() && config.helper_startup_ms > 0 {
    info!(delay_ms = config.helper_startup_ms, "waiting for helpers to come up");
    tokio::time::sleep(Duration::from_millis(config.helper_startup_ms)).await;
  }

  if config.tests.is_empty() {
    warn!("no tests configured; nothing to run");
    return Ok(TestRunOutcome::Passed { ran: 0 });
  }

  let mut ran = 0;
  for test in &config.tests {
    let command = CommandSpec::new(config.test_cmd.as_str()).var("test", test.clone()).render()?;

    match runner.run(&command).await {
      Ok(()) => ran += 1,
      Err(RunError::Exit { code }) => {
        error!(cmd = %command, code = ?code, "test command failed");
        return Ok(TestRunOutcome::Failed { command, code });
      }
      Err(RunError::Io(e)) => return Err(Error::Io(e)),
    }
  }

  info!(ran, "test phase complete");
  Ok(TestRunOutcome::Passed { ran })
}
