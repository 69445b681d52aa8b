//! Notifier command template: the chosen interpreter plus the resolved
//! script path, sharing this process's stdio.

use log::debug;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{RelayError, Result};
use crate::utils::config::SELF_CHECK_FLAG;

/// Resolved command template for the notifier process. Built once during
/// self-check; each invocation constructs a fresh `Command` from it.
#[derive(Clone, Debug)]
pub struct NotifierCommand {
    interpreter: String,
    script: PathBuf,
}

impl NotifierCommand {
    pub fn new(interpreter: String, script: PathBuf) -> Self {
        Self {
            interpreter,
            script,
        }
    }

    /// `<interpreter> <canonical script path>` with inherited stdio.
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(&self.script)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }

    /// Run the notifier in self-check mode and block until it exits.
    /// Non-zero exit status means the script cannot deliver reports.
    pub fn self_check(&self) -> Result<()> {
        let status = self.command().arg(SELF_CHECK_FLAG).status()?;
        if status.success() {
            debug!("notifier self-check passed: {} {}", self.interpreter, self.script.display());
            Ok(())
        } else {
            Err(RelayError::ScriptSelfCheckFailed(status.code()))
        }
    }

    /// Start the notifier in dispatch mode. The child is not waited on and
    /// its exit status is never inspected.
    pub fn spawn(&self) -> Result<()> {
        self.command().spawn()?;
        Ok(())
    }
}
