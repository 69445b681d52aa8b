//! Interpreter resolution: probe candidate runtimes for the notifier script.

use log::debug;
use std::process::{Command, Stdio};

use crate::error::{RelayError, Result};
use crate::utils::config::VERSION_PROBE_ARG;

/// Probe `candidates` in order with a version query; the first one that exits
/// with status 0 wins. Probe output is discarded.
pub fn probe_interpreter(candidates: &[String]) -> Result<String> {
    for candidate in candidates {
        match Command::new(candidate)
            .arg(VERSION_PROBE_ARG)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) if status.success() => {
                debug!("interpreter probe: selected [{}]", candidate);
                return Ok(candidate.clone());
            }
            Ok(status) => {
                debug!("interpreter probe: [{}] exited {}", candidate, status);
            }
            Err(e) => {
                debug!("interpreter probe: [{}] not runnable: {}", candidate, e);
            }
        }
    }
    Err(RelayError::InterpreterNotFound)
}
