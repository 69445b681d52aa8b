//! Process-wide environment: configuration plus the three lazily-initialized
//! resources (store handle, canonical script path, notifier command).
//!
//! The original host kept these as mutable statics with an unguarded
//! initialization race; here they live behind one mutex inside an
//! explicitly-constructed `Environment` that the pipeline owns.

pub mod interpreter;
pub mod notifier;

pub use interpreter::probe_interpreter;
pub use notifier::NotifierCommand;

use log::{debug, error, warn};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{RelayError, Result};
use crate::store::{ReportRow, ReportStore};
use crate::utils::config::{INTERPRETER_CANDIDATES, SCRIPT_PATH_ENV, SQLITE_PATH_ENV};

/// Environment configuration: where the store lives, where the notifier
/// script lives, and which runtimes may execute it.
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// Store location: a filesystem path, or `:memory:` for ephemeral.
    pub store_location: Option<String>,
    /// Filesystem path of the notifier script.
    pub script_path: Option<PathBuf>,
    /// Interpreter candidates, probed in order.
    pub interpreter_candidates: Vec<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            store_location: None,
            script_path: None,
            interpreter_candidates: INTERPRETER_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl EnvConfig {
    /// Read configuration from the process environment (`SQLITE_PATH`,
    /// `SCRIPT_PATH`), falling back to a `.env` file in the working
    /// directory. Blank values count as unset.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            store_location: non_blank_env(SQLITE_PATH_ENV),
            script_path: non_blank_env(SCRIPT_PATH_ENV).map(PathBuf::from),
            ..Self::default()
        }
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// The three process-wide resources. Each is initialized at most once and
/// lives for the environment's lifetime.
#[derive(Default)]
struct Resources {
    store: Option<ReportStore>,
    script: Option<PathBuf>,
    notifier: Option<NotifierCommand>,
}

/// Validated execution environment for the submission pipeline.
pub struct Environment {
    config: EnvConfig,
    resources: Mutex<Resources>,
}

impl Environment {
    pub fn new(config: EnvConfig) -> Self {
        Self {
            config,
            resources: Mutex::new(Resources::default()),
        }
    }

    /// Lock the resource table, recovering from a poisoned lock: a panic on
    /// a pool worker leaves the resources intact (each is set-once), and
    /// `submit()` must keep working afterwards.
    fn lock_resources(&self) -> MutexGuard<'_, Resources> {
        self.resources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Idempotent self-check. Callable any number of times from any thread;
    /// each resource is validated only while unset and each step
    /// short-circuits on the first failure of that resource. Once all three
    /// resources are set this is a no-op. The notifier self-check invocation
    /// blocks the calling thread until the child exits.
    pub fn self_check(&self) -> Result<()> {
        let mut res = self.lock_resources();

        if res.store.is_none() {
            let location = self
                .config
                .store_location
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .ok_or(RelayError::ConfigMissing(SQLITE_PATH_ENV))?;
            res.store = Some(ReportStore::open(location)?);
            debug!("self-check: store opened at [{}]", location);
        }

        if res.script.is_none() {
            let path = self
                .config
                .script_path
                .as_deref()
                .filter(|p| !p.as_os_str().is_empty())
                .ok_or(RelayError::ConfigMissing(SCRIPT_PATH_ENV))?;
            if !path.exists() {
                return Err(RelayError::ResourceNotFound(path.to_path_buf()));
            }
            let canonical = path
                .canonicalize()
                .map_err(|_| RelayError::ResourceNotFound(path.to_path_buf()))?;
            debug!("self-check: script resolved to [{}]", canonical.display());
            res.script = Some(canonical);
        }

        if res.notifier.is_none()
            && let Some(script) = res.script.clone()
        {
            let interpreter = probe_interpreter(&self.config.interpreter_candidates)?;
            let command = NotifierCommand::new(interpreter, script);
            command.self_check()?;
            res.notifier = Some(command);
        }

        Ok(())
    }

    /// True once every resource passed its check.
    pub fn is_ready(&self) -> bool {
        let res = self.lock_resources();
        res.store.is_some() && res.script.is_some() && res.notifier.is_some()
    }

    /// Persist one row and start the notifier. Runs on a pool worker; each
    /// step is independently fallible, logged, and never rolls back or
    /// retries the other.
    pub(crate) fn persist_and_dispatch(&self, row: ReportRow) {
        let res = self.lock_resources();

        match &res.store {
            Some(store) => {
                if let Err(e) = store.insert(&row) {
                    error!("report [{}] not persisted: {}", row.title, e);
                }
            }
            None => warn!("store unavailable; report [{}] not persisted", row.title),
        }

        match &res.notifier {
            Some(notifier) => {
                if let Err(e) = notifier.spawn() {
                    error!("notifier not started for [{}]: {}", row.title, e);
                }
            }
            None => warn!("notifier unavailable; report [{}] not dispatched", row.title),
        }
    }

    /// Number of reports in the store, if it is open.
    pub fn report_count(&self) -> Option<usize> {
        let res = self.lock_resources();
        res.store.as_ref().and_then(|s| s.count().ok())
    }

    /// All stored reports in insertion order, if the store is open.
    pub fn stored_reports(&self) -> Option<Vec<ReportRow>> {
        let res = self.lock_resources();
        res.store.as_ref().and_then(|s| s.load_reports().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// A panic on a thread holding the resource lock must not take the
    /// environment down with it: later self-checks and store queries keep
    /// working instead of panicking on a poisoned lock.
    #[test]
    fn test_environment_survives_poisoned_lock() {
        let env = Arc::new(Environment::new(EnvConfig {
            store_location: None,
            script_path: None,
            interpreter_candidates: Vec::new(),
        }));

        let holder = Arc::clone(&env);
        let _ = std::thread::spawn(move || {
            let _guard = holder.resources.lock().unwrap();
            panic!("worker died while holding the lock");
        })
        .join();

        assert!(matches!(
            env.self_check(),
            Err(RelayError::ConfigMissing("SQLITE_PATH"))
        ));
        assert!(!env.is_ready());
        assert!(env.report_count().is_none());
    }
}
