//! Wires an environment and a worker pool into the object callers submit to.

use std::sync::Arc;
use std::time::Duration;

use crate::environment::{EnvConfig, Environment};
use crate::executor::SubmissionExecutor;
use crate::report::{Report, ReportGuard};

/// The submission pipeline: one environment, one pool. Construct once and
/// share for the process's lifetime.
pub struct Pipeline {
    env: Arc<Environment>,
    executor: SubmissionExecutor,
}

impl Pipeline {
    /// Pipeline over a fresh environment built from `config` and a pool with
    /// default settings.
    pub fn new(config: EnvConfig) -> Self {
        Self::with_parts(Arc::new(Environment::new(config)), SubmissionExecutor::new())
    }

    /// Pipeline from pre-built parts (library embedding, tests).
    pub fn with_parts(env: Arc<Environment>, executor: SubmissionExecutor) -> Self {
        Self { env, executor }
    }

    pub fn environment(&self) -> &Arc<Environment> {
        &self.env
    }

    pub(crate) fn executor(&self) -> &SubmissionExecutor {
        &self.executor
    }

    /// Wrap `report` so it is submitted at scope exit if not already.
    pub fn guard(&self, report: Report) -> ReportGuard<'_> {
        ReportGuard::new(report, self)
    }

    /// Drain in-flight submissions, up to `timeout`. Returns false on
    /// timeout. Only needed by short-lived hosts (the CLI) and tests;
    /// long-running hosts just keep the pipeline alive.
    pub fn drain(&self, timeout: Duration) -> bool {
        self.executor.flush(timeout)
    }
}
