//! The report entity: built by the caller, submitted at most once.

use log::warn;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{RelayError, Result};
use crate::pipeline::Pipeline;
use crate::store::ReportRow;

/// One issue/crash record awaiting submission.
///
/// Metadata fields are public and freely mutable until [`submit`](Self::submit)
/// runs; the serialized form is taken at submission time, so list edits made
/// before submitting are reflected in the stored row and edits made after are
/// not.
#[derive(Clone, Debug)]
pub struct Report {
    pub title: String,
    pub body: String,
    pub milestone: String,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    created_at: i64,
    submitted: bool,
}

impl Report {
    /// New report with the given title and the current time.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
            milestone: String::new(),
            labels: Vec::new(),
            assignees: Vec::new(),
            created_at: unix_now(),
            submitted: false,
        }
    }

    /// Report from a captured failure: the title is the error's display form
    /// and the body starts with the full error chain inside a collapsed
    /// pre-formatted block, followed by `notes`.
    pub fn from_error(error: &anyhow::Error, notes: &str) -> Self {
        Self {
            body: format!(
                "<details><summary>Stacktrace:</summary>\n```\n{:?}\n```\n</details>\n\n{}",
                error, notes
            ),
            ..Self::new(error.to_string())
        }
    }

    /// Append `text` plus one line separator to the body.
    pub fn append_body(&mut self, text: &str) -> &mut Self {
        self.body.push_str(text);
        self.body.push('\n');
        self
    }

    pub fn with_milestone(&mut self, milestone: impl Into<String>) -> &mut Self {
        self.milestone = milestone.into();
        self
    }

    pub fn with_labels(&mut self, labels: Vec<String>) -> &mut Self {
        self.labels = labels;
        self
    }

    pub fn with_assignees(&mut self, assignees: Vec<String>) -> &mut Self {
        self.assignees = assignees;
        self
    }

    /// Set the creation timestamp (unix seconds). Values ≤ 0 are rejected
    /// with a log line and replaced by the current time.
    pub fn with_created_at(&mut self, unix_epoch: i64) -> &mut Self {
        if unix_epoch > 0 {
            self.created_at = unix_epoch;
        } else {
            warn!("invalid unix epoch [{}]; using current time", unix_epoch);
            self.created_at = unix_now();
        }
        self
    }

    /// Creation timestamp in unix seconds.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// True once this instance has been submitted. One-way, never reset.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Submit this report exactly once: run the environment self-check
    /// (best effort), enqueue persistence + notifier dispatch on the pool,
    /// and flip the submitted flag before returning. The flag flips before
    /// the background work completes, so any later call fails with
    /// [`RelayError::AlreadySubmitted`] even while the task is in flight.
    pub fn submit(&mut self, pipeline: &Pipeline) -> Result<()> {
        if self.submitted {
            return Err(RelayError::AlreadySubmitted);
        }

        if let Err(e) = pipeline.environment().self_check() {
            warn!("self-check failed, continuing best-effort: {}", e);
            if matches!(e, RelayError::Store(_)) {
                warn!("an \"out of memory\" store error usually means no database file was found");
            }
        }

        let env = Arc::clone(pipeline.environment());
        let title = self.title.clone();
        let body = self.body.clone();
        let milestone = self.milestone.clone();
        let labels = self.labels.join("\n");
        let assignees = self.assignees.join("\n");
        let created_at = self.created_at;
        pipeline.executor().execute(move || {
            let row = ReportRow {
                title,
                body,
                milestone,
                labels,
                assignees,
                created_at: if created_at > 0 { created_at } else { unix_now() },
            };
            env.persist_and_dispatch(row);
        });

        self.submitted = true;
        Ok(())
    }
}

/// Scoped wrapper that submits the report when dropped, discarding
/// [`RelayError::AlreadySubmitted`]: "submit if not yet submitted" runs
/// deterministically at scope exit.
pub struct ReportGuard<'a> {
    report: Report,
    pipeline: &'a Pipeline,
}

impl<'a> ReportGuard<'a> {
    pub fn new(report: Report, pipeline: &'a Pipeline) -> Self {
        Self { report, pipeline }
    }
}

impl Deref for ReportGuard<'_> {
    type Target = Report;

    fn deref(&self) -> &Report {
        &self.report
    }
}

impl DerefMut for ReportGuard<'_> {
    fn deref_mut(&mut self) -> &mut Report {
        &mut self.report
    }
}

impl Drop for ReportGuard<'_> {
    fn drop(&mut self) {
        let _ = self.report.submit(self.pipeline);
    }
}

/// Current time in unix seconds.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
