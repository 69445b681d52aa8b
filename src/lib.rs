//! Issuerelay: fire-and-forget issue/crash report submission.
//!
//! Callers build a [`Report`], hand it to a [`Pipeline`], and move on: the
//! pipeline validates its environment once, persists the report to a SQLite
//! store, and spawns an external notifier bot that performs the actual
//! delivery. Each report instance can be submitted at most once.
//!
//! ```ignore
//! let pipeline = Pipeline::new(EnvConfig::from_env());
//! let mut report = Report::new("worker crashed");
//! report.append_body("queue drained unexpectedly");
//! report.submit(&pipeline)?;
//! ```

pub mod cli;
pub mod environment;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod utils;

pub use environment::{EnvConfig, Environment};
pub use error::{RelayError, Result};
pub use executor::{PoolSettings, SubmissionExecutor};
pub use pipeline::Pipeline;
pub use report::{Report, ReportGuard};
pub use store::{ReportRow, ReportStore};
