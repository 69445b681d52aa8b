//! CLI argument parsing and the run handler for the `issuerelay` binary.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::environment::EnvConfig;
use crate::pipeline::Pipeline;
use crate::report::Report;
use crate::utils::relay_toml::load_relay_toml;
use crate::utils::setup_logging;

/// Fire-and-forget issue report submitter.
#[derive(Clone, Parser)]
#[command(name = "issuerelay")]
#[command(about = "Submit an issue report to the local store and notifier bot.")]
pub struct Cli {
    /// Report title. Required unless --check is given.
    #[arg(value_name = "TITLE")]
    pub title: Option<String>,

    /// Body paragraph. Repeatable; appended in order, one line separator each.
    #[arg(long, short)]
    pub body: Vec<String>,

    /// Milestone name.
    #[arg(long, short)]
    pub milestone: Option<String>,

    /// Label. Repeatable.
    #[arg(long, short)]
    pub label: Vec<String>,

    /// Assignee. Repeatable.
    #[arg(long, short)]
    pub assignee: Vec<String>,

    /// Store location: path or `:memory:`. Overrides SQLITE_PATH and `.issuerelay.toml`.
    #[arg(long)]
    pub db: Option<String>,

    /// Notifier script path. Overrides SCRIPT_PATH and `.issuerelay.toml`.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Run the environment self-check and exit.
    #[arg(long)]
    pub check: bool,

    /// Verbose output.
    #[arg(long, short)]
    pub verbose: bool,
}

/// How long the CLI waits for the background submission before exiting.
/// A long-running host never needs this; a one-shot binary does, or the
/// process could exit between the insert and the spawn.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Resolve configuration (env → `.issuerelay.toml` → CLI flags) and either
/// run the self-check or build and submit one report.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let file = load_relay_toml(Path::new("."));
    let verbose = cli.verbose || file.as_ref().and_then(|f| f.verbose()).unwrap_or(false);
    setup_logging(verbose);

    let mut config = EnvConfig::from_env();
    if let Some(file) = &file {
        if config.store_location.is_none() {
            config.store_location = file.db_path().map(str::to_string);
        }
        if config.script_path.is_none() {
            config.script_path = file.script_path().map(PathBuf::from);
        }
    }
    if let Some(db) = &cli.db {
        config.store_location = Some(db.clone());
    }
    if let Some(script) = &cli.script {
        config.script_path = Some(script.clone());
    }

    let pipeline = Pipeline::new(config);

    if cli.check {
        pipeline
            .environment()
            .self_check()
            .context("environment self-check")?;
        log::info!("self-check passed");
        return Ok(());
    }

    let title = cli
        .title
        .clone()
        .context("TITLE is required unless --check is given")?;
    let mut report = Report::new(title);
    for paragraph in &cli.body {
        report.append_body(paragraph);
    }
    if let Some(milestone) = &cli.milestone {
        report.with_milestone(milestone.clone());
    }
    report
        .with_labels(cli.label.clone())
        .with_assignees(cli.assignee.clone());

    report.submit(&pipeline).context("submit report")?;
    if !pipeline.drain(DRAIN_TIMEOUT) {
        log::warn!("timed out waiting for the background submission");
    }
    Ok(())
}
