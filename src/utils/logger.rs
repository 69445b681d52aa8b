//! Logging setup: colored, crate-focused output over `env_logger`.

use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Initialize logging. Dependencies stay at warn; this crate runs at info,
/// or debug when `verbose` is set. `RUST_LOG` still overrides both.
pub fn setup_logging(verbose: bool) {
    let crate_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), crate_level)
        .format(|buf, record| {
            let tag = env!("CARGO_PKG_NAME").cyan();
            match record.level() {
                Level::Error => writeln!(
                    buf,
                    "[{} {} {}] {}",
                    tag,
                    "ERROR".red(),
                    record.target().to_string().white(),
                    record.args()
                ),
                Level::Warn => writeln!(
                    buf,
                    "[{} {} {}] {}",
                    tag,
                    "WARN".yellow(),
                    record.target().to_string().white(),
                    record.args()
                ),
                _ => writeln!(buf, "[{}] {}", tag, record.args()),
            }
        })
        .init();
}
