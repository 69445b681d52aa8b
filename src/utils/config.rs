//! Application configuration constants.
//! Env var names, interpreter candidates, and pool/store tuning in one place.

use std::time::Duration;

/// Env var naming the store location (a filesystem path, or `:memory:`).
pub const SQLITE_PATH_ENV: &str = "SQLITE_PATH";

/// Env var naming the notifier script's filesystem path.
pub const SCRIPT_PATH_ENV: &str = "SCRIPT_PATH";

/// Store location sentinel for an ephemeral in-memory database.
/// Exempt from the path existence check.
pub const MEMORY_SENTINEL: &str = ":memory:";

/// Candidate interpreters for the notifier script, in preference order.
/// The versioned name is probed before the generic one; first zero exit wins.
pub const INTERPRETER_CANDIDATES: [&str; 2] = ["python3", "python"];

/// Argument appended to the version probe of each interpreter candidate.
pub const VERSION_PROBE_ARG: &str = "--version";

/// Flag appended to the notifier invocation in self-check mode; the script
/// must validate itself and exit 0.
pub const SELF_CHECK_FLAG: &str = "--self-check";

// ---- Worker pool ----

/// Submission pool tuning. Mirrors the host-side dispatcher defaults:
/// a small standing core, unbounded growth, slow shrink.
pub struct PoolConsts;

impl PoolConsts {
    /// Standing workers that never expire.
    pub const MIN_WORKERS: usize = 4;
    /// Idle time after which an extra (non-core) worker exits.
    pub const IDLE_EXPIRY: Duration = Duration::from_secs(30 * 60);
}

// ---- Store ----

/// Upper bound on how long a single insert may wait on a busy database.
pub const STORE_BUSY_TIMEOUT: Duration = Duration::from_secs(30);
