//! Service configuration supplied at process start.

use std::path::PathBuf;

/// Which storage backend serves every kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendConfig {
    /// Process-local maps keyed by random UUIDs.
    #[default]
    Memory,
    /// SQLite database file with store-assigned integer keys.
    Sqlite(PathBuf),
    /// SQLite without a file. Keys behave as with `Sqlite`, data does not persist.
    SqliteInMemory,
}

/// What a failed write to the store does to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteFailurePolicy {
    /// Answer 503 and keep serving.
    #[default]
    Unavailable,
    /// Log and exit with status 1. Other kinds stop being served too.
    Terminate,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub backend: BackendConfig,
    pub write_failure: WriteFailurePolicy,
}
