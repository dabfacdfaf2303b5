//! Errors the sourcerer dispatcher itself can raise, distinct from the
//! graph-traversal errors in [`switchyard_core::CoreError`]: cache access,
//! CLI registration, and `RunCLI`-mode misuse.

/// Errors surfaced by the dispatcher layer (cache, registry, `RunCLI` mode)
/// rather than by a CLI's own processor graph.
#[derive(Debug, thiserror::Error)]
pub enum SourcererError {
    /// A graph-traversal failure, passed through from `switchyard-dispatch`.
    #[error(transparent)]
    Core(#[from] switchyard_core::CoreError),

    /// A cache key didn't match `^[A-Za-z0-9_.-]+$`.
    #[error("failed to get file for key: invalid key format")]
    InvalidCacheKey,

    /// Cache I/O or (de)serialization failed.
    #[error("cache error: {0}")]
    Cache(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The requested CLI is not registered.
    #[error("key not found")]
    NotFound,

    /// `execute cli FILE` named a CLI outside the registry (or outside the
    /// `builtin` set, under `builtin`).
    #[error("no such CLI: {0}")]
    UnknownCli(String),

    /// A `RunCLI`-bound dispatcher's CLI declared a setup script or emitted
    /// Execute Data; both are forbidden in that mode.
    #[error("RunCLI mode forbids {0}")]
    RunCliViolation(&'static str),

    /// Writing the Execute Data side channel to the trampoline's temp file
    /// failed.
    #[error("failed to write execute file: {0}")]
    ExecuteFileWrite(#[source] std::io::Error),
}

pub type SourcererResult<T> = Result<T, SourcererError>;
