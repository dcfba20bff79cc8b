//! Error types for container decoding and running

use qbtm_core::{CoreError, Qgid};
use qbtm_exec::ExecError;
use thiserror::Error;

/// Errors from .qmb decoding, loading, and running
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunnerError {
    /// First four bytes are not the QMB magic
    #[error("invalid magic {found:02X?}: not a QMB binary")]
    InvalidMagic { found: [u8; 4] },

    /// Header ended before a declared field
    #[error("truncated header: {field} needs {needed} bytes, only {available} available")]
    TruncatedHeader {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    /// Name or version is not valid UTF-8
    #[error("container {field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    /// Name or version longer than the u32 length prefix allows
    #[error("container {field} exceeds the u32 length prefix")]
    FieldTooLong { field: &'static str },

    /// Entrypoint unresolvable after ingesting the store payload
    #[error("entrypoint circuit {qgid} not present after loading store payload")]
    MissingEntrypoint { qgid: Qgid },

    /// Store payload failed to decode
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Entrypoint execution failed
    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Result type for runner operations
pub type Result<T> = std::result::Result<T, RunnerError>;
