//! Error types for circuit execution

use qbtm_algebra::AlgebraError;
use qbtm_core::{CoreError, Prim, Qgid};
use thiserror::Error;

/// Errors that can occur while executing a circuit
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// Wrong number of children for a primitive
    #[error("{prim} requires {expected} children, got {actual}")]
    BadChildren {
        prim: Prim,
        expected: usize,
        actual: usize,
    },

    /// A referenced child circuit is not in the store
    #[error("child {index} of {prim} ({qgid}) not found in store")]
    MissingReference {
        prim: Prim,
        index: usize,
        qgid: Qgid,
    },

    /// Primitive data of the wrong kind
    #[error("{prim} data must be {expected}")]
    BadData {
        prim: Prim,
        expected: &'static str,
    },

    /// Primitive reserved for forward compatibility
    #[error("primitive {0} is not supported by this runtime")]
    UnsupportedPrimitive(Prim),

    /// Recursion deeper than the executor allows
    #[error("recursion depth limit of {limit} exceeded")]
    RecursionLimit { limit: usize },

    /// Matrix arithmetic failure (shape mismatch, division by zero)
    #[error(transparent)]
    Algebra(#[from] AlgebraError),

    /// Value-layer failure
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for execution
pub type Result<T> = std::result::Result<T, ExecError>;
