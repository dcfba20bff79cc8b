//! Error types for exact arithmetic and matrix operations

use thiserror::Error;

/// Errors from Gaussian-rational and matrix operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    /// Operand shapes inconsistent for the requested operation
    #[error("shape mismatch in {op}: left is {lhs_rows}x{lhs_cols}, right is {rhs_rows}x{rhs_cols}")]
    ShapeMismatch {
        op: &'static str,
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    /// Operation defined only for square matrices
    #[error("{op} requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        op: &'static str,
        rows: usize,
        cols: usize,
    },

    /// Inverse or division of the zero Gaussian rational
    #[error("division by zero Gaussian rational")]
    DivisionByZero,

    /// Value does not have the matrix or entry tag shape
    #[error("malformed matrix value: {reason}")]
    MalformedMatrix { reason: &'static str },
}

/// Result type for algebra operations
pub type Result<T> = std::result::Result<T, AlgebraError>;
