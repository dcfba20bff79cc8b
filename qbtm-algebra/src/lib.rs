//! Exact linear algebra for the qbtm runtime
//!
//! Gaussian rationals (complex numbers over ℚ(i)) and matrices over them,
//! with arbitrary-precision arithmetic throughout; no floating point.
//! Also provides the canonical value form matrices use to travel through
//! circuit data fields.
//!
//! # Example
//!
//! ```
//! use qbtm_algebra::{Matrix, Qi};
//!
//! let i2 = Matrix::identity(2);
//! let doubled = i2.add(&i2).unwrap();
//! assert_eq!(doubled.trace().unwrap(), Qi::from_ints(4, 0));
//! ```

pub mod convert;
pub mod error;
pub mod matrix;
pub mod qi;

pub use convert::{matrix_from_value, matrix_to_value, qi_from_value, qi_to_value};
pub use error::{AlgebraError, Result};
pub use matrix::Matrix;
pub use qi::Qi;
