//! Circuit interpreter for the qbtm runtime
//!
//! Evaluates typed morphisms in FdC*_CP by recursive dispatch on the
//! primitive tag, resolving child circuits through the content-addressed
//! store. The supported baseline covers the structural primitives (Id,
//! Compose, Tensor, Swap), the quantum primitives (Unitary, Choi,
//! Prepare, Discard), and the arithmetic primitives (Add, Scale, Zero);
//! the remaining tags are reserved and rejected at execution time.
//!
//! # Example
//!
//! ```
//! use qbtm_algebra::Matrix;
//! use qbtm_core::{Circuit, Object, Prim, Store};
//! use qbtm_exec::Executor;
//!
//! let store = Store::new();
//! let circuit = Circuit::new(Object::quantum(2), Object::quantum(2), Prim::Id);
//! let out = Executor::new(&store).execute(&circuit, &Matrix::identity(4)).unwrap();
//! assert_eq!(out, Matrix::identity(4));
//! ```

pub mod error;
pub mod executor;

pub use error::{ExecError, Result};
pub use executor::{Executor, MAX_DEPTH};
