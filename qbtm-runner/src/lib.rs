//! The .qmb binary container and self-contained runner
//!
//! A .qmb binary carries one entrypoint digest plus enough store bytes to
//! resolve it: magic, entrypoint QGID, name, version, and a payload of
//! canonical value encodings. This crate provides the container
//! encode/decode contract, the store payload framing, and the
//! [`Runner`] that loads a binary and executes its entrypoint.
//!
//! # Example
//!
//! ```
//! use qbtm_algebra::Matrix;
//! use qbtm_core::{Circuit, Object, Prim, Store};
//! use qbtm_runner::{pack_store, Container, Runner};
//!
//! let mut store = Store::new();
//! let entry = store
//!     .put_circuit(Circuit::new(Object::quantum(2), Object::quantum(2), Prim::Id))
//!     .unwrap();
//! let payload = pack_store(&store).unwrap();
//! let bytes = Container::new(entry, "demo", "1.0.0", payload).encode().unwrap();
//!
//! let runner = Runner::load(&bytes).unwrap();
//! assert_eq!(runner.run(&Matrix::identity(4)).unwrap(), Matrix::identity(4));
//! ```

pub mod container;
pub mod error;
pub mod loader;
pub mod runner;

pub use container::{Container, QMB_MAGIC};
pub use error::{Result, RunnerError};
pub use loader::{load_store, pack_store};
pub use runner::Runner;
