//! Core types for the qbtm runtime
//!
//! This crate provides the foundational layer of the typed quantum-circuit
//! executor: the canonical value model with its content address (QGID),
//! block-algebra objects, circuit records, and the content-addressed store.
//!
//! # Core Components
//!
//! - **Value model**: a closed algebraic sum with structural equality
//! - **Canonical encoding**: a byte-exact serialization whose SHA-256
//!   digest is the value's identity
//! - **Block types**: C*-algebra signatures ⊕ᵢ M_{nᵢ}(ℂ)
//! - **Circuits**: typed morphism nodes referencing children by digest
//! - **Store**: grow-only digest-keyed circuit and value maps
//!
//! # Example
//!
//! ```
//! use qbtm_core::{Circuit, Object, Prim, Store};
//!
//! let mut store = Store::new();
//! let id = store
//!     .put_circuit(Circuit::new(Object::quantum(2), Object::quantum(2), Prim::Id))
//!     .unwrap();
//! assert!(store.get_circuit(&id).is_some());
//! ```

pub mod circuit;
pub mod encoding;
pub mod error;
pub mod object;
pub mod store;
pub mod value;

pub use circuit::{Circuit, Prim};
pub use encoding::{decode, decode_all, Qgid, MAX_NESTING};
pub use error::{CoreError, Result};
pub use object::Object;
pub use store::Store;
pub use value::Value;
