//! Self-contained execution of .qmb binaries

use crate::container::Container;
use crate::error::{Result, RunnerError};
use crate::loader::load_store;
use qbtm_algebra::Matrix;
use qbtm_core::{Circuit, Qgid, Store, Value};
use qbtm_exec::Executor;
use tracing::debug;

/// A loaded binary: decoded container, populated store, ready to execute.
#[derive(Debug)]
pub struct Runner {
    container: Container,
    store: Store,
}

impl Runner {
    /// Decode a .qmb binary, ingest its store payload, and verify the
    /// entrypoint resolves to a circuit.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let container = Container::decode(bytes)?;
        let store = load_store(&container.store_data)?;
        if store.get_circuit(&container.entrypoint).is_none() {
            return Err(RunnerError::MissingEntrypoint {
                qgid: container.entrypoint,
            });
        }
        debug!(
            name = %container.name,
            version = %container.version,
            entrypoint = %container.entrypoint,
            "binary loaded"
        );
        Ok(Self { container, store })
    }

    /// Execute the entrypoint circuit on `input`.
    pub fn run(&self, input: &Matrix) -> Result<Matrix> {
        let circuit = self.entry_circuit()?;
        Ok(Executor::new(&self.store).execute(circuit, input)?)
    }

    /// Execute with a matrix in value form, returning the result in value
    /// form. Non-matrix inputs fall back to the 1×1 identity, matching
    /// the unit-object entrypoints produced by synthesis.
    pub fn run_with_value(&self, input: &Value) -> Result<Value> {
        let matrix = qbtm_algebra::matrix_from_value(input).unwrap_or_else(|_| Matrix::identity(1));
        let result = self.run(&matrix)?;
        Ok(qbtm_algebra::matrix_to_value(&result))
    }

    /// The binary's name.
    pub fn name(&self) -> &str {
        &self.container.name
    }

    /// The binary's version string.
    pub fn version(&self) -> &str {
        &self.container.version
    }

    /// The entrypoint digest.
    pub fn entrypoint(&self) -> Qgid {
        self.container.entrypoint
    }

    /// The populated store, for inspection.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Look any circuit up by digest.
    pub fn get_circuit(&self, id: &Qgid) -> Option<&Circuit> {
        self.store.get_circuit(id)
    }

    fn entry_circuit(&self) -> Result<&Circuit> {
        self.store
            .get_circuit(&self.container.entrypoint)
            .ok_or(RunnerError::MissingEntrypoint {
                qgid: self.container.entrypoint,
            })
    }
}
