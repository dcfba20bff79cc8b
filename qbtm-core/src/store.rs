//! Content-addressed store for circuits and values
//!
//! Grow-only within a session: keys are always the digest of the stored
//! entry's canonical encoding, insertion is idempotent, and entries are
//! never mutated or evicted. Execution only reads the store, so a
//! populated store can be shared freely.

use crate::circuit::Circuit;
use crate::encoding::Qgid;
use crate::error::Result;
use crate::value::Value;
use ahash::AHashMap;

/// Digest-keyed maps of circuits and values.
#[derive(Debug, Default)]
pub struct Store {
    circuits: AHashMap<Qgid, Circuit>,
    values: AHashMap<Qgid, Value>,
}

impl Store {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize and insert a circuit, returning its digest.
    ///
    /// Inserting the same circuit twice is a no-op returning the same
    /// digest. The circuit's value form is stored alongside it.
    pub fn put_circuit(&mut self, circuit: Circuit) -> Result<Qgid> {
        let value = circuit.to_value();
        let id = value.qgid()?;
        self.circuits.entry(id).or_insert(circuit);
        self.values.entry(id).or_insert(value);
        Ok(id)
    }

    /// Look a circuit up by digest.
    #[inline]
    pub fn get_circuit(&self, id: &Qgid) -> Option<&Circuit> {
        self.circuits.get(id)
    }

    /// Insert a value, returning its digest.
    pub fn put_value(&mut self, value: Value) -> Result<Qgid> {
        let id = value.qgid()?;
        self.values.entry(id).or_insert(value);
        Ok(id)
    }

    /// Look a value up by digest.
    #[inline]
    pub fn get_value(&self, id: &Qgid) -> Option<&Value> {
        self.values.get(id)
    }

    /// Number of stored circuits.
    pub fn circuit_count(&self) -> usize {
        self.circuits.len()
    }

    /// Number of stored values (circuit value forms included).
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all stored values with their digests.
    pub fn iter_values(&self) -> impl Iterator<Item = (&Qgid, &Value)> {
        self.values.iter()
    }

    /// Iterate over all stored circuits with their digests.
    pub fn iter_circuits(&self) -> impl Iterator<Item = (&Qgid, &Circuit)> {
        self.circuits.iter()
    }
}
