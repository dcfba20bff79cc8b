//! Store payload framing: packing a store into bytes and back
//!
//! The payload is a back-to-back run of canonical value encodings with no
//! extra framing. `pack_store` writes entries in ascending digest order so
//! the same store always produces the same bytes; `load_store` decodes
//! sequentially until the payload is exhausted, registering circuit-shaped
//! values in both store maps so entrypoints resolve as circuits.

use crate::error::Result;
use qbtm_core::{decode_all, Circuit, Store, Value};
use tracing::debug;

/// Serialize every stored value, ordered by ascending digest.
pub fn pack_store(store: &Store) -> Result<Vec<u8>> {
    let mut entries: Vec<_> = store.iter_values().collect();
    entries.sort_by_key(|(id, _)| **id);

    let mut out = Vec::new();
    for (_, value) in entries {
        out.extend(value.encode()?);
    }
    Ok(out)
}

/// Rebuild a store from payload bytes.
pub fn load_store(payload: &[u8]) -> Result<Store> {
    let mut store = Store::new();
    if payload.is_empty() {
        return Ok(store);
    }

    let values = decode_all(payload)?;
    let mut circuits = 0usize;
    for value in values {
        if is_circuit_value(&value) {
            let circuit = Circuit::from_value(&value)?;
            store.put_circuit(circuit)?;
            circuits += 1;
        } else {
            store.put_value(value)?;
        }
    }
    debug!(
        circuits,
        values = store.value_count(),
        "store payload ingested"
    );
    Ok(store)
}

fn is_circuit_value(value: &Value) -> bool {
    value
        .as_tag()
        .is_some_and(|(label, _)| label.as_text() == Some("circuit"))
}
