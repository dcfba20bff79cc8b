//! Block types: finite-dimensional C*-algebras as block signatures
//!
//! An [`Object`] is the ordered list of block sizes `[n₁, …, n_k]` of the
//! algebra ⊕ᵢ M_{nᵢ}(ℂ). The matrix representation of a state on such an
//! object uses Σᵢ nᵢ² basis elements, so that is the dimension exposed to
//! the interpreter. The empty signature is the unit object I with
//! dimension one.

use crate::error::{CoreError, Result};
use crate::value::Value;
use num_traits::ToPrimitive;
use smallvec::SmallVec;
use std::fmt;

/// A block signature: ordered, positive block sizes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Object {
    blocks: SmallVec<[u32; 4]>,
}

impl Object {
    /// The unit object I (empty signature, dimension one).
    #[inline]
    pub fn unit() -> Self {
        Self {
            blocks: SmallVec::new(),
        }
    }

    /// Object with the given block sizes.
    ///
    /// Block sizes must be positive; a zero block denotes nothing and is
    /// rejected by [`Object::from_value`] on ingestion.
    pub fn new(blocks: impl IntoIterator<Item = u32>) -> Self {
        Self {
            blocks: blocks.into_iter().collect(),
        }
    }

    /// Q(n): a single quantum block M_n(ℂ).
    #[inline]
    pub fn quantum(n: u32) -> Self {
        Self::new([n])
    }

    /// C(k): k classical levels, i.e. k copies of ℂ.
    pub fn classical(k: u32) -> Self {
        Self {
            blocks: std::iter::repeat(1).take(k as usize).collect(),
        }
    }

    /// The block sizes in order.
    #[inline]
    pub fn blocks(&self) -> &[u32] {
        &self.blocks
    }

    /// True for the unit object.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Matrix-representation dimension: Σᵢ nᵢ², or one for the unit object.
    pub fn dim(&self) -> usize {
        if self.blocks.is_empty() {
            return 1;
        }
        self.blocks
            .iter()
            .map(|&n| (n as usize) * (n as usize))
            .sum()
    }

    /// Canonical value form: `Tag("object", Seq[Int n₁, …, Int n_k])`.
    pub fn to_value(&self) -> Value {
        let blocks = self
            .blocks
            .iter()
            .map(|&n| Value::int(i64::from(n)))
            .collect();
        Value::tag(Value::text("object"), Value::Seq(blocks))
    }

    /// Parse an object back from its value form.
    pub fn from_value(value: &Value) -> Result<Self> {
        let (label, payload) = value.as_tag().ok_or(CoreError::MalformedValue {
            reason: "object must be a tagged value",
        })?;
        if label.as_text() != Some("object") {
            return Err(CoreError::MalformedValue {
                reason: "object tag label must be \"object\"",
            });
        }
        let items = payload.as_seq().ok_or(CoreError::MalformedValue {
            reason: "object payload must be a sequence of block sizes",
        })?;
        let mut blocks = SmallVec::with_capacity(items.len());
        for item in items {
            let n = item
                .as_int()
                .and_then(|n| n.to_i64())
                .ok_or(CoreError::MalformedValue {
                    reason: "block size must be an integer",
                })?;
            if n < 1 || n > i64::from(u32::MAX) {
                return Err(CoreError::InvalidBlockSize { size: n });
            }
            blocks.push(n as u32);
        }
        Ok(Self { blocks })
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unit() {
            return f.write_str("I");
        }
        f.write_str("⊕[")?;
        for (i, n) in self.blocks.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", n)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_has_dimension_one() {
        assert_eq!(Object::unit().dim(), 1);
        assert!(Object::unit().is_unit());
    }

    #[test]
    fn test_qubit_block_dimension() {
        // Q(2) represents M_2(C): 4 matrix units
        assert_eq!(Object::quantum(2).dim(), 4);
    }

    #[test]
    fn test_mixed_signature_dimension() {
        assert_eq!(Object::new([2, 3]).dim(), 13);
        assert_eq!(Object::classical(3).dim(), 3);
    }

    #[test]
    fn test_value_roundtrip() {
        for obj in [
            Object::unit(),
            Object::quantum(2),
            Object::new([2, 3, 1]),
            Object::classical(4),
        ] {
            let parsed = Object::from_value(&obj.to_value()).unwrap();
            assert_eq!(parsed, obj);
        }
    }

    #[test]
    fn test_from_value_rejects_zero_block() {
        let bad = Value::tag(Value::text("object"), Value::seq(vec![Value::int(0)]));
        assert!(matches!(
            Object::from_value(&bad),
            Err(CoreError::InvalidBlockSize { size: 0 })
        ));
    }

    #[test]
    fn test_from_value_rejects_wrong_label() {
        let bad = Value::tag(Value::text("objekt"), Value::seq(vec![]));
        assert!(Object::from_value(&bad).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Object::unit().to_string(), "I");
        assert_eq!(Object::new([2, 3]).to_string(), "⊕[2,3]");
    }
}
