//! Circuit records and the closed primitive set
//!
//! A [`Circuit`] is one node of a content-addressed DAG: a typed morphism
//! with a primitive tag, primitive-specific auxiliary data, and child
//! references by digest. The numeric ordinal of every [`Prim`] participates
//! in QGID computation and is frozen; renumbering would break every
//! existing content address.

use crate::encoding::Qgid;
use crate::error::{CoreError, Result};
use crate::object::Object;
use crate::value::Value;
use num_traits::ToPrimitive;
use std::fmt;

/// Primitive morphism tags with their stable wire ordinals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Prim {
    Id = 0,
    Compose = 1,
    Tensor = 2,
    Swap = 3,
    Bisum = 4,
    Inject = 5,
    Project = 6,
    Copy = 7,
    Delete = 8,
    Encode = 9,
    Decode = 10,
    Discard = 11,
    Trace = 12,
    Choi = 13,
    Kraus = 14,
    Unitary = 15,
    Instrument = 16,
    Branch = 17,
    Prepare = 18,
    Add = 19,
    Scale = 20,
    Zero = 21,
    Assert = 22,
    Witness = 23,
}

impl Prim {
    /// Number of primitives in the closed set.
    pub const COUNT: usize = 24;

    /// All primitives in ordinal order.
    pub const ALL: [Prim; Prim::COUNT] = [
        Prim::Id,
        Prim::Compose,
        Prim::Tensor,
        Prim::Swap,
        Prim::Bisum,
        Prim::Inject,
        Prim::Project,
        Prim::Copy,
        Prim::Delete,
        Prim::Encode,
        Prim::Decode,
        Prim::Discard,
        Prim::Trace,
        Prim::Choi,
        Prim::Kraus,
        Prim::Unitary,
        Prim::Instrument,
        Prim::Branch,
        Prim::Prepare,
        Prim::Add,
        Prim::Scale,
        Prim::Zero,
        Prim::Assert,
        Prim::Witness,
    ];

    /// The wire ordinal.
    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look a primitive up by wire ordinal.
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Prim::ALL.get(i).copied())
    }

    /// The primitive's name as it appears in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Prim::Id => "Id",
            Prim::Compose => "Compose",
            Prim::Tensor => "Tensor",
            Prim::Swap => "Swap",
            Prim::Bisum => "Bisum",
            Prim::Inject => "Inject",
            Prim::Project => "Project",
            Prim::Copy => "Copy",
            Prim::Delete => "Delete",
            Prim::Encode => "Encode",
            Prim::Decode => "Decode",
            Prim::Discard => "Discard",
            Prim::Trace => "Trace",
            Prim::Choi => "Choi",
            Prim::Kraus => "Kraus",
            Prim::Unitary => "Unitary",
            Prim::Instrument => "Instrument",
            Prim::Branch => "Branch",
            Prim::Prepare => "Prepare",
            Prim::Add => "Add",
            Prim::Scale => "Scale",
            Prim::Zero => "Zero",
            Prim::Assert => "Assert",
            Prim::Witness => "Witness",
        }
    }
}

impl fmt::Display for Prim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of the circuit DAG.
///
/// `data` carries primitive-specific auxiliary information (a matrix value
/// for Unitary/Choi/Prepare, a rational for Scale, nil otherwise).
/// `children` references other circuits by digest; the referenced circuits
/// live in a [`Store`](crate::Store).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    pub domain: Object,
    pub codomain: Object,
    pub prim: Prim,
    pub data: Value,
    pub children: Vec<Qgid>,
}

impl Circuit {
    /// A circuit with nil data and no children.
    pub fn new(domain: Object, codomain: Object, prim: Prim) -> Self {
        Self {
            domain,
            codomain,
            prim,
            data: Value::Nil,
            children: Vec::new(),
        }
    }

    /// Attach primitive-specific data.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Attach child references.
    pub fn with_children(mut self, children: Vec<Qgid>) -> Self {
        self.children = children;
        self
    }

    /// Canonical value form:
    /// `Tag("circuit", Seq[domain, codomain, Int ordinal, data, Seq(Bytes children)])`.
    pub fn to_value(&self) -> Value {
        let children = self
            .children
            .iter()
            .map(|id| Value::bytes(id.as_bytes().to_vec()))
            .collect();
        Value::tag(
            Value::text("circuit"),
            Value::seq(vec![
                self.domain.to_value(),
                self.codomain.to_value(),
                Value::int(i64::from(self.prim.ordinal())),
                self.data.clone(),
                Value::Seq(children),
            ]),
        )
    }

    /// Parse a circuit back from its value form.
    pub fn from_value(value: &Value) -> Result<Self> {
        let (label, payload) = value.as_tag().ok_or(CoreError::MalformedValue {
            reason: "circuit must be a tagged value",
        })?;
        if label.as_text() != Some("circuit") {
            return Err(CoreError::MalformedValue {
                reason: "circuit tag label must be \"circuit\"",
            });
        }
        let items = payload.as_seq().ok_or(CoreError::MalformedValue {
            reason: "circuit payload must be a sequence",
        })?;
        let [domain, codomain, prim, data, children]: &[Value; 5] =
            items.try_into().map_err(|_| CoreError::MalformedValue {
                reason: "circuit payload must have exactly five items",
            })?;

        let ordinal = prim
            .as_int()
            .and_then(|n| n.to_i64())
            .ok_or(CoreError::MalformedValue {
                reason: "circuit primitive must be an integer ordinal",
            })?;
        let prim = Prim::from_ordinal(ordinal).ok_or(CoreError::UnknownPrimitive { ordinal })?;

        let child_items = children.as_seq().ok_or(CoreError::MalformedValue {
            reason: "circuit children must be a sequence",
        })?;
        let children = child_items
            .iter()
            .map(|item| {
                let bytes = item.as_bytes().ok_or(CoreError::MalformedValue {
                    reason: "circuit child reference must be a bytes value",
                })?;
                Qgid::from_slice(bytes)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            domain: Object::from_value(domain)?,
            codomain: Object::from_value(codomain)?,
            prim,
            data: data.clone(),
            children,
        })
    }

    /// The circuit's content address.
    pub fn qgid(&self) -> Result<Qgid> {
        self.to_value().qgid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The wire ordinals are frozen; this table is the contract.
    #[test]
    fn test_ordinals_are_stable() {
        let expected: [(Prim, u8); Prim::COUNT] = [
            (Prim::Id, 0),
            (Prim::Compose, 1),
            (Prim::Tensor, 2),
            (Prim::Swap, 3),
            (Prim::Bisum, 4),
            (Prim::Inject, 5),
            (Prim::Project, 6),
            (Prim::Copy, 7),
            (Prim::Delete, 8),
            (Prim::Encode, 9),
            (Prim::Decode, 10),
            (Prim::Discard, 11),
            (Prim::Trace, 12),
            (Prim::Choi, 13),
            (Prim::Kraus, 14),
            (Prim::Unitary, 15),
            (Prim::Instrument, 16),
            (Prim::Branch, 17),
            (Prim::Prepare, 18),
            (Prim::Add, 19),
            (Prim::Scale, 20),
            (Prim::Zero, 21),
            (Prim::Assert, 22),
            (Prim::Witness, 23),
        ];
        for (prim, ordinal) in expected {
            assert_eq!(prim.ordinal(), ordinal, "{}", prim);
            assert_eq!(Prim::from_ordinal(i64::from(ordinal)), Some(prim));
        }
        assert_eq!(Prim::from_ordinal(24), None);
        assert_eq!(Prim::from_ordinal(-1), None);
    }

    #[test]
    fn test_circuit_value_roundtrip() {
        let child = Qgid::from_bytes([7u8; 32]);
        let circuit = Circuit::new(Object::quantum(2), Object::quantum(2), Prim::Scale)
            .with_data(Value::rat(1, 2))
            .with_children(vec![child]);

        let parsed = Circuit::from_value(&circuit.to_value()).unwrap();
        assert_eq!(parsed, circuit);
    }

    #[test]
    fn test_circuit_roundtrip_through_bytes() {
        let circuit = Circuit::new(Object::unit(), Object::quantum(2), Prim::Prepare);
        let bytes = circuit.to_value().encode().unwrap();
        let (value, used) = crate::encoding::decode(&bytes).unwrap();
        assert_eq!(used, bytes.len());
        assert_eq!(Circuit::from_value(&value).unwrap(), circuit);
    }

    #[test]
    fn test_from_value_rejects_short_payload() {
        let bad = Value::tag(
            Value::text("circuit"),
            Value::seq(vec![Object::unit().to_value()]),
        );
        assert!(matches!(
            Circuit::from_value(&bad),
            Err(CoreError::MalformedValue { .. })
        ));
    }

    #[test]
    fn test_from_value_rejects_unknown_ordinal() {
        let bad = Value::tag(
            Value::text("circuit"),
            Value::seq(vec![
                Object::unit().to_value(),
                Object::unit().to_value(),
                Value::int(99),
                Value::Nil,
                Value::seq(vec![]),
            ]),
        );
        assert!(matches!(
            Circuit::from_value(&bad),
            Err(CoreError::UnknownPrimitive { ordinal: 99 })
        ));
    }

    #[test]
    fn test_from_value_rejects_short_digest() {
        let bad = Value::tag(
            Value::text("circuit"),
            Value::seq(vec![
                Object::unit().to_value(),
                Object::unit().to_value(),
                Value::int(1),
                Value::Nil,
                Value::seq(vec![Value::bytes(vec![1u8, 2, 3])]),
            ]),
        );
        assert!(matches!(
            Circuit::from_value(&bad),
            Err(CoreError::InvalidDigestLength { len: 3 })
        ));
    }

    #[test]
    fn test_qgid_depends_on_children() {
        let base = Circuit::new(Object::quantum(2), Object::quantum(2), Prim::Compose);
        let a = base
            .clone()
            .with_children(vec![Qgid::from_bytes([1u8; 32]), Qgid::from_bytes([2u8; 32])]);
        let b = base
            .with_children(vec![Qgid::from_bytes([2u8; 32]), Qgid::from_bytes([1u8; 32])]);
        assert_ne!(a.qgid().unwrap(), b.qgid().unwrap());
    }
}
