//! Algebraic values: the closed sum type underlying content addressing
//!
//! Every artifact in the runtime (block types, circuits, matrices) is
//! canonically represented as a [`Value`] before hashing or storage. The
//! variant set is part of the content-address contract and is therefore
//! closed: adding a variant would silently change digests.
//!
//! # Example
//!
//! ```
//! use qbtm_core::Value;
//!
//! let v = Value::tag(Value::text("point"), Value::seq(vec![Value::int(3), Value::int(4)]));
//! assert_eq!(v.qgid().unwrap(), v.clone().qgid().unwrap());
//! ```

use num_bigint::BigInt;
use num_rational::BigRational;

/// An immutable algebraic value.
///
/// Equality is structural and recursive, and agrees with digest equality:
/// two values compare equal if and only if their canonical encodings (and
/// hence their QGIDs) coincide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Arbitrary-precision signed integer.
    Int(BigInt),
    /// Arbitrary-precision rational, kept in lowest terms with a positive
    /// denominator.
    Rat(BigRational),
    /// Finite byte sequence.
    Bytes(Vec<u8>),
    /// Unicode text, stored as UTF-8.
    Text(String),
    /// Ordered finite sequence; order is significant, duplicates allowed.
    Seq(Vec<Value>),
    /// Discriminated constructor: a label applied to a payload.
    Tag {
        label: Box<Value>,
        payload: Box<Value>,
    },
    /// Boolean.
    Bool(bool),
    /// The nil value.
    Nil,
}

impl Value {
    /// Integer value from a machine integer.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(BigInt::from(n))
    }

    /// Rational value, reduced to lowest terms with a positive denominator.
    ///
    /// # Panics
    /// Panics if `denom` is zero.
    #[inline]
    pub fn rat(numer: i64, denom: i64) -> Self {
        Value::Rat(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// Byte-sequence value.
    #[inline]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// Text value.
    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    /// Sequence value.
    #[inline]
    pub fn seq(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }

    /// Tagged value: `label` applied to `payload`.
    #[inline]
    pub fn tag(label: Value, payload: Value) -> Self {
        Value::Tag {
            label: Box::new(label),
            payload: Box::new(payload),
        }
    }

    /// Short variant name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Rat(_) => "rat",
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
            Value::Seq(_) => "seq",
            Value::Tag { .. } => "tag",
            Value::Bool(_) => "bool",
            Value::Nil => "nil",
        }
    }

    /// The integer payload, if this is an `Int`.
    #[inline]
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    /// The rational payload, if this is a `Rat`.
    #[inline]
    pub fn as_rat(&self) -> Option<&BigRational> {
        match self {
            Value::Rat(r) => Some(r),
            _ => None,
        }
    }

    /// The byte payload, if this is a `Bytes`.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The text payload, if this is a `Text`.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The items, if this is a `Seq`.
    #[inline]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Label and payload, if this is a `Tag`.
    #[inline]
    pub fn as_tag(&self) -> Option<(&Value, &Value)> {
        match self {
            Value::Tag { label, payload } => Some((label, payload)),
            _ => None,
        }
    }

    /// True if this is the nil value.
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_constructor() {
        let v = Value::int(42);
        assert_eq!(v.as_int().unwrap(), &BigInt::from(42));
    }

    #[test]
    fn test_rat_reduces_to_lowest_terms() {
        assert_eq!(Value::rat(2, 4), Value::rat(1, 2));
    }

    #[test]
    fn test_rat_normalizes_denominator_sign() {
        assert_eq!(Value::rat(1, -2), Value::rat(-1, 2));
    }

    #[test]
    fn test_structural_equality() {
        let cases = [
            (Value::int(42), Value::int(42), true),
            (Value::int(42), Value::int(43), false),
            (Value::text("a"), Value::text("a"), true),
            (Value::text("a"), Value::text("b"), false),
            (
                Value::seq(vec![Value::int(1)]),
                Value::seq(vec![Value::int(1)]),
                true,
            ),
            (Value::Nil, Value::Nil, true),
            (Value::int(1), Value::rat(1, 1), false),
            (Value::Bool(true), Value::Bool(false), false),
        ];
        for (a, b, expect) in cases {
            assert_eq!(a == b, expect, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_tag_accessors() {
        let v = Value::tag(Value::text("label"), Value::int(42));
        let (label, payload) = v.as_tag().unwrap();
        assert_eq!(label.as_text(), Some("label"));
        assert_eq!(payload.as_int().unwrap(), &BigInt::from(42));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::int(1).kind(), "int");
        assert_eq!(Value::Nil.kind(), "nil");
        assert_eq!(Value::bytes(vec![1u8]).kind(), "bytes");
    }
}
