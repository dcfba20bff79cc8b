//! Canonical byte encoding, decoding, and content addressing
//!
//! The encoding is byte-exact by contract: every structurally equal value
//! produces identical bytes on every platform, and the QGID is the SHA-256
//! digest of those bytes. Canonicalization rules (rationals in lowest
//! terms, magnitudes without leading zeros) are load-bearing: violating
//! them would assign different digests to equal values.
//!
//! Decoding is the strict inverse. Two discriminator prefixes are
//! overloaded by the format: `0x40` is both the literal integer 64 and the
//! non-negative long-form marker, and `0x90 0x00` is both the zero
//! rational and a non-negative rational header. The decoder attempts the
//! strict canonical long form first and falls back to the short reading;
//! payloads that are genuinely ambiguous under this rule must be
//! re-synthesized by their producer.

use crate::error::{CoreError, Result};
use crate::value::Value;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, ToPrimitive, Zero};
use sha2::{Digest, Sha256};
use std::fmt;

// Discriminator bytes. Small positive integers 1..=127 encode as their own
// byte, so every marker below lives at or above 0x40.
const MARK_INT_ZERO: u8 = 0x00;
const MARK_INT_POS: u8 = 0x40;
const MARK_INT_NEG: u8 = 0x80;
const MARK_RAT: u8 = 0x90;
const MARK_BYTES: u8 = 0xA0;
const MARK_TEXT: u8 = 0xB0;
const MARK_SEQ: u8 = 0xC0;
const MARK_TAG: u8 = 0xD0;
const MARK_FALSE: u8 = 0xE0;
const MARK_TRUE: u8 = 0xE1;
const MARK_NIL: u8 = 0xF0;

const RAT_NONNEG: u8 = 0x00;
const RAT_NEG: u8 = 0x80;

/// Maximum value-tree depth accepted by the decoder.
pub const MAX_NESTING: usize = 512;

/// Content address: the SHA-256 digest of a value's canonical encoding.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Qgid([u8; 32]);

impl Qgid {
    /// Digest length in bytes.
    pub const LEN: usize = 32;

    /// Wrap raw digest bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Wrap a byte slice, failing unless it is exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidDigestLength { len: bytes.len() })?;
        Ok(Self(arr))
    }

    /// The raw digest bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for Qgid {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Qgid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Qgid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qgid({})", self)
    }
}

impl Value {
    /// Canonical byte encoding of this value.
    ///
    /// Fails only when an integer or rational magnitude exceeds the
    /// 255-byte length prefix of the wire format.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// Content address of this value.
    pub fn qgid(&self) -> Result<Qgid> {
        let bytes = self.encode()?;
        Ok(Qgid(Sha256::digest(&bytes).into()))
    }

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Value::Int(n) => encode_int(n, out),
            Value::Rat(r) => {
                if r.is_zero() {
                    out.push(MARK_RAT);
                    out.push(RAT_NONNEG);
                    return Ok(());
                }
                out.push(MARK_RAT);
                out.push(if r.is_negative() { RAT_NEG } else { RAT_NONNEG });
                push_magnitude(r.numer().magnitude().to_bytes_be(), out)?;
                push_magnitude(r.denom().magnitude().to_bytes_be(), out)
            }
            Value::Bytes(b) => {
                out.push(MARK_BYTES);
                encode_varint(b.len() as u64, out);
                out.extend_from_slice(b);
                Ok(())
            }
            Value::Text(s) => {
                out.push(MARK_TEXT);
                encode_varint(s.len() as u64, out);
                out.extend_from_slice(s.as_bytes());
                Ok(())
            }
            Value::Seq(items) => {
                out.push(MARK_SEQ);
                encode_varint(items.len() as u64, out);
                for item in items {
                    item.encode_into(out)?;
                }
                Ok(())
            }
            Value::Tag { label, payload } => {
                out.push(MARK_TAG);
                label.encode_into(out)?;
                payload.encode_into(out)
            }
            Value::Bool(b) => {
                out.push(if *b { MARK_TRUE } else { MARK_FALSE });
                Ok(())
            }
            Value::Nil => {
                out.push(MARK_NIL);
                Ok(())
            }
        }
    }
}

fn encode_int(n: &BigInt, out: &mut Vec<u8>) -> Result<()> {
    if n.is_zero() {
        out.push(MARK_INT_ZERO);
        return Ok(());
    }
    if n.sign() == Sign::Plus && n.magnitude().bits() <= 7 {
        // 1..=127 is its own byte
        out.push(n.to_u8().unwrap_or_default());
        return Ok(());
    }
    out.push(if n.sign() == Sign::Minus {
        MARK_INT_NEG
    } else {
        MARK_INT_POS
    });
    push_magnitude(n.magnitude().to_bytes_be(), out)
}

fn push_magnitude(bytes: Vec<u8>, out: &mut Vec<u8>) -> Result<()> {
    if bytes.len() > u8::MAX as usize {
        return Err(CoreError::MagnitudeOverflow { bytes: bytes.len() });
    }
    out.push(bytes.len() as u8);
    out.extend_from_slice(&bytes);
    Ok(())
}

/// Little-endian base-128 varint, continuation bit on the high bit.
pub fn encode_varint(mut n: u64, out: &mut Vec<u8>) {
    while n >= 0x80 {
        out.push((n as u8 & 0x7F) | 0x80);
        n >>= 7;
    }
    out.push(n as u8);
}

/// Decode a single value from the front of `bytes`, returning the value
/// and the number of bytes consumed.
pub fn decode(bytes: &[u8]) -> Result<(Value, usize)> {
    let mut reader = Reader::new(bytes);
    let value = decode_value(&mut reader, 0)?;
    Ok((value, reader.pos))
}

/// Decode a back-to-back run of value encodings, consuming all of `bytes`.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<Value>> {
    let mut reader = Reader::new(bytes);
    let mut values = Vec::new();
    while !reader.is_empty() {
        values.push(decode_value(&mut reader, 0)?);
    }
    Ok(values)
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn byte(&mut self) -> Result<u8> {
        let b = *self.buf.get(self.pos).ok_or(CoreError::TruncatedValue {
            offset: self.pos,
            needed: 1,
        })?;
        self.pos += 1;
        Ok(b)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(CoreError::TruncatedValue {
            offset: self.pos,
            needed: n,
        })?;
        if end > self.buf.len() {
            return Err(CoreError::TruncatedValue {
                offset: self.pos,
                needed: end - self.buf.len(),
            });
        }
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn varint(&mut self) -> Result<u64> {
        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            let b = self.byte()?;
            if shift >= 64 || (shift == 63 && b > 1) {
                return Err(CoreError::MalformedValue {
                    reason: "varint overflows 64 bits",
                });
            }
            value |= u64::from(b & 0x7F) << shift;
            if b & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }
}

fn decode_value(r: &mut Reader<'_>, depth: usize) -> Result<Value> {
    if depth >= MAX_NESTING {
        return Err(CoreError::NestingTooDeep { limit: MAX_NESTING });
    }
    let start = r.pos;
    let mark = r.byte()?;
    match mark {
        MARK_INT_ZERO => Ok(Value::Int(BigInt::zero())),
        1..=0x3F | 0x41..=0x7F => Ok(Value::Int(BigInt::from(mark))),
        MARK_INT_POS => {
            // 0x40 doubles as the literal 64; prefer the canonical long form.
            match try_long_magnitude(r, true) {
                Some(mag) => Ok(Value::Int(BigInt::from_biguint(Sign::Plus, mag))),
                None => Ok(Value::Int(BigInt::from(64))),
            }
        }
        MARK_INT_NEG => {
            let mag = try_long_magnitude(r, false).ok_or(CoreError::MalformedValue {
                reason: "negative integer without a canonical magnitude",
            })?;
            Ok(Value::Int(BigInt::from_biguint(Sign::Minus, mag)))
        }
        MARK_RAT => {
            let sign = r.byte()?;
            match sign {
                RAT_NONNEG => match try_rational_body(r) {
                    Some((numer, denom)) => Ok(Value::Rat(make_rational(Sign::Plus, numer, denom)?)),
                    // Bare `90 00` is the zero rational.
                    None => Ok(Value::rat(0, 1)),
                },
                RAT_NEG => {
                    let (numer, denom) = try_rational_body(r).ok_or(CoreError::MalformedValue {
                        reason: "negative rational without numerator and denominator",
                    })?;
                    Ok(Value::Rat(make_rational(Sign::Minus, numer, denom)?))
                }
                _ => Err(CoreError::MalformedValue {
                    reason: "rational sign byte must be 0x00 or 0x80",
                }),
            }
        }
        MARK_BYTES => {
            let len = checked_len(r.varint()?)?;
            Ok(Value::Bytes(r.take(len)?.to_vec()))
        }
        MARK_TEXT => {
            let len = checked_len(r.varint()?)?;
            let offset = r.pos;
            let raw = r.take(len)?;
            let text = std::str::from_utf8(raw).map_err(|_| CoreError::InvalidUtf8 { offset })?;
            Ok(Value::Text(text.to_owned()))
        }
        MARK_SEQ => {
            let count = checked_len(r.varint()?)?;
            let mut items = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                items.push(decode_value(r, depth + 1)?);
            }
            Ok(Value::Seq(items))
        }
        MARK_TAG => {
            let label = decode_value(r, depth + 1)?;
            let payload = decode_value(r, depth + 1)?;
            Ok(Value::tag(label, payload))
        }
        MARK_FALSE => Ok(Value::Bool(false)),
        MARK_TRUE => Ok(Value::Bool(true)),
        MARK_NIL => Ok(Value::Nil),
        _ => Err(CoreError::UnknownDiscriminator {
            byte: mark,
            offset: start,
        }),
    }
}

/// Attempt to read a canonical length-prefixed magnitude. Restores the
/// reader position and returns `None` when the bytes do not form one.
///
/// Canonical means: length at least one, no leading zero byte, and (for
/// non-negative integers only) a single-byte magnitude of at least 0x80,
/// since smaller values use the one-byte short form instead.
fn try_long_magnitude(r: &mut Reader<'_>, nonneg: bool) -> Option<BigUint> {
    let saved = r.pos;
    let result = (|| {
        let len = r.byte().ok()? as usize;
        if len == 0 {
            return None;
        }
        let bytes = r.take(len).ok()?;
        if bytes[0] == 0 {
            return None;
        }
        if nonneg && len == 1 && bytes[0] < 0x80 {
            return None;
        }
        Some(BigUint::from_bytes_be(bytes))
    })();
    if result.is_none() {
        r.pos = saved;
    }
    result
}

/// Attempt to read the numerator/denominator body of a nonzero rational.
/// Restores the reader position and returns `None` on any failure, which
/// the caller of the non-negative case interprets as the zero rational.
fn try_rational_body(r: &mut Reader<'_>) -> Option<(BigUint, BigUint)> {
    let saved = r.pos;
    let result = (|| {
        let numer = read_magnitude(r)?;
        let denom = read_magnitude(r)?;
        Some((numer, denom))
    })();
    if result.is_none() {
        r.pos = saved;
    }
    result
}

fn read_magnitude(r: &mut Reader<'_>) -> Option<BigUint> {
    let len = r.byte().ok()? as usize;
    if len == 0 {
        return None;
    }
    let bytes = r.take(len).ok()?;
    if bytes[0] == 0 {
        return None;
    }
    Some(BigUint::from_bytes_be(bytes))
}

fn make_rational(sign: Sign, numer: BigUint, denom: BigUint) -> Result<num_rational::BigRational> {
    if denom.is_zero() {
        return Err(CoreError::MalformedValue {
            reason: "rational with zero denominator",
        });
    }
    Ok(num_rational::BigRational::new(
        BigInt::from_biguint(sign, numer),
        BigInt::from_biguint(Sign::Plus, denom),
    ))
}

fn checked_len(n: u64) -> Result<usize> {
    usize::try_from(n).map_err(|_| CoreError::MalformedValue {
        reason: "length prefix exceeds addressable memory",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(v: &Value) -> Vec<u8> {
        v.encode().unwrap()
    }

    fn roundtrip(v: &Value) {
        let bytes = enc(v);
        let (decoded, used) = decode(&bytes).unwrap();
        assert_eq!(&decoded, v);
        assert_eq!(used, bytes.len());
    }

    #[test]
    fn test_int_encodings() {
        assert_eq!(enc(&Value::int(0)), vec![0x00]);
        assert_eq!(enc(&Value::int(5)), vec![0x05]);
        assert_eq!(enc(&Value::int(127)), vec![0x7F]);
        assert_eq!(enc(&Value::int(128)), vec![0x40, 0x01, 0x80]);
        assert_eq!(enc(&Value::int(300)), vec![0x40, 0x02, 0x01, 0x2C]);
        assert_eq!(enc(&Value::int(-1)), vec![0x80, 0x01, 0x01]);
        assert_eq!(enc(&Value::int(-300)), vec![0x80, 0x02, 0x01, 0x2C]);
    }

    #[test]
    fn test_rat_encodings() {
        assert_eq!(enc(&Value::rat(0, 1)), vec![0x90, 0x00]);
        assert_eq!(
            enc(&Value::rat(1, 2)),
            vec![0x90, 0x00, 0x01, 0x01, 0x01, 0x02]
        );
        assert_eq!(
            enc(&Value::rat(-3, 4)),
            vec![0x90, 0x80, 0x01, 0x03, 0x01, 0x04]
        );
        // reduction happens before encoding
        assert_eq!(enc(&Value::rat(2, 4)), enc(&Value::rat(1, 2)));
    }

    #[test]
    fn test_bytes_text_encodings() {
        assert_eq!(
            enc(&Value::bytes(vec![1u8, 2, 3])),
            vec![0xA0, 0x03, 1, 2, 3]
        );
        assert_eq!(enc(&Value::text("hi")), vec![0xB0, 0x02, b'h', b'i']);
        assert_eq!(enc(&Value::text("")), vec![0xB0, 0x00]);
    }

    #[test]
    fn test_seq_tag_bool_nil_encodings() {
        assert_eq!(
            enc(&Value::seq(vec![Value::int(1), Value::int(2)])),
            vec![0xC0, 0x02, 0x01, 0x02]
        );
        assert_eq!(
            enc(&Value::tag(Value::text("a"), Value::int(1))),
            vec![0xD0, 0xB0, 0x01, b'a', 0x01]
        );
        assert_eq!(enc(&Value::Bool(false)), vec![0xE0]);
        assert_eq!(enc(&Value::Bool(true)), vec![0xE1]);
        assert_eq!(enc(&Value::Nil), vec![0xF0]);
    }

    #[test]
    fn test_varint_boundaries() {
        let mut out = Vec::new();
        encode_varint(127, &mut out);
        assert_eq!(out, vec![0x7F]);
        out.clear();
        encode_varint(128, &mut out);
        assert_eq!(out, vec![0x80, 0x01]);
        out.clear();
        encode_varint(300, &mut out);
        assert_eq!(out, vec![0xAC, 0x02]);
    }

    #[test]
    fn test_qgid_deterministic_and_nonzero() {
        let a = Value::int(42).qgid().unwrap();
        let b = Value::int(42).qgid().unwrap();
        assert_eq!(a, b);
        assert_ne!(a.as_bytes(), &[0u8; 32]);
        assert_ne!(a, Value::int(43).qgid().unwrap());
    }

    #[test]
    fn test_qgid_display_is_hex() {
        let id = Value::Nil.qgid().unwrap();
        let s = id.to_string();
        assert_eq!(s.len(), 64);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_roundtrip_simple_values() {
        roundtrip(&Value::int(0));
        roundtrip(&Value::int(64));
        roundtrip(&Value::int(127));
        roundtrip(&Value::int(200));
        roundtrip(&Value::int(-1));
        roundtrip(&Value::int(i64::MAX));
        roundtrip(&Value::rat(0, 1));
        roundtrip(&Value::rat(-7, 5));
        roundtrip(&Value::bytes(Vec::<u8>::new()));
        roundtrip(&Value::text("γ-ray"));
        roundtrip(&Value::Bool(true));
        roundtrip(&Value::Nil);
    }

    #[test]
    fn test_roundtrip_nested() {
        roundtrip(&Value::tag(
            Value::text("circuit"),
            Value::seq(vec![
                Value::seq(vec![Value::int(64), Value::int(1)]),
                Value::rat(1, 3),
                Value::bytes(vec![0xAB; 32]),
                Value::Nil,
            ]),
        ));
    }

    #[test]
    fn test_decode_all_stream() {
        let mut bytes = enc(&Value::int(7));
        bytes.extend(enc(&Value::text("x")));
        bytes.extend(enc(&Value::Nil));
        let values = decode_all(&bytes).unwrap();
        assert_eq!(
            values,
            vec![Value::int(7), Value::text("x"), Value::Nil]
        );
    }

    #[test]
    fn test_decode_empty_is_no_values() {
        assert_eq!(decode_all(&[]).unwrap(), Vec::<Value>::new());
        assert!(matches!(
            decode(&[]),
            Err(CoreError::TruncatedValue { .. })
        ));
    }

    #[test]
    fn test_decode_unknown_discriminator() {
        assert!(matches!(
            decode(&[0x95]),
            Err(CoreError::UnknownDiscriminator { byte: 0x95, .. })
        ));
    }

    #[test]
    fn test_decode_truncated_text() {
        assert!(matches!(
            decode(&[0xB0, 0x05, b'h', b'i']),
            Err(CoreError::TruncatedValue { .. })
        ));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert!(matches!(
            decode(&[0xB0, 0x02, 0xFF, 0xFE]),
            Err(CoreError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn test_decode_nesting_limit() {
        // seq-of-seq-of-... deeper than the decoder allows
        let mut bytes = Vec::new();
        for _ in 0..(MAX_NESTING + 1) {
            bytes.push(0xC0);
            bytes.push(0x01);
        }
        bytes.push(0xF0);
        assert!(matches!(
            decode(&bytes),
            Err(CoreError::NestingTooDeep { .. })
        ));
    }

    #[test]
    fn test_magnitude_overflow() {
        let huge = BigInt::from(1) << 4096; // 513-byte magnitude
        assert!(matches!(
            Value::Int(huge).encode(),
            Err(CoreError::MagnitudeOverflow { .. })
        ));
    }

    // The literal 64 shares its byte with the non-negative long-form
    // marker. The long reading wins only when the following bytes form a
    // canonical magnitude, so these benign adjacencies survive.
    #[test]
    fn test_int64_prefix_collision_benign_cases() {
        roundtrip(&Value::seq(vec![Value::int(64)]));
        roundtrip(&Value::seq(vec![Value::int(64), Value::int(1)]));
        roundtrip(&Value::seq(vec![Value::int(64), Value::int(200)]));
        roundtrip(&Value::seq(vec![Value::int(64), Value::text("x")]));
    }

    // `90 00` followed by what happens to parse as a canonical
    // numerator/denominator pair resolves to the long reading. Producers
    // of such payloads must re-synthesize them; the behavior is pinned
    // here so the resolution rule never drifts silently.
    #[test]
    fn test_zero_rational_prefix_collision_takes_long_reading() {
        let mut bytes = enc(&Value::rat(0, 1));
        for _ in 0..4 {
            bytes.extend(enc(&Value::int(1)));
        }
        let values = decode_all(&bytes).unwrap();
        assert_eq!(values, vec![Value::rat(1, 1)]);
    }

    #[test]
    fn test_noncanonical_rational_is_recanonicalized() {
        // 2/4 on the wire decodes to 1/2; re-encoding yields the canonical
        // bytes, so digests computed from decoded values are stable.
        let wire = vec![0x90, 0x00, 0x01, 0x02, 0x01, 0x04];
        let (v, _) = decode(&wire).unwrap();
        assert_eq!(v, Value::rat(1, 2));
    }

    #[test]
    fn test_negative_zero_magnitude_rejected() {
        assert!(matches!(
            decode(&[0x80, 0x00]),
            Err(CoreError::MalformedValue { .. })
        ));
    }
}
