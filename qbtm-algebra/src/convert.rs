//! Matrix ⇄ value conversion
//!
//! Matrices travel through circuit `data` fields in their canonical value
//! form: `Tag("matrix", Seq[Int rows, Int cols, Seq entries])` with each
//! entry `Tag("qi", Seq[Rat re, Rat im])`. This is the sole channel for
//! carrying matrices through the content-addressed layer, so the
//! conversion is reversible and strict about shape.

use crate::error::{AlgebraError, Result};
use crate::matrix::Matrix;
use crate::qi::Qi;
use num_traits::ToPrimitive;
use qbtm_core::Value;

/// Canonical value form of a Gaussian rational.
pub fn qi_to_value(q: &Qi) -> Value {
    Value::tag(
        Value::text("qi"),
        Value::seq(vec![
            Value::Rat(q.re().clone()),
            Value::Rat(q.im().clone()),
        ]),
    )
}

/// Parse a Gaussian rational from its value form.
pub fn qi_from_value(value: &Value) -> Result<Qi> {
    let (label, payload) = value.as_tag().ok_or(AlgebraError::MalformedMatrix {
        reason: "entry must be a tagged value",
    })?;
    if label.as_text() != Some("qi") {
        return Err(AlgebraError::MalformedMatrix {
            reason: "entry tag label must be \"qi\"",
        });
    }
    let items = payload.as_seq().ok_or(AlgebraError::MalformedMatrix {
        reason: "entry payload must be a sequence",
    })?;
    let [re, im]: &[Value; 2] = items.try_into().map_err(|_| AlgebraError::MalformedMatrix {
        reason: "entry payload must hold exactly a real and an imaginary part",
    })?;
    let re = re.as_rat().ok_or(AlgebraError::MalformedMatrix {
        reason: "real part must be a rational",
    })?;
    let im = im.as_rat().ok_or(AlgebraError::MalformedMatrix {
        reason: "imaginary part must be a rational",
    })?;
    Ok(Qi::new(re.clone(), im.clone()))
}

/// Canonical value form of a matrix.
pub fn matrix_to_value(m: &Matrix) -> Value {
    let entries = m.data().iter().map(qi_to_value).collect();
    Value::tag(
        Value::text("matrix"),
        Value::seq(vec![
            Value::int(m.rows() as i64),
            Value::int(m.cols() as i64),
            Value::Seq(entries),
        ]),
    )
}

/// Parse a matrix from its value form, validating the declared shape
/// against the entry count.
pub fn matrix_from_value(value: &Value) -> Result<Matrix> {
    let (label, payload) = value.as_tag().ok_or(AlgebraError::MalformedMatrix {
        reason: "matrix must be a tagged value",
    })?;
    if label.as_text() != Some("matrix") {
        return Err(AlgebraError::MalformedMatrix {
            reason: "matrix tag label must be \"matrix\"",
        });
    }
    let items = payload.as_seq().ok_or(AlgebraError::MalformedMatrix {
        reason: "matrix payload must be a sequence",
    })?;
    let [rows, cols, entries]: &[Value; 3] =
        items.try_into().map_err(|_| AlgebraError::MalformedMatrix {
            reason: "matrix payload must hold rows, cols, and entries",
        })?;

    let rows = dimension(rows, "rows")?;
    let cols = dimension(cols, "cols")?;
    let entries = entries.as_seq().ok_or(AlgebraError::MalformedMatrix {
        reason: "matrix entries must be a sequence",
    })?;
    let expected = rows.checked_mul(cols).ok_or(AlgebraError::MalformedMatrix {
        reason: "matrix shape overflows",
    })?;
    if entries.len() != expected {
        return Err(AlgebraError::MalformedMatrix {
            reason: "entry count does not match the declared shape",
        });
    }

    let mut m = Matrix::zeros(rows, cols);
    for (index, item) in entries.iter().enumerate() {
        m.set(index / cols, index % cols, qi_from_value(item)?);
    }
    Ok(m)
}

fn dimension(value: &Value, which: &'static str) -> Result<usize> {
    value
        .as_int()
        .and_then(|n| n.to_usize())
        .ok_or(AlgebraError::MalformedMatrix {
            reason: match which {
                "rows" => "rows must be a non-negative integer",
                _ => "cols must be a non-negative integer",
            },
        })
}
