//! Exact matrices over the Gaussian rationals
//!
//! Row-major storage with the shape fixed at construction; every
//! operation allocates a fresh result and leaves its operands untouched.
//! Shape violations are reported as errors, never silently resized.

use crate::error::{AlgebraError, Result};
use crate::qi::Qi;
use num_rational::BigRational;
use std::fmt;

/// A rows×cols matrix of Gaussian rationals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Qi>,
}

impl Matrix {
    /// The zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![Qi::zero(); rows * cols],
        }
    }

    /// The n×n identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, Qi::one());
        }
        m
    }

    /// Build a matrix entry-by-entry from a closure over (row, col).
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Qi) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True for square matrices.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The entries in row-major order.
    #[inline]
    pub fn data(&self) -> &[Qi] {
        &self.data
    }

    /// The entry at (i, j).
    ///
    /// # Panics
    /// Panics if the indices are out of bounds; index validity is the
    /// caller's contract, as with slice indexing.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> &Qi {
        assert!(i < self.rows && j < self.cols, "index ({i},{j}) out of bounds");
        &self.data[i * self.cols + j]
    }

    /// Replace the entry at (i, j).
    ///
    /// # Panics
    /// Panics if the indices are out of bounds.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: Qi) {
        assert!(i < self.rows && j < self.cols, "index ({i},{j}) out of bounds");
        self.data[i * self.cols + j] = v;
    }

    /// Matrix product self·rhs.
    pub fn mul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(self.shape_mismatch("mul", rhs));
        }
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut sum = Qi::zero();
                for k in 0..self.cols {
                    sum = &sum + &(self.get(i, k) * rhs.get(k, j));
                }
                out.set(i, j, sum);
            }
        }
        Ok(out)
    }

    /// Entrywise sum.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.shape() != rhs.shape() {
            return Err(self.shape_mismatch("add", rhs));
        }
        Ok(self.zip_entries(rhs, |a, b| a + b))
    }

    /// Entrywise difference.
    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.shape() != rhs.shape() {
            return Err(self.shape_mismatch("sub", rhs));
        }
        Ok(self.zip_entries(rhs, |a, b| a - b))
    }

    /// Scale every entry by a rational.
    pub fn scale(&self, r: &BigRational) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|q| q.scale(r)).collect(),
        }
    }

    /// Conjugate transpose: B[j,i] = conj(A[i,j]).
    pub fn dagger(&self) -> Matrix {
        Matrix::from_fn(self.cols, self.rows, |i, j| self.get(j, i).conj())
    }

    /// Kronecker product A ⊗ B with shape (A.rows·B.rows, A.cols·B.cols).
    pub fn kronecker(&self, rhs: &Matrix) -> Matrix {
        let mut out = Matrix::zeros(self.rows * rhs.rows, self.cols * rhs.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                let a_ij = self.get(i, j);
                for k in 0..rhs.rows {
                    for l in 0..rhs.cols {
                        out.set(i * rhs.rows + k, j * rhs.cols + l, a_ij * rhs.get(k, l));
                    }
                }
            }
        }
        out
    }

    /// Outer product |u⟩⟨v| = u·v† of two column vectors.
    pub fn outer(u: &Matrix, v: &Matrix) -> Result<Matrix> {
        if u.cols != 1 || v.cols != 1 {
            return Err(u.shape_mismatch("outer", v));
        }
        u.mul(&v.dagger())
    }

    /// Trace of a square matrix.
    pub fn trace(&self) -> Result<Qi> {
        if !self.is_square() {
            return Err(AlgebraError::NotSquare {
                op: "trace",
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut sum = Qi::zero();
        for i in 0..self.rows {
            sum = &sum + self.get(i, i);
        }
        Ok(sum)
    }

    /// True iff the matrix equals its own conjugate transpose.
    pub fn is_hermitian(&self) -> bool {
        self.is_square() && *self == self.dagger()
    }

    fn zip_entries(&self, rhs: &Matrix, f: impl Fn(&Qi, &Qi) -> Qi) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        }
    }

    fn shape_mismatch(&self, op: &'static str, rhs: &Matrix) -> AlgebraError {
        AlgebraError::ShapeMismatch {
            op,
            lhs_rows: self.rows,
            lhs_cols: self.cols,
            rhs_rows: rhs.rows,
            rhs_cols: rhs.cols,
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            f.write_str(if i == 0 { "[" } else { " " })?;
            for j in 0..self.cols {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", self.get(i, j))?;
            }
            f.write_str(if i + 1 == self.rows { "]" } else { "\n" })?;
        }
        Ok(())
    }
}
