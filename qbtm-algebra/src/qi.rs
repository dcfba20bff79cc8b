//! Gaussian rationals: exact complex numbers over ℚ(i)
//!
//! A [`Qi`] is a pair (re, im) of arbitrary-precision rationals. All
//! operations are exact; there is no floating point anywhere in the
//! field. The reduced-fraction invariant is inherited from the
//! underlying rational type, so structurally equal numbers always have
//! identical component representations.

use crate::error::{AlgebraError, Result};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// An exact complex number a + bi with a, b ∈ ℚ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Qi {
    re: BigRational,
    im: BigRational,
}

impl Qi {
    /// A Gaussian rational from its real and imaginary parts.
    #[inline]
    pub fn new(re: BigRational, im: BigRational) -> Self {
        Self { re, im }
    }

    /// A Gaussian rational from machine-integer parts.
    pub fn from_ints(re: i64, im: i64) -> Self {
        Self {
            re: BigRational::from_integer(BigInt::from(re)),
            im: BigRational::from_integer(BigInt::from(im)),
        }
    }

    /// Zero: (0, 0).
    pub fn zero() -> Self {
        Self {
            re: BigRational::zero(),
            im: BigRational::zero(),
        }
    }

    /// One: (1, 0).
    pub fn one() -> Self {
        Self {
            re: BigRational::one(),
            im: BigRational::zero(),
        }
    }

    /// The imaginary unit: (0, 1).
    pub fn i() -> Self {
        Self {
            re: BigRational::zero(),
            im: BigRational::one(),
        }
    }

    /// Real part.
    #[inline]
    pub fn re(&self) -> &BigRational {
        &self.re
    }

    /// Imaginary part.
    #[inline]
    pub fn im(&self) -> &BigRational {
        &self.im
    }

    /// True iff both parts are zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    /// Complex conjugate (a, -b).
    pub fn conj(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: -&self.im,
        }
    }

    /// Squared norm |q|² = a² + b², a rational.
    pub fn norm_sqr(&self) -> BigRational {
        &self.re * &self.re + &self.im * &self.im
    }

    /// Multiplicative inverse conj(q)/|q|².
    ///
    /// Fails with [`AlgebraError::DivisionByZero`] iff `q` is zero.
    pub fn inv(&self) -> Result<Self> {
        let norm = self.norm_sqr();
        if norm.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(Self {
            re: &self.re / &norm,
            im: -&self.im / &norm,
        })
    }

    /// Division self/rhs.
    pub fn div(&self, rhs: &Qi) -> Result<Self> {
        Ok(self * &rhs.inv()?)
    }

    /// Scale by a rational.
    pub fn scale(&self, r: &BigRational) -> Self {
        Self {
            re: &self.re * r,
            im: &self.im * r,
        }
    }
}

impl Add for &Qi {
    type Output = Qi;

    fn add(self, rhs: &Qi) -> Qi {
        Qi {
            re: &self.re + &rhs.re,
            im: &self.im + &rhs.im,
        }
    }
}

impl Sub for &Qi {
    type Output = Qi;

    fn sub(self, rhs: &Qi) -> Qi {
        Qi {
            re: &self.re - &rhs.re,
            im: &self.im - &rhs.im,
        }
    }
}

impl Mul for &Qi {
    type Output = Qi;

    // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
    fn mul(self, rhs: &Qi) -> Qi {
        Qi {
            re: &self.re * &rhs.re - &self.im * &rhs.im,
            im: &self.re * &rhs.im + &self.im * &rhs.re,
        }
    }
}

impl Neg for &Qi {
    type Output = Qi;

    fn neg(self) -> Qi {
        Qi {
            re: -&self.re,
            im: -&self.im,
        }
    }
}

impl Add for Qi {
    type Output = Qi;

    fn add(self, rhs: Qi) -> Qi {
        &self + &rhs
    }
}

impl Sub for Qi {
    type Output = Qi;

    fn sub(self, rhs: Qi) -> Qi {
        &self - &rhs
    }
}

impl Mul for Qi {
    type Output = Qi;

    fn mul(self, rhs: Qi) -> Qi {
        &self * &rhs
    }
}

impl Neg for Qi {
    type Output = Qi;

    fn neg(self) -> Qi {
        -&self
    }
}

impl fmt::Display for Qi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_zero() {
            write!(f, "{}", self.re)
        } else if self.re.is_zero() {
            write!(f, "{}i", self.im)
        } else if self.im.is_negative() {
            write!(f, "{}-{}i", self.re, -&self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}
