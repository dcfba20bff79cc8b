//! Property suites for the field laws of ℚ(i) and the matrix identities
//! the interpreter relies on.

use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;
use qbtm_algebra::{Matrix, Qi};

fn rational() -> impl Strategy<Value = BigRational> {
    (-50i64..=50, 1i64..=50)
        .prop_map(|(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
}

fn qi() -> impl Strategy<Value = Qi> {
    (rational(), rational()).prop_map(|(re, im)| Qi::new(re, im))
}

fn matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    proptest::collection::vec(qi(), rows * cols).prop_map(move |entries| {
        let mut iter = entries.into_iter();
        Matrix::from_fn(rows, cols, |_, _| iter.next().unwrap())
    })
}

proptest! {
    #[test]
    fn addition_commutes(a in qi(), b in qi()) {
        prop_assert_eq!(&a + &b, &b + &a);
    }

    #[test]
    fn multiplication_commutes(a in qi(), b in qi()) {
        prop_assert_eq!(&a * &b, &b * &a);
    }

    #[test]
    fn addition_associates(a in qi(), b in qi(), c in qi()) {
        prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
    }

    #[test]
    fn multiplication_associates(a in qi(), b in qi(), c in qi()) {
        prop_assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
    }

    #[test]
    fn multiplication_distributes(a in qi(), b in qi(), c in qi()) {
        prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
    }

    #[test]
    fn additive_inverse(a in qi()) {
        prop_assert!((&a + &(-&a)).is_zero());
    }

    #[test]
    fn multiplicative_inverse(a in qi()) {
        if a.is_zero() {
            prop_assert!(a.inv().is_err());
        } else {
            prop_assert_eq!(&a * &a.inv().unwrap(), Qi::one());
        }
    }

    #[test]
    fn conjugation_is_involutive(a in qi()) {
        prop_assert_eq!(a.conj().conj(), a);
    }

    #[test]
    fn dagger_is_involutive(m in matrix(3, 2)) {
        prop_assert_eq!(m.dagger().dagger(), m);
    }

    #[test]
    fn dagger_reverses_products(a in matrix(2, 3), b in matrix(3, 2)) {
        let lhs = a.mul(&b).unwrap().dagger();
        let rhs = b.dagger().mul(&a.dagger()).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    // (A₁⊗B₁)·(A₂⊗B₂) = (A₁·A₂)⊗(B₁·B₂)
    #[test]
    fn kronecker_mixed_product(
        a1 in matrix(2, 2),
        a2 in matrix(2, 2),
        b1 in matrix(2, 2),
        b2 in matrix(2, 2),
    ) {
        let lhs = a1.kronecker(&b1).mul(&a2.kronecker(&b2)).unwrap();
        let rhs = a1.mul(&a2).unwrap().kronecker(&b1.mul(&b2).unwrap());
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn trace_is_linear(a in matrix(3, 3), b in matrix(3, 3)) {
        let lhs = a.add(&b).unwrap().trace().unwrap();
        let rhs = &a.trace().unwrap() + &b.trace().unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn conjugation_preserves_norm(a in qi()) {
        prop_assert_eq!(a.conj().norm_sqr(), a.norm_sqr());
    }
}
