//! Exact rational arithmetic on top of `num_bigint::BigInt`.
//!
//! A [`BigRat`] is always kept in lowest terms with a strictly positive
//! denominator, so two equal rationals always have identical parts and zero is
//! always `0/1`.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{Result, ShareError};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigRat {
    numer: BigInt,
    denom: BigInt,
}

impl BigRat {
    /// Builds `numer / denom` in lowest terms.
    pub fn new(numer: BigInt, denom: BigInt) -> Result<Self> {
        if denom.is_zero() {
            return Err(ShareError::DivisionByZero);
        }
        Ok(Self::reduce(numer, denom))
    }

    pub fn from_integer(value: BigInt) -> Self {
        Self {
            numer: value,
            denom: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    pub fn one() -> Self {
        Self::from_integer(BigInt::one())
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    /// The integer value, if the rational has denominator 1.
    pub fn to_integer(&self) -> Option<BigInt> {
        self.is_integer().then(|| self.numer.clone())
    }

    pub fn recip(&self) -> Result<Self> {
        Self::new(self.denom.clone(), self.numer.clone())
    }

    pub fn checked_div(&self, rhs: &BigRat) -> Result<Self> {
        if rhs.is_zero() {
            return Err(ShareError::DivisionByZero);
        }
        Ok(Self::reduce(
            &self.numer * &rhs.denom,
            &self.denom * &rhs.numer,
        ))
    }

    // Caller guarantees denom != 0.
    fn reduce(mut numer: BigInt, mut denom: BigInt) -> Self {
        if denom.is_negative() {
            numer = -numer;
            denom = -denom;
        }
        let g = numer.gcd(&denom);
        if !g.is_one() {
            // gcd(0, d) = d, which collapses zero to 0/1
            numer = numer.div_floor(&g);
            denom = denom.div_floor(&g);
        }
        Self { numer, denom }
    }
}

impl From<BigInt> for BigRat {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

impl From<i64> for BigRat {
    fn from(value: i64) -> Self {
        Self::from_integer(BigInt::from(value))
    }
}

impl Add<&BigRat> for &BigRat {
    type Output = BigRat;

    fn add(self, rhs: &BigRat) -> BigRat {
        if self.denom == rhs.denom {
            return BigRat::reduce(&self.numer + &rhs.numer, self.denom.clone());
        }
        BigRat::reduce(
            &self.numer * &rhs.denom + &rhs.numer * &self.denom,
            &self.denom * &rhs.denom,
        )
    }
}

impl Sub<&BigRat> for &BigRat {
    type Output = BigRat;

    fn sub(self, rhs: &BigRat) -> BigRat {
        self + &(-rhs)
    }
}

impl Mul<&BigRat> for &BigRat {
    type Output = BigRat;

    fn mul(self, rhs: &BigRat) -> BigRat {
        BigRat::reduce(&self.numer * &rhs.numer, &self.denom * &rhs.denom)
    }
}

impl Neg for &BigRat {
    type Output = BigRat;

    fn neg(self) -> BigRat {
        BigRat {
            numer: -&self.numer,
            denom: self.denom.clone(),
        }
    }
}

impl Neg for BigRat {
    type Output = BigRat;

    fn neg(self) -> BigRat {
        BigRat {
            numer: -self.numer,
            denom: self.denom,
        }
    }
}

impl Ord for BigRat {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplying keeps the order.
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl PartialOrd for BigRat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BigRat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64, d: i64) -> BigRat {
        BigRat::new(BigInt::from(n), BigInt::from(d)).unwrap()
    }

    fn assert_normalized(r: &BigRat) {
        assert!(r.denom().is_positive());
        assert!(r.numer().gcd(r.denom()).is_one());
    }

    #[test]
    fn test_new_reduces_and_moves_sign() {
        let r = rat(6, -4);
        assert_eq!(r.numer(), &BigInt::from(-3));
        assert_eq!(r.denom(), &BigInt::from(2));
        assert_normalized(&r);

        let r = rat(-6, -4);
        assert_eq!(r, rat(3, 2));
    }

    #[test]
    fn test_zero_is_canonical() {
        assert_eq!(rat(0, 7), BigRat::zero());
        assert_eq!(rat(0, -7).denom(), &BigInt::one());
        assert_eq!((&rat(1, 3) - &rat(1, 3)), BigRat::zero());
    }

    #[test]
    fn test_zero_denominator_rejected() {
        assert!(matches!(
            BigRat::new(BigInt::one(), BigInt::zero()),
            Err(ShareError::DivisionByZero)
        ));
        assert!(matches!(
            BigRat::zero().recip(),
            Err(ShareError::DivisionByZero)
        ));
        assert!(matches!(
            rat(1, 2).checked_div(&BigRat::zero()),
            Err(ShareError::DivisionByZero)
        ));
    }

    #[test]
    fn test_arithmetic() {
        let a = rat(1, 6);
        let b = rat(1, 3);
        assert_eq!(&a + &b, rat(1, 2));
        assert_eq!(&a - &b, rat(-1, 6));
        assert_eq!(&a * &b, rat(1, 18));
        assert_eq!(a.checked_div(&b).unwrap(), rat(1, 2));
        assert_eq!(rat(-2, 3).recip().unwrap(), rat(-3, 2));
        assert_eq!(-rat(2, 3), rat(-2, 3));
    }

    #[test]
    fn test_operations_stay_normalized() {
        let values = [rat(4, 6), rat(-9, 12), rat(5, 1), rat(0, 3), rat(-7, -21)];
        for a in &values {
            for b in &values {
                assert_normalized(&(a + b));
                assert_normalized(&(a - b));
                assert_normalized(&(a * b));
                if !b.is_zero() {
                    assert_normalized(&a.checked_div(b).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_integer_detection() {
        assert!(rat(10, 5).is_integer());
        assert_eq!(rat(10, 5).to_integer(), Some(BigInt::from(2)));
        assert_eq!(rat(10, 4).to_integer(), None);
    }

    #[test]
    fn test_ordering_and_display() {
        assert!(rat(-1, 2) < rat(1, 3));
        assert!(rat(2, 3) > rat(3, 5));
        assert_eq!(rat(-3, 6).to_string(), "-1/2");
        assert_eq!(rat(8, 4).to_string(), "2");
    }
}
