//! Exact Lagrange interpolation over the rationals.
//!
//! For points (x_0, y_0) .. (x_{k-1}, y_{k-1}) the interpolant is
//! P(x) = Σ y_i · L_i(x) with L_i(x) = Π_{j≠i} (x - x_j) / (x_i - x_j).
//! Nothing is rounded, so an integer polynomial always yields an integer P(0).

use std::collections::HashSet;

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::{Result, ShareError};
use crate::rational::BigRat;
use crate::share::Share;

/// Lagrange basis polynomial L_i evaluated at `x`.
pub fn basis_at(xs: &[BigInt], i: usize, x: &BigInt) -> Result<BigRat> {
    let x_i = xs.get(i).ok_or(ShareError::InsufficientShares {
        threshold: i + 1,
        share_count: xs.len(),
    })?;
    let mut numerator = BigInt::one();
    let mut denominator = BigInt::one();

    for (j, x_j) in xs.iter().enumerate() {
        if i == j {
            continue;
        }
        numerator *= x - x_j;
        denominator *= x_i - x_j;
    }

    if denominator.is_zero() {
        return Err(ShareError::DuplicateX(x_i.to_string()));
    }
    BigRat::new(numerator, denominator)
}

/// L_i(0) = Π_{j≠i} (-x_j) / (x_i - x_j)
pub fn basis_at_zero(xs: &[BigInt], i: usize) -> Result<BigRat> {
    basis_at(xs, i, &BigInt::zero())
}

/// Evaluates the polynomial through the first `k` shares at `x`.
pub fn evaluate_at(shares: &[Share], k: usize, x: &BigInt) -> Result<BigRat> {
    let chosen = select(shares, k)?;
    let xs: Vec<BigInt> = chosen.iter().map(|s| s.x.clone()).collect();

    let mut sum = BigRat::zero();
    for (i, share) in chosen.iter().enumerate() {
        let basis = basis_at(&xs, i, x)?;
        sum = &sum + &(&basis * &BigRat::from_integer(share.y.clone()));
    }
    Ok(sum)
}

/// Recovers P(0) from the first `k` shares, which must be an integer.
pub fn evaluate(shares: &[Share], k: usize) -> Result<BigInt> {
    let secret = evaluate_at(shares, k, &BigInt::zero())?;
    secret
        .to_integer()
        .ok_or_else(|| ShareError::NonIntegerSecret(secret.to_string()))
}

fn select(shares: &[Share], k: usize) -> Result<&[Share]> {
    if k == 0 || k > shares.len() {
        return Err(ShareError::InsufficientShares {
            threshold: k,
            share_count: shares.len(),
        });
    }

    let mut seen = HashSet::with_capacity(shares.len());
    for share in shares {
        if !seen.insert(&share.x) {
            return Err(ShareError::DuplicateX(share.x.to_string()));
        }
    }

    Ok(&shares[..k])
}
