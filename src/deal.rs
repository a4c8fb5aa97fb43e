use num_bigint::{BigUint, RandBigInt};
use num_traits::Zero;
use rand::Rng;

use crate::document::{RawShare, ShareDocument};
use crate::error::{Result, ShareError};
use crate::radix;

// Plain integer polynomial with random non-negative coefficients; values are
// written in bases picked from `bases`.

#[derive(Clone, Debug)]
pub struct DealParams {
    pub n: u64,
    pub k: u64,
    /// Candidate bases for the encoded values; base 10 when empty.
    pub bases: Vec<u32>,
    /// Bit size of the random coefficients a_1 .. a_{k-1}.
    pub coefficient_bits: u64,
}

/// Split a secret into a share document with n shares and threshold k
pub fn split_secret<R: Rng + ?Sized>(
    secret: &BigUint,
    params: &DealParams,
    rng: &mut R,
) -> Result<ShareDocument> {
    if params.k == 0 || params.k > params.n {
        return Err(ShareError::InvalidK {
            n: params.n,
            k: params.k,
        });
    }
    let bases = if params.bases.is_empty() {
        vec![10]
    } else {
        params.bases.clone()
    };

    // 1. Generate coefficients a_0 ... a_{k-1}, a_0 is the secret
    let mut coefficients = Vec::new();
    coefficients.push(secret.clone());
    for _ in 1..params.k {
        coefficients.push(rng.gen_biguint(params.coefficient_bits));
    }

    // 2. Evaluate polynomial at x = 1..=n
    let mut shares = Vec::new();
    for x in 1..=params.n {
        let y = evaluate_polynomial(&coefficients, x);
        let base = bases[rng.gen_range(0..bases.len())];
        shares.push(RawShare {
            index: x,
            base,
            value: radix::encode(&y, base)?,
        });
    }

    Ok(ShareDocument {
        n: params.n,
        k: params.k,
        shares,
    })
}

/// y = a_0 + a_1*x + ... + a_{k-1}*x^{k-1}
fn evaluate_polynomial(coefficients: &[BigUint], x: u64) -> BigUint {
    let x = BigUint::from(x);
    coefficients
        .iter()
        .rev()
        .fold(BigUint::zero(), |acc, coeff| acc * &x + coeff)
}
