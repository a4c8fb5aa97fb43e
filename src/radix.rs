//! Base-2 through base-36 numerals.
//!
//! Digits are `0-9` followed by `a-z`; letters are case-insensitive on input
//! and always lowercase on output.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

use crate::error::{Result, ShareError};

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn check_base(base: u32) -> Result<()> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(ShareError::BadBase(base.to_string()))
    }
}

fn digit_value(c: char) -> Result<u32> {
    match c {
        '0'..='9' => Ok(c as u32 - '0' as u32),
        'a'..='z' => Ok(c as u32 - 'a' as u32 + 10),
        'A'..='Z' => Ok(c as u32 - 'A' as u32 + 10),
        _ => Err(ShareError::BadDigit(c)),
    }
}

/// Parses the textual base of a share entry, e.g. `"16"`.
///
/// `index` only labels the error when the text is not a decimal integer.
pub fn parse_base(text: &str, index: u64) -> Result<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ShareError::NonIntegerBase { index });
    }
    let base: u32 = text
        .parse()
        .map_err(|_| ShareError::BadBase(text.to_string()))?;
    check_base(base)?;
    Ok(base)
}

/// Decodes `value` as a non-negative integer written in `base`.
pub fn decode(value: &str, base: u32) -> Result<BigInt> {
    check_base(base)?;
    if value.is_empty() {
        return Err(ShareError::EmptyValue);
    }

    let mut digits = Vec::with_capacity(value.len());
    for c in value.chars() {
        let d = digit_value(c)?;
        if d >= base {
            return Err(ShareError::DigitOutOfRange { digit: c, base });
        }
        digits.push(d as u8);
    }

    // Validated above, so from_radix_be cannot reject the digits.
    BigInt::from_radix_be(Sign::Plus, &digits, base)
        .ok_or_else(|| ShareError::BadBase(base.to_string()))
}

/// Writes `value` in `base` using the shortest form, `"0"` for zero.
pub fn encode(value: &BigUint, base: u32) -> Result<String> {
    check_base(base)?;
    if value.is_zero() {
        return Ok("0".to_string());
    }
    Ok(value
        .to_radix_be(base)
        .iter()
        .map(|&d| ALPHABET[d as usize] as char)
        .collect())
}
