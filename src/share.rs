use std::collections::HashSet;
use std::fmt;

use num_bigint::BigInt;
use serde::Serialize;
use tracing::debug;

use crate::document::ShareDocument;
use crate::error::{Result, ShareError};
use crate::radix;

/// A decoded point on the polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Share {
    #[serde(serialize_with = "as_decimal")]
    pub x: BigInt,
    #[serde(serialize_with = "as_decimal")]
    pub y: BigInt,
}

impl Share {
    pub fn new(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Decoded shares of one document, sorted by ascending x.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareSet {
    n: u64,
    k: u64,
    shares: Vec<Share>,
}

impl ShareSet {
    /// Validates the document's threshold and decodes every share value.
    pub fn build(doc: &ShareDocument) -> Result<Self> {
        if doc.k == 0 || doc.k > doc.n {
            return Err(ShareError::InvalidK { n: doc.n, k: doc.k });
        }
        if doc.shares.len() as u64 != doc.n {
            return Err(ShareError::ShareCountMismatch {
                declared: doc.n,
                found: doc.shares.len(),
            });
        }

        let mut seen = HashSet::with_capacity(doc.shares.len());
        let mut shares = Vec::with_capacity(doc.shares.len());
        for raw in &doc.shares {
            if raw.index == 0 {
                return Err(ShareError::NonIntegerIndex(raw.index.to_string()));
            }
            let y = radix::decode(&raw.value, raw.base)?;
            debug!(
                index = raw.index,
                base = raw.base,
                value = %raw.value,
                decoded = %y,
                "decoded share"
            );
            if !seen.insert(raw.index) {
                return Err(ShareError::DuplicateX(raw.index.to_string()));
            }
            shares.push(Share::new(raw.index, y));
        }
        shares.sort_by(|a, b| a.x.cmp(&b.x));

        Ok(Self {
            n: doc.n,
            k: doc.k,
            shares,
        })
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn k(&self) -> u64 {
        self.k
    }

    pub fn shares(&self) -> &[Share] {
        &self.shares
    }
}

pub(crate) fn as_decimal<S>(
    value: &BigInt,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RawShare;

    fn raw(index: u64, base: u32, value: &str) -> RawShare {
        RawShare {
            index,
            base,
            value: value.to_string(),
        }
    }

    fn doc(n: u64, k: u64, shares: Vec<RawShare>) -> ShareDocument {
        ShareDocument { n, k, shares }
    }

    #[test]
    fn test_build_sorts_and_decodes() {
        let set = ShareSet::build(&doc(
            4,
            3,
            vec![
                raw(6, 4, "213"),
                raw(2, 2, "111"),
                raw(1, 10, "4"),
                raw(3, 10, "12"),
            ],
        ))
        .unwrap();

        assert_eq!((set.n(), set.k()), (4, 3));
        assert_eq!(
            set.shares(),
            &[
                Share::new(1, 4),
                Share::new(2, 7),
                Share::new(3, 12),
                Share::new(6, 39)
            ]
        );
    }

    #[test]
    fn test_invalid_k() {
        let shares = vec![raw(1, 10, "1"), raw(2, 10, "2")];
        assert!(matches!(
            ShareSet::build(&doc(2, 0, shares.clone())),
            Err(ShareError::InvalidK { n: 2, k: 0 })
        ));
        assert!(matches!(
            ShareSet::build(&doc(2, 3, shares)),
            Err(ShareError::InvalidK { n: 2, k: 3 })
        ));
    }

    #[test]
    fn test_share_count_must_match_n() {
        assert!(matches!(
            ShareSet::build(&doc(3, 2, vec![raw(1, 10, "1"), raw(2, 10, "2")])),
            Err(ShareError::ShareCountMismatch {
                declared: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_decode_errors_propagate() {
        assert!(matches!(
            ShareSet::build(&doc(2, 2, vec![raw(1, 10, "10"), raw(2, 10, "ab")])),
            Err(ShareError::DigitOutOfRange { digit: 'a', base: 10 })
        ));
        assert!(matches!(
            ShareSet::build(&doc(1, 1, vec![raw(1, 10, "")])),
            Err(ShareError::EmptyValue)
        ));
        assert!(matches!(
            ShareSet::build(&doc(1, 1, vec![raw(1, 99, "1")])),
            Err(ShareError::BadBase(_))
        ));
    }

    #[test]
    fn test_duplicate_x_rejected() {
        // Documents built in code skip the parser's duplicate check.
        assert!(matches!(
            ShareSet::build(&doc(2, 2, vec![raw(5, 10, "1"), raw(5, 10, "2")])),
            Err(ShareError::DuplicateX(_))
        ));
    }

    #[test]
    fn test_zero_index_rejected() {
        assert!(matches!(
            ShareSet::build(&doc(2, 2, vec![raw(0, 10, "7"), raw(1, 10, "9")])),
            Err(ShareError::NonIntegerIndex(x)) if x == "0"
        ));
    }

    #[test]
    fn test_share_serializes_as_decimal_strings() {
        let y = BigInt::parse_bytes(b"123456789012345678901234567890", 10).unwrap();
        let share = Share::new(3, y);
        assert_eq!(
            serde_json::to_string(&share).unwrap(),
            r#"{"x":"3","y":"123456789012345678901234567890"}"#
        );
        assert_eq!(Share::new(1, 4).to_string(), "(1, 4)");
    }
}
