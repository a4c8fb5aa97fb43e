use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use num_bigint::BigInt;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::document::ShareDocument;
use crate::error::ShareError;
use crate::lagrange;
use crate::rational::BigRat;
use crate::share::{as_decimal, Share, ShareSet};

/// Outcome of processing one share document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recovery {
    pub n: u64,
    pub k: u64,
    /// The k lowest-indexed shares the secret was interpolated from.
    pub points: Vec<Share>,
    #[serde(serialize_with = "as_decimal")]
    pub secret: BigInt,
    /// Unused shares that do not lie on the recovered polynomial.
    pub inconsistent: Vec<Share>,
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "n = {}", self.n)?;
        writeln!(f, "k = {}", self.k)?;
        writeln!(f, "points:")?;
        for point in &self.points {
            writeln!(f, "  {}", point)?;
        }
        if !self.inconsistent.is_empty() {
            writeln!(f, "inconsistent shares:")?;
            for share in &self.inconsistent {
                writeln!(f, "  {}", share)?;
            }
        }
        write!(f, "secret = {}", self.secret)
    }
}

/// A [`ShareError`] tagged with the document it came from.
#[derive(Error, Debug)]
#[error("{document}: {source}")]
pub struct ProcessError {
    pub document: String,
    pub source: ShareError,
}

impl ProcessError {
    fn new(document: &str, source: ShareError) -> Self {
        Self {
            document: document.to_string(),
            source,
        }
    }
}

pub type Outcome = Result<Recovery, ProcessError>;

/// Validates a parsed document and interpolates its secret.
pub fn recover(doc: &ShareDocument) -> Result<Recovery, ShareError> {
    let set = ShareSet::build(doc)?;
    // build() guarantees k <= n == shares.len()
    let k = set.k() as usize;
    let shares = set.shares();

    let secret = lagrange::evaluate(shares, k)?;

    let mut inconsistent = Vec::new();
    for share in &shares[k..] {
        let expected = lagrange::evaluate_at(shares, k, &share.x)?;
        if expected != BigRat::from_integer(share.y.clone()) {
            warn!(
                x = %share.x,
                y = %share.y,
                expected = %expected,
                "share does not lie on the recovered polynomial"
            );
            inconsistent.push(share.clone());
        }
    }

    Ok(Recovery {
        n: set.n(),
        k: set.k(),
        points: shares[..k].to_vec(),
        secret,
        inconsistent,
    })
}

/// Parses and recovers a document read from `reader`; `document` names it in
/// errors and logs.
pub fn process_reader<R: Read>(document: &str, reader: R) -> Outcome {
    let doc = ShareDocument::from_reader(reader).map_err(|e| ProcessError::new(document, e))?;
    debug!(document, n = doc.n, k = doc.k, "parsed share document");

    let recovery = recover(&doc).map_err(|e| ProcessError::new(document, e))?;
    info!(document, secret = %recovery.secret, "recovered secret");
    Ok(recovery)
}

pub fn process(path: impl AsRef<Path>) -> Outcome {
    let path = path.as_ref();
    let document = path.display().to_string();
    let file = File::open(path).map_err(|e| ProcessError::new(&document, e.into()))?;
    process_reader(&document, BufReader::new(file))
}

/// Processes every path in order; a failing document does not stop the rest.
pub fn process_batch<P: AsRef<Path>>(paths: &[P]) -> Vec<Outcome> {
    paths
        .iter()
        .map(|path| {
            let outcome = process(path);
            if let Err(e) = &outcome {
                debug!(document = %e.document, kind = e.source.kind(), "document failed");
            }
            outcome
        })
        .collect()
}
