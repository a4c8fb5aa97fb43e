use thiserror::Error;

/// Everything that can go wrong while turning a share document into a secret.
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("failed to read share document: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed share document: {0}")]
    MalformedDocument(String),

    #[error("share document has no \"keys\" record")]
    MissingKeys,

    #[error("\"keys\" record is missing a non-negative integer \"{0}\"")]
    MissingNOrK(&'static str),

    #[error("share index {0} appears more than once")]
    DuplicateIndex(u64),

    #[error("share key {0:?} is not a positive decimal integer")]
    NonIntegerIndex(String),

    #[error("share {index} has no decimal integer base")]
    NonIntegerBase { index: u64 },

    #[error("share {index} has no string value")]
    ValueNotString { index: u64 },

    #[error("threshold k = {k} must be in [1, n] with n = {n}")]
    InvalidK { n: u64, k: u64 },

    #[error("document declares n = {declared} but holds {found} shares")]
    ShareCountMismatch { declared: u64, found: usize },

    #[error("base {0} is outside [2, 36]")]
    BadBase(String),

    #[error("value is empty")]
    EmptyValue,

    #[error("character {0:?} is not a base-36 digit")]
    BadDigit(char),

    #[error("digit {digit:?} is not valid in base {base}")]
    DigitOutOfRange { digit: char, base: u32 },

    #[error("not enough shares to interpolate (need {threshold}, got {share_count})")]
    InsufficientShares {
        /// Number of points requested (k)
        threshold: usize,
        /// Number of points available
        share_count: usize,
    },

    #[error("x-coordinate {0} appears more than once")]
    DuplicateX(String),

    #[error("interpolated constant term {0} is not an integer")]
    NonIntegerSecret(String),

    #[error("division by zero")]
    DivisionByZero,
}

impl ShareError {
    /// Stable kebab-case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ShareError::Io(_) => "io",
            ShareError::MalformedDocument(_) => "malformed-document",
            ShareError::MissingKeys => "missing-keys",
            ShareError::MissingNOrK(_) => "missing-n-or-k",
            ShareError::DuplicateIndex(_) => "duplicate-index",
            ShareError::NonIntegerIndex(_) => "non-integer-index",
            ShareError::NonIntegerBase { .. } => "non-integer-base",
            ShareError::ValueNotString { .. } => "value-not-string",
            ShareError::InvalidK { .. } => "invalid-k",
            ShareError::ShareCountMismatch { .. } => "share-count-mismatch",
            ShareError::BadBase(_) => "bad-base",
            ShareError::EmptyValue => "empty-value",
            ShareError::BadDigit(_) => "bad-digit",
            ShareError::DigitOutOfRange { .. } => "digit-out-of-range",
            ShareError::InsufficientShares { .. } => "insufficient-shares",
            ShareError::DuplicateX(_) => "duplicate-x",
            ShareError::NonIntegerSecret(_) => "non-integer-secret",
            ShareError::DivisionByZero => "division-by-zero",
        }
    }
}

pub type Result<T> = std::result::Result<T, ShareError>;
