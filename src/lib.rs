pub mod deal;
pub mod document;
pub mod driver;
pub mod error;
pub mod lagrange;
pub mod radix;
pub mod rational;
pub mod share;

pub use document::{RawShare, ShareDocument};
pub use driver::{process, process_batch, process_reader, recover, ProcessError, Recovery};
pub use error::ShareError;
pub use share::{Share, ShareSet};
