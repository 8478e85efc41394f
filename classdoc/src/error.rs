//! Per-document failures.
//!
//! Batch mode skips a file on any of these; single-file mode aborts.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocError {
    #[error("no class found in {}: root element is <{found}>, not a valid class XML file", path.display())]
    MalformedDocument { path: PathBuf, found: String },

    #[error("invalid XML in {}: {message}", path.display())]
    InvalidXml { path: PathBuf, message: String },

    #[error("<{element}> in {} is missing the `{attribute}` attribute", path.display())]
    MissingAttribute {
        path: PathBuf,
        element: &'static str,
        attribute: &'static str,
    },
}
