//! Abstention type shared by every sniffer.
//!
//! A sniffer either commits to a classification or abstains. Abstentions are
//! not failures of the program: the caller recovers by trying a less specific
//! sniffer and, ultimately, by classifying the column as text. The payloads
//! exist for `debug!` diagnostics only.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SniffError {
    #[error("no values to decide on")]
    Empty,
    #[error("no value dominates: top {top} of {total}")]
    Ambiguous { top: usize, total: usize },
    #[error("{errors} of {rows} row(s) do not fit a numeric layout")]
    TooManyErrors { errors: usize, rows: usize },
    #[error("{0}")]
    Unrecognized(String),
}

impl SniffError {
    pub(crate) fn unrecognized(reason: impl Into<String>) -> Self {
        SniffError::Unrecognized(reason.into())
    }
}

pub type Sniff<T> = Result<T, SniffError>;
