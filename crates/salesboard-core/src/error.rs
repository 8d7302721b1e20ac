//! Error types for `salesboard-core`.
//!
//! Everything here is a validation failure: the read path never mutates
//! anything, so malformed client input is the only thing the core itself
//! can reject.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed filter payload: {0}")]
  FilterPayload(#[from] serde_json::Error),

  #[error("invalid age range {0:?}: expected \"MIN-MAX\" with numeric bounds")]
  InvalidAgeRange(String),

  #[error("invalid date range: expected exactly two boundaries, got {0}")]
  InvalidDateRange(usize),

  #[error("unparseable date {0:?}: expected YYYY-MM-DD or DD-MM-YYYY")]
  InvalidDate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
