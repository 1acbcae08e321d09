//! Error types for `xapi-client`.
//!
//! Only hard failures live here: malformed entities, programmer errors,
//! and construction-time problems. Transport faults and unexpected HTTP
//! statuses never surface as `Err` from an operation — they are folded
//! into the returned [`xapi_core::LrsResponse`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid endpoint URL: {0}")]
  InvalidEndpoint(String),

  #[error("failed to initialise HTTP transport: {0}")]
  Transport(reqwest::Error),

  #[error("duplicate request header: {0}")]
  DuplicateHeader(String),

  #[error("invalid request header: {0}")]
  InvalidHeader(String),

  #[error("statement batch size mismatch: sent {sent}, received {received} ids")]
  BatchMismatch { sent: usize, received: usize },

  #[error(transparent)]
  Entity(#[from] xapi_json::Error),

  #[error("cannot page further: previous result has no `more` cursor")]
  EmptyCursor,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
