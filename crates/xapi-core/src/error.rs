//! Error types for `xapi-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown xAPI version: {0:?}")]
  UnknownVersion(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
