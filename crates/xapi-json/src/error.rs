//! Error types for the xapi-json codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed {entity}: {detail}")]
  Malformed {
    entity: &'static str,
    detail: String,
  },

  #[error("unknown objectType: {0:?}")]
  UnknownObjectType(String),

  #[error(transparent)]
  Core(#[from] xapi_core::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
