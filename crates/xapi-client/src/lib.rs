//! Async HTTP client for xAPI Learning Record Stores.
//!
//! [`RemoteLrs`] implements [`xapi_core::Lrs`] over a single shared
//! `reqwest` transport. Every operation resolves to an
//! [`xapi_core::LrsResponse`]; network faults and unexpected statuses are
//! reported inside the envelope, while malformed entities and programmer
//! errors surface as [`Error`].
//!
//! # Quick start
//!
//! ```no_run
//! use xapi_core::{Lrs, Version, statement::Statement};
//! use xapi_client::RemoteLrs;
//!
//! # async fn run() -> Result<(), xapi_client::Error> {
//! let lrs = RemoteLrs::with_basic_auth(
//!   "https://lrs.example.org/xapi",
//!   Version::latest(),
//!   "key",
//!   "secret",
//! )?;
//!
//! let mut statement = Statement::default();
//! statement.stamp();
//! let outcome = lrs.save_statement(&mut statement).await?;
//! assert!(outcome.success);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod documents;
mod http;
mod lrs;
mod params;
mod statements;

pub use error::{Error, Result};

use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use reqwest::{Client, Url};
use tokio::sync::Mutex;
use xapi_core::Version;

/// A remote Learning Record Store, reached over HTTP(S).
///
/// One client instance owns one transport. Concurrent calls are safe: the
/// header-assembly-and-dispatch step is serialized by an internal gate, so
/// per-call header state can never leak between in-flight requests, while
/// response bodies still stream in parallel.
pub struct RemoteLrs {
  client:   Client,
  endpoint: Url,
  version:  Version,
  /// Pre-computed `Authorization` header value, e.g. `Basic dXNlcjpwYXNz`.
  auth:     Option<String>,
  /// Extra default headers installed on every request.
  extended: BTreeMap<String, String>,
  /// Capacity-one gate around header assembly and dispatch.
  gate:     Mutex<()>,
}

impl RemoteLrs {
  /// Connect anonymously to the LRS rooted at `endpoint`.
  pub fn new(endpoint: &str, version: Version) -> Result<Self> {
    let endpoint = Url::parse(endpoint)
      .map_err(|e| Error::InvalidEndpoint(format!("{endpoint:?}: {e}")))?;
    let client = Client::builder().build().map_err(Error::Transport)?;
    Ok(Self {
      client,
      endpoint,
      version,
      auth: None,
      extended: BTreeMap::new(),
      gate: Mutex::new(()),
    })
  }

  /// Connect with HTTP basic authentication.
  pub fn with_basic_auth(
    endpoint: &str,
    version: Version,
    username: &str,
    password: &str,
  ) -> Result<Self> {
    let mut lrs = Self::new(endpoint, version)?;
    lrs.set_auth(username, password);
    Ok(lrs)
  }

  /// Derive and install a basic-auth token from `username:password`.
  pub fn set_auth(&mut self, username: &str, password: &str) {
    let token = B64.encode(format!("{username}:{password}"));
    self.auth = Some(format!("Basic {token}"));
  }

  /// Install an extra default header sent with every request.
  ///
  /// A per-request header colliding with an extended header fails that
  /// call with [`Error::DuplicateHeader`].
  pub fn add_extended_header(
    &mut self,
    name: impl Into<String>,
    value: impl Into<String>,
  ) {
    self.extended.insert(name.into(), value.into());
  }

  pub fn version(&self) -> Version {
    self.version
  }

  pub fn endpoint(&self) -> &Url {
    &self.endpoint
  }
}
