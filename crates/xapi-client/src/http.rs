//! The request pipeline: URL resolution, gated header assembly and
//! dispatch, and response normalization.
//!
//! The transport and its default headers (version, accept, auth, extended)
//! are shared by every call on one client, so "assemble headers → send" is
//! one atomic unit with respect to other callers: the gate is acquired
//! before header assembly and released as soon as the request has been
//! dispatched. Response bodies are read outside the gate and may stream
//! concurrently.

use chrono::{DateTime, Utc};
use reqwest::{
  Method, StatusCode,
  header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ETAG, HeaderMap, HeaderName,
           HeaderValue, LAST_MODIFIED},
};
use xapi_core::LrsResponse;

use crate::{
  RemoteLrs,
  error::{Error, Result},
};

/// The `Accept` value used when a request names no content type.
const DEFAULT_ACCEPT: &str = "application/content-stream";

// ─── Request ─────────────────────────────────────────────────────────────────

/// One request through the pipeline, before URL resolution.
pub(crate) struct HttpRequest {
  pub method:       Method,
  /// Relative resource (joined to the endpoint root) or an absolute URL.
  pub resource:     String,
  pub query:        Vec<(String, String)>,
  /// Per-request headers; a name colliding with an installed default is a
  /// `DuplicateHeader` error.
  pub headers:      Vec<(String, String)>,
  pub content_type: Option<String>,
  pub content:      Option<Vec<u8>>,
}

impl HttpRequest {
  pub fn new(method: Method, resource: impl Into<String>) -> Self {
    Self {
      method,
      resource: resource.into(),
      query: Vec::new(),
      headers: Vec::new(),
      content_type: None,
      content: None,
    }
  }

  pub fn query(mut self, query: Vec<(String, String)>) -> Self {
    self.query = query;
    self
  }

  pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.push((name.into(), value.into()));
    self
  }

  pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
    self.content_type = Some(content_type.into());
    self
  }

  pub fn body(mut self, content: Vec<u8>) -> Self {
    self.content = Some(content);
    self
  }
}

// ─── Response ────────────────────────────────────────────────────────────────

/// A normalized response. `status` is `None` when the call itself faulted;
/// the fault is carried in `error` and `content` holds its message.
pub(crate) struct HttpResponse {
  pub status:        Option<StatusCode>,
  pub content_type:  Option<String>,
  pub content:       Vec<u8>,
  pub etag:          Option<String>,
  pub last_modified: Option<DateTime<Utc>>,
  pub error:         Option<reqwest::Error>,
}

impl HttpResponse {
  fn from_transport_error(error: reqwest::Error) -> Self {
    Self {
      status:        None,
      content_type:  Some("text/plain".to_string()),
      content:       error.to_string().into_bytes(),
      etag:          None,
      last_modified: None,
      error:         Some(error),
    }
  }

  pub fn is(&self, status: StatusCode) -> bool {
    self.status == Some(status)
  }

  /// The HTTP status as an envelope error code; `-1` without a status.
  pub fn code(&self) -> i32 {
    self.status.map_or(-1, |s| i32::from(s.as_u16()))
  }

  pub fn body_text(&self) -> String {
    String::from_utf8_lossy(&self.content).into_owned()
  }

  /// Fold this response into a failed envelope, carrying the transport
  /// fault along when there is one.
  pub fn into_failure<T>(self) -> LrsResponse<T> {
    let envelope = LrsResponse::failure_from_bytes(&self.content, self.code());
    match self.error {
      Some(fault) => envelope.with_transport(Box::new(fault)),
      None => envelope,
    }
  }
}

// ─── Header assembly ─────────────────────────────────────────────────────────

/// Insert a header, failing fast when the name is already installed.
fn insert_unique(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
  let header_name = HeaderName::from_bytes(name.as_bytes())
    .map_err(|_| Error::InvalidHeader(name.to_string()))?;
  let header_value = HeaderValue::from_str(value)
    .map_err(|_| Error::InvalidHeader(name.to_string()))?;
  if headers.contains_key(&header_name) {
    return Err(Error::DuplicateHeader(name.to_string()));
  }
  headers.insert(header_name, header_value);
  Ok(())
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

impl RemoteLrs {
  /// Resolve a resource against the endpoint root. Absolute URLs pass
  /// through; relative resources are joined with exactly one `/`.
  pub(crate) fn resolve_resource(&self, resource: &str) -> String {
    if resource.starts_with("http://") || resource.starts_with("https://") {
      resource.to_string()
    } else {
      format!(
        "{}/{}",
        self.endpoint.as_str().trim_end_matches('/'),
        resource.trim_start_matches('/'),
      )
    }
  }

  /// `scheme://authority` of the configured endpoint — the base that
  /// `more` cursors resolve against.
  pub(crate) fn endpoint_origin(&self) -> String {
    self.endpoint.origin().ascii_serialization()
  }

  /// Execute one request. Transport faults are captured into the returned
  /// [`HttpResponse`], never raised; `Err` here means a programmer error
  /// (bad or duplicate header).
  pub(crate) async fn execute(&self, req: HttpRequest) -> Result<HttpResponse> {
    let url = self.resolve_resource(&req.resource);

    let dispatched = {
      // Header state is shared across calls: assemble and dispatch as one
      // unit. The guard drops on every exit path, `?` included.
      let _gate = self.gate.lock().await;

      let mut headers = HeaderMap::new();
      headers.insert(
        HeaderName::from_static("x-experience-api-version"),
        HeaderValue::from_static(self.version.as_str()),
      );
      let accept = req.content_type.as_deref().unwrap_or(DEFAULT_ACCEPT);
      headers.insert(
        ACCEPT,
        HeaderValue::from_str(accept)
          .map_err(|_| Error::InvalidHeader(ACCEPT.as_str().to_string()))?,
      );
      if let Some(auth) = &self.auth {
        headers.insert(
          AUTHORIZATION,
          HeaderValue::from_str(auth)
            .map_err(|_| Error::InvalidHeader(AUTHORIZATION.as_str().to_string()))?,
        );
      }
      for (name, value) in &self.extended {
        insert_unique(&mut headers, name, value)?;
      }
      for (name, value) in &req.headers {
        insert_unique(&mut headers, name, value)?;
      }

      let mut builder = self.client.request(req.method.clone(), &url).headers(headers);
      if !req.query.is_empty() {
        builder = builder.query(&req.query);
      }
      if let Some(content) = req.content {
        let content_type = req.content_type.as_deref().unwrap_or("text/plain");
        builder = builder.header(CONTENT_TYPE, content_type).body(content);
      }

      tracing::debug!(method = %req.method, url = %url, "dispatching LRS request");
      builder.send().await
      // gate released here; the body below streams outside the section
    };

    let response = match dispatched {
      Ok(response) => response,
      Err(error) => {
        tracing::debug!(error = %error, url = %url, "LRS transport failure");
        return Ok(HttpResponse::from_transport_error(error));
      }
    };

    let status = response.status();
    let content_type = header_str(response.headers(), &CONTENT_TYPE);
    let etag = header_str(response.headers(), &ETAG);
    let last_modified = header_str(response.headers(), &LAST_MODIFIED)
      .and_then(|v| DateTime::parse_from_rfc2822(&v).ok())
      .map(|dt| dt.with_timezone(&Utc));

    tracing::debug!(status = status.as_u16(), url = %url, "LRS response");

    match response.bytes().await {
      Ok(bytes) => Ok(HttpResponse {
        status: Some(status),
        content_type,
        content: bytes.to_vec(),
        etag,
        last_modified,
        error: None,
      }),
      // The dispatch succeeded but the body could not be read fully.
      Err(error) => Ok(HttpResponse {
        status:        Some(status),
        content_type:  Some("text/plain".to_string()),
        content:       error.to_string().into_bytes(),
        etag,
        last_modified,
        error:         Some(error),
      }),
    }
  }
}

fn header_str(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
  headers
    .get(name)
    .and_then(|v| v.to_str().ok())
    .map(str::to_string)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use xapi_core::Version;

  use super::*;
  use crate::RemoteLrs;

  fn lrs(endpoint: &str) -> RemoteLrs {
    RemoteLrs::new(endpoint, Version::latest()).unwrap()
  }

  #[test]
  fn relative_resource_joins_with_one_separator() {
    // trailing slash on the endpoint
    let a = lrs("http://lrs.example.org/xapi/");
    assert_eq!(
      a.resolve_resource("statements"),
      "http://lrs.example.org/xapi/statements"
    );
    // no trailing slash
    let b = lrs("http://lrs.example.org/xapi");
    assert_eq!(
      b.resolve_resource("statements"),
      "http://lrs.example.org/xapi/statements"
    );
    // leading slash on the resource
    assert_eq!(
      b.resolve_resource("/activities/state"),
      "http://lrs.example.org/xapi/activities/state"
    );
  }

  #[test]
  fn absolute_resource_passes_through() {
    let a = lrs("http://lrs.example.org/xapi");
    assert_eq!(
      a.resolve_resource("https://other.example.com/more/abc"),
      "https://other.example.com/more/abc"
    );
  }

  #[test]
  fn endpoint_origin_is_scheme_and_authority() {
    let a = lrs("https://lrs.example.org/deep/xapi/path");
    assert_eq!(a.endpoint_origin(), "https://lrs.example.org");
    let b = lrs("http://lrs.example.org:8123/xapi");
    assert_eq!(b.endpoint_origin(), "http://lrs.example.org:8123");
  }

  #[test]
  fn duplicate_header_is_rejected() {
    let mut headers = HeaderMap::new();
    insert_unique(&mut headers, "If-Match", "\"a\"").unwrap();
    let r = insert_unique(&mut headers, "if-match", "\"b\"");
    assert!(matches!(r, Err(Error::DuplicateHeader(_))));
    // the first value survives
    assert_eq!(headers.get("if-match").unwrap(), "\"a\"");
  }

  #[test]
  fn invalid_header_name_is_rejected() {
    let mut headers = HeaderMap::new();
    let r = insert_unique(&mut headers, "bad header\n", "x");
    assert!(matches!(r, Err(Error::InvalidHeader(_))));
  }
}
