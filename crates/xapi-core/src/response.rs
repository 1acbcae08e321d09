//! The uniform operation outcome envelope.
//!
//! Every public LRS operation resolves to an [`LrsResponse`]: network and
//! unexpected-status failures are folded into the envelope rather than
//! raised, so callers branch on [`LrsResponse::success`] and never on a
//! fault type.

/// A structured failure derived from the response body and status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseError {
  /// The response body, UTF-8 decoded (lossily).
  pub message: String,
  /// The HTTP status code, or `-1` when no status is available (the call
  /// itself faulted before a response arrived).
  pub code:    i32,
}

/// The outcome of one LRS operation.
///
/// Exactly one of (`success` with `content`) or (`!success` with `error`)
/// holds. `transport` additionally carries the underlying fault when the
/// HTTP call itself could not complete.
#[derive(Debug)]
pub struct LrsResponse<T> {
  pub success:   bool,
  pub content:   Option<T>,
  pub error:     Option<ResponseError>,
  pub transport: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl<T> LrsResponse<T> {
  pub fn ok(content: T) -> Self {
    Self {
      success:   true,
      content:   Some(content),
      error:     None,
      transport: None,
    }
  }

  pub fn failure(message: impl Into<String>, code: i32) -> Self {
    Self {
      success:   false,
      content:   None,
      error:     Some(ResponseError {
        message: message.into(),
        code,
      }),
      transport: None,
    }
  }

  /// Build a failure from raw response bytes and the status code
  /// (`-1` when no status exists).
  pub fn failure_from_bytes(content: &[u8], code: i32) -> Self {
    Self::failure(String::from_utf8_lossy(content).into_owned(), code)
  }

  pub fn with_transport(
    mut self,
    fault: Box<dyn std::error::Error + Send + Sync>,
  ) -> Self {
    self.transport = Some(fault);
    self
  }

  /// The failure message, if any.
  pub fn err_msg(&self) -> Option<&str> {
    self.error.as_ref().map(|e| e.message.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ok_holds_content_and_no_error() {
    let r = LrsResponse::ok(42);
    assert!(r.success);
    assert_eq!(r.content, Some(42));
    assert!(r.error.is_none());
  }

  #[test]
  fn failure_from_bytes_decodes_lossily() {
    let r: LrsResponse<()> = LrsResponse::failure_from_bytes(b"boom", 500);
    assert!(!r.success);
    assert!(r.content.is_none());
    assert_eq!(r.err_msg(), Some("boom"));
    assert_eq!(r.error.unwrap().code, 500);
  }
}
