//! Verbs — the "what happened" of a statement.

use crate::language::LanguageMap;

/// An action identified by IRI, with optional language-keyed display names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Verb {
  pub id:      Option<String>,
  pub display: Option<LanguageMap>,
}

impl Verb {
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id:      Some(id.into()),
      display: None,
    }
  }

  pub fn with_display(
    id: impl Into<String>,
    lang: impl Into<String>,
    text: impl Into<String>,
  ) -> Self {
    Self {
      id:      Some(id.into()),
      display: Some(LanguageMap::of(lang, text)),
    }
  }

  // ── Well-known ADL verbs ──────────────────────────────────────────────

  /// The verb used to void a previously recorded statement.
  pub fn voided() -> Self {
    Self::with_display("http://adlnet.gov/expapi/verbs/voided", "en-US", "voided")
  }

  pub fn completed() -> Self {
    Self::with_display(
      "http://adlnet.gov/expapi/verbs/completed",
      "en-US",
      "completed",
    )
  }

  pub fn launched() -> Self {
    Self::with_display(
      "http://adlnet.gov/expapi/verbs/launched",
      "en-US",
      "launched",
    )
  }

  pub fn terminated() -> Self {
    Self::with_display(
      "http://adlnet.gov/expapi/verbs/terminated",
      "en-US",
      "terminated",
    )
  }
}
