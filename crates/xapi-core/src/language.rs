//! Language-keyed display strings (RFC 5646 tag → text).

use std::collections::BTreeMap;

/// An ordered map of language tag to human-readable text, e.g.
/// `{"en-US": "completed"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMap(BTreeMap<String, String>);

impl LanguageMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Single-entry convenience constructor.
  pub fn of(lang: impl Into<String>, text: impl Into<String>) -> Self {
    let mut map = Self::new();
    map.insert(lang, text);
    map
  }

  pub fn insert(&mut self, lang: impl Into<String>, text: impl Into<String>) {
    self.0.insert(lang.into(), text.into());
  }

  pub fn get(&self, lang: &str) -> Option<&str> {
    self.0.get(lang).map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
    self.0.iter()
  }
}

impl FromIterator<(String, String)> for LanguageMap {
  fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}
