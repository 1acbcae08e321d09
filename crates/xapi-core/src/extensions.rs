//! IRI-keyed extension maps carrying arbitrary JSON values.

use std::collections::BTreeMap;

use serde_json::Value;

/// Open-ended extension data attached to activities, outcomes, contexts
/// and the about resource. Keys are IRIs; values are arbitrary JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions(BTreeMap<String, Value>);

impl Extensions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, iri: impl Into<String>, value: Value) {
    self.0.insert(iri.into(), value);
  }

  pub fn get(&self, iri: &str) -> Option<&Value> {
    self.0.get(iri)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.0.iter()
  }
}

impl FromIterator<(String, Value)> for Extensions {
  fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}
