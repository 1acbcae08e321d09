//! Activities — the "thing acted on" of a statement.

use crate::{extensions::Extensions, language::LanguageMap};

/// Something an actor interacted with, identified by IRI.
///
/// The id is required; everything the LRS knows about the activity beyond
/// its identity lives in the optional [`ActivityDefinition`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Activity {
  pub id:         String,
  pub definition: Option<ActivityDefinition>,
}

impl Activity {
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id:         id.into(),
      definition: None,
    }
  }
}

/// Descriptive metadata for an activity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityDefinition {
  pub name:          Option<LanguageMap>,
  pub description:   Option<LanguageMap>,
  /// The activity's type IRI (wire key `type`).
  pub activity_type: Option<String>,
  pub more_info:     Option<String>,
  pub extensions:    Option<Extensions>,
}
