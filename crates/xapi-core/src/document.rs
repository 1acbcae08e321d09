//! Key-value documents — state, activity profile, agent profile.
//!
//! A document is an opaque byte blob keyed by its owner. Concurrency
//! control is optimistic: the ETag from the last read is sent back as
//! `If-Match` on save and delete.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{activity::Activity, actor::Agent};

/// The fields every document kind shares.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
  pub id:           String,
  pub content:      Vec<u8>,
  pub content_type: Option<String>,
  /// Opaque server-issued entity tag from the last retrieval.
  pub etag:         Option<String>,
  /// `Last-Modified` from the last retrieval.
  pub updated:      Option<DateTime<Utc>>,
}

impl Document {
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      ..Self::default()
    }
  }
}

/// Per-(activity, agent[, registration]) scratch state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateDocument {
  pub document:     Document,
  pub activity:     Activity,
  pub agent:        Agent,
  pub registration: Option<Uuid>,
}

/// A profile document owned by an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityProfileDocument {
  pub document: Document,
  pub activity: Activity,
}

/// A profile document owned by an agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentProfileDocument {
  pub document: Document,
  pub agent:    Agent,
}
