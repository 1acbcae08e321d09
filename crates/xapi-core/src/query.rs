//! Statement query filters and the paged result set.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{actor::Agent, statement::Statement};

/// Filters for the statements query resource. All filters are optional;
/// the empty query returns the LRS's default first page.
#[derive(Debug, Clone, Default)]
pub struct StatementsQuery {
  pub agent:              Option<Agent>,
  pub verb_id:            Option<String>,
  pub activity_id:        Option<String>,
  pub registration:       Option<Uuid>,
  /// Match statements whose context activities include `activity_id`.
  pub related_activities: Option<bool>,
  /// Match statements whose instructor/team/authority include `agent`.
  pub related_agents:     Option<bool>,
  pub since:              Option<DateTime<Utc>>,
  pub until:              Option<DateTime<Utc>>,
  pub limit:              Option<u32>,
  pub format:             Option<QueryResultFormat>,
  pub ascending:          Option<bool>,
}

/// How much of each statement the LRS should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryResultFormat {
  Ids,
  Exact,
  Canonical,
}

impl QueryResultFormat {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Ids => "ids",
      Self::Exact => "exact",
      Self::Canonical => "canonical",
    }
  }
}

/// One page of a statements query.
///
/// `more` is an opaque continuation reference, resolved against the
/// endpoint's host authority; empty or absent means no further pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementsResult {
  pub statements: Vec<Statement>,
  pub more:       Option<String>,
}

impl StatementsResult {
  /// The continuation cursor, if it is present and non-empty.
  pub fn more_cursor(&self) -> Option<&str> {
    self.more.as_deref().filter(|m| !m.is_empty())
  }
}
