//! Statements — the immutable actor–verb–target records the LRS stores.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  actor::{Actor, Agent, Group},
  activity::Activity,
  context::Context,
  outcome::Outcome,
  verb::Verb,
  version::Version,
};

// ─── StatementRef ────────────────────────────────────────────────────────────

/// A target that merely references another statement by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementRef {
  pub id: Uuid,
}

impl StatementRef {
  pub fn new(id: Uuid) -> Self {
    Self { id }
  }
}

// ─── StatementTarget ─────────────────────────────────────────────────────────

/// The "object" position of a statement: a closed union resolved on the
/// wire by the `objectType` discriminator.
///
/// A [`SubStatement`] may appear here only at the top level; a
/// sub-statement's own target can never be another sub-statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementTarget {
  Agent(Agent),
  Group(Group),
  Activity(Activity),
  StatementRef(StatementRef),
  SubStatement(Box<SubStatement>),
}

impl StatementTarget {
  /// The `objectType` discriminant written on the wire.
  pub fn object_type(&self) -> &'static str {
    match self {
      Self::Agent(_) => "Agent",
      Self::Group(_) => "Group",
      Self::Activity(_) => "Activity",
      Self::StatementRef(_) => "StatementRef",
      Self::SubStatement(_) => "SubStatement",
    }
  }
}

impl From<Activity> for StatementTarget {
  fn from(activity: Activity) -> Self {
    Self::Activity(activity)
  }
}

impl From<StatementRef> for StatementTarget {
  fn from(r: StatementRef) -> Self {
    Self::StatementRef(r)
  }
}

impl From<SubStatement> for StatementTarget {
  fn from(sub: SubStatement) -> Self {
    Self::SubStatement(Box::new(sub))
  }
}

// ─── SubStatement ────────────────────────────────────────────────────────────

/// A statement-shaped object embedded in another statement's target
/// position. Carries no top-level fields (no id, stored, authority or
/// version), and its own target can never be a sub-statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubStatement {
  pub actor:     Option<Actor>,
  pub verb:      Option<Verb>,
  pub target:    Option<StatementTarget>,
  pub result:    Option<Outcome>,
  pub context:   Option<Context>,
  pub timestamp: Option<DateTime<Utc>>,
}

// ─── Statement ───────────────────────────────────────────────────────────────

/// An immutable record of the form actor–verb–target.
///
/// Every field is optional so that parse/render round-trips preserve which
/// keys were present on the wire; validity is the LRS's concern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
  /// Assigned by the caller before sending, or by the server on response.
  /// Immutable once set.
  pub id:        Option<Uuid>,
  pub actor:     Option<Actor>,
  pub verb:      Option<Verb>,
  pub target:    Option<StatementTarget>,
  pub result:    Option<Outcome>,
  pub context:   Option<Context>,
  pub timestamp: Option<DateTime<Utc>>,
  /// When the LRS persisted the statement. Server-assigned.
  pub stored:    Option<DateTime<Utc>>,
  pub authority: Option<Actor>,
  pub version:   Option<Version>,
}

impl Statement {
  /// Assign a fresh v4 identifier and a "now" timestamp, each only where
  /// absent. Idempotent: calling twice changes nothing after the first.
  pub fn stamp(&mut self) {
    if self.id.is_none() {
      self.id = Some(Uuid::new_v4());
    }
    if self.timestamp.is_none() {
      self.timestamp = Some(Utc::now());
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
