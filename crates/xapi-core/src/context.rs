//! Statement context — the circumstances an experience happened in.

use uuid::Uuid;

use crate::{
  activity::Activity,
  actor::{Actor, Group},
  extensions::Extensions,
  statement::StatementRef,
};

/// Contextual metadata: registration, instructor/team, related activities,
/// platform and language, and a reference to a containing statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
  pub registration:       Option<Uuid>,
  pub instructor:         Option<Actor>,
  pub team:               Option<Group>,
  pub context_activities: Option<ContextActivities>,
  pub revision:           Option<String>,
  pub platform:           Option<String>,
  pub language:           Option<String>,
  pub statement:          Option<StatementRef>,
  pub extensions:         Option<Extensions>,
}

/// Activities related to the statement's own target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextActivities {
  pub parent:   Option<Vec<Activity>>,
  pub grouping: Option<Vec<Activity>>,
  pub category: Option<Vec<Activity>>,
  pub other:    Option<Vec<Activity>>,
}
