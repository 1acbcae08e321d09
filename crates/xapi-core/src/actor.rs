//! Actors — the "who" of a statement.
//!
//! An actor is either a single agent or a group of agents. Agents carry at
//! most one identifying attribute set (mbox, mbox SHA1, OpenID, or account);
//! the model does not enforce "exactly one" — that is the caller's contract
//! with the LRS.

/// A person (or system) identified by one inverse-functional identifier.
///
/// All fields are optional so that parse/render round-trips preserve which
/// keys were present on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Agent {
  pub name:         Option<String>,
  /// A `mailto:` IRI.
  pub mbox:         Option<String>,
  /// Hex-encoded SHA1 of the `mailto:` IRI.
  pub mbox_sha1sum: Option<String>,
  pub openid:       Option<String>,
  pub account:      Option<AgentAccount>,
}

/// An account on some home page, e.g. a username on an LMS.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentAccount {
  pub home_page: Option<String>,
  pub name:      Option<String>,
}

/// A set of agents, identified the same way an agent is, plus a member
/// list. Anonymous groups carry only members.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
  pub name:         Option<String>,
  pub mbox:         Option<String>,
  pub mbox_sha1sum: Option<String>,
  pub openid:       Option<String>,
  pub account:      Option<AgentAccount>,
  pub member:       Option<Vec<Agent>>,
}

/// Either a single [`Agent`] or a [`Group`], discriminated on the wire by
/// `objectType` (`"Agent"` when absent).
#[derive(Debug, Clone, PartialEq)]
pub enum Actor {
  Agent(Agent),
  Group(Group),
}

impl Actor {
  /// The `objectType` discriminant written on the wire.
  pub fn object_type(&self) -> &'static str {
    match self {
      Self::Agent(_) => "Agent",
      Self::Group(_) => "Group",
    }
  }
}

impl From<Agent> for Actor {
  fn from(agent: Agent) -> Self {
    Self::Agent(agent)
  }
}

impl From<Group> for Actor {
  fn from(group: Group) -> Self {
    Self::Group(group)
  }
}
