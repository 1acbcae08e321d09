//! Entity → JSON rendering.
//!
//! Unset fields are omitted entirely (never rendered as `null`), so the
//! output re-parses to an equal entity. Each concrete actor/target variant
//! writes its own `objectType` discriminator.

use serde_json::{Map, Value};
use xapi_core::{
  Version,
  about::About,
  activity::{Activity, ActivityDefinition},
  actor::{Actor, Agent, AgentAccount, Group},
  context::{Context, ContextActivities},
  extensions::Extensions,
  language::LanguageMap,
  outcome::{Outcome, Score},
  query::StatementsResult,
  statement::{Statement, StatementRef, StatementTarget, SubStatement},
  verb::Verb,
};

use crate::ToJson;

type Object = Map<String, Value>;

// ─── Value helpers ───────────────────────────────────────────────────────────

fn set(obj: &mut Object, key: &str, value: Value) {
  obj.insert(key.to_string(), value);
}

fn set_str(obj: &mut Object, key: &str, value: &str) {
  set(obj, key, Value::String(value.to_string()));
}

fn set_opt_str(obj: &mut Object, key: &str, value: &Option<String>) {
  if let Some(v) = value {
    set_str(obj, key, v);
  }
}

fn set_opt_bool(obj: &mut Object, key: &str, value: Option<bool>) {
  if let Some(v) = value {
    set(obj, key, Value::Bool(v));
  }
}

fn set_opt_f64(obj: &mut Object, key: &str, value: Option<f64>) {
  if let Some(v) = value {
    set(obj, key, Value::from(v));
  }
}

fn language_map_value(map: &LanguageMap) -> Value {
  Value::Object(
    map
      .iter()
      .map(|(lang, text)| (lang.clone(), Value::String(text.clone())))
      .collect(),
  )
}

fn extensions_value(extensions: &Extensions) -> Value {
  Value::Object(
    extensions
      .iter()
      .map(|(iri, v)| (iri.clone(), v.clone()))
      .collect(),
  )
}

// ─── Actors ──────────────────────────────────────────────────────────────────

impl ToJson for AgentAccount {
  fn to_json(&self, _version: Version) -> Value {
    let mut obj = Object::new();
    set_opt_str(&mut obj, "homePage", &self.home_page);
    set_opt_str(&mut obj, "name", &self.name);
    Value::Object(obj)
  }
}

impl ToJson for Agent {
  fn to_json(&self, version: Version) -> Value {
    let mut obj = Object::new();
    set_str(&mut obj, "objectType", "Agent");
    set_opt_str(&mut obj, "name", &self.name);
    set_opt_str(&mut obj, "mbox", &self.mbox);
    set_opt_str(&mut obj, "mbox_sha1sum", &self.mbox_sha1sum);
    set_opt_str(&mut obj, "openid", &self.openid);
    if let Some(account) = &self.account {
      set(&mut obj, "account", account.to_json(version));
    }
    Value::Object(obj)
  }
}

impl ToJson for Group {
  fn to_json(&self, version: Version) -> Value {
    let mut obj = Object::new();
    set_str(&mut obj, "objectType", "Group");
    set_opt_str(&mut obj, "name", &self.name);
    set_opt_str(&mut obj, "mbox", &self.mbox);
    set_opt_str(&mut obj, "mbox_sha1sum", &self.mbox_sha1sum);
    set_opt_str(&mut obj, "openid", &self.openid);
    if let Some(account) = &self.account {
      set(&mut obj, "account", account.to_json(version));
    }
    if let Some(member) = &self.member {
      set(
        &mut obj,
        "member",
        Value::Array(member.iter().map(|a| a.to_json(version)).collect()),
      );
    }
    Value::Object(obj)
  }
}

impl ToJson for Actor {
  fn to_json(&self, version: Version) -> Value {
    match self {
      Self::Agent(agent) => agent.to_json(version),
      Self::Group(group) => group.to_json(version),
    }
  }
}

// ─── Verbs and activities ────────────────────────────────────────────────────

impl ToJson for Verb {
  fn to_json(&self, _version: Version) -> Value {
    let mut obj = Object::new();
    set_opt_str(&mut obj, "id", &self.id);
    if let Some(display) = &self.display {
      set(&mut obj, "display", language_map_value(display));
    }
    Value::Object(obj)
  }
}

impl ToJson for ActivityDefinition {
  fn to_json(&self, _version: Version) -> Value {
    let mut obj = Object::new();
    if let Some(name) = &self.name {
      set(&mut obj, "name", language_map_value(name));
    }
    if let Some(description) = &self.description {
      set(&mut obj, "description", language_map_value(description));
    }
    set_opt_str(&mut obj, "type", &self.activity_type);
    set_opt_str(&mut obj, "moreInfo", &self.more_info);
    if let Some(extensions) = &self.extensions {
      set(&mut obj, "extensions", extensions_value(extensions));
    }
    Value::Object(obj)
  }
}

impl ToJson for Activity {
  fn to_json(&self, version: Version) -> Value {
    let mut obj = Object::new();
    set_str(&mut obj, "objectType", "Activity");
    set_str(&mut obj, "id", &self.id);
    if let Some(definition) = &self.definition {
      set(&mut obj, "definition", definition.to_json(version));
    }
    Value::Object(obj)
  }
}

impl ToJson for StatementRef {
  fn to_json(&self, _version: Version) -> Value {
    let mut obj = Object::new();
    set_str(&mut obj, "objectType", "StatementRef");
    set_str(&mut obj, "id", &self.id.to_string());
    Value::Object(obj)
  }
}

// ─── Outcome and context ─────────────────────────────────────────────────────

impl ToJson for Score {
  fn to_json(&self, _version: Version) -> Value {
    let mut obj = Object::new();
    set_opt_f64(&mut obj, "scaled", self.scaled);
    set_opt_f64(&mut obj, "raw", self.raw);
    set_opt_f64(&mut obj, "min", self.min);
    set_opt_f64(&mut obj, "max", self.max);
    Value::Object(obj)
  }
}

impl ToJson for Outcome {
  fn to_json(&self, version: Version) -> Value {
    let mut obj = Object::new();
    if let Some(score) = &self.score {
      set(&mut obj, "score", score.to_json(version));
    }
    set_opt_bool(&mut obj, "success", self.success);
    set_opt_bool(&mut obj, "completion", self.completion);
    set_opt_str(&mut obj, "response", &self.response);
    set_opt_str(&mut obj, "duration", &self.duration);
    if let Some(extensions) = &self.extensions {
      set(&mut obj, "extensions", extensions_value(extensions));
    }
    Value::Object(obj)
  }
}

impl ToJson for ContextActivities {
  fn to_json(&self, version: Version) -> Value {
    let mut obj = Object::new();
    for (key, list) in [
      ("parent", &self.parent),
      ("grouping", &self.grouping),
      ("category", &self.category),
      ("other", &self.other),
    ] {
      if let Some(activities) = list {
        set(
          &mut obj,
          key,
          Value::Array(activities.iter().map(|a| a.to_json(version)).collect()),
        );
      }
    }
    Value::Object(obj)
  }
}

impl ToJson for Context {
  fn to_json(&self, version: Version) -> Value {
    let mut obj = Object::new();
    if let Some(registration) = &self.registration {
      set_str(&mut obj, "registration", &registration.to_string());
    }
    if let Some(instructor) = &self.instructor {
      set(&mut obj, "instructor", instructor.to_json(version));
    }
    if let Some(team) = &self.team {
      set(&mut obj, "team", team.to_json(version));
    }
    if let Some(context_activities) = &self.context_activities {
      set(
        &mut obj,
        "contextActivities",
        context_activities.to_json(version),
      );
    }
    set_opt_str(&mut obj, "revision", &self.revision);
    set_opt_str(&mut obj, "platform", &self.platform);
    set_opt_str(&mut obj, "language", &self.language);
    if let Some(statement) = &self.statement {
      set(&mut obj, "statement", statement.to_json(version));
    }
    if let Some(extensions) = &self.extensions {
      set(&mut obj, "extensions", extensions_value(extensions));
    }
    Value::Object(obj)
  }
}

// ─── Statements ──────────────────────────────────────────────────────────────

impl ToJson for StatementTarget {
  fn to_json(&self, version: Version) -> Value {
    match self {
      Self::Agent(agent) => agent.to_json(version),
      Self::Group(group) => group.to_json(version),
      Self::Activity(activity) => activity.to_json(version),
      Self::StatementRef(r) => r.to_json(version),
      Self::SubStatement(sub) => sub.to_json(version),
    }
  }
}

#[allow(clippy::too_many_arguments)]
fn render_statement_common(
  obj: &mut Object,
  actor: &Option<Actor>,
  verb: &Option<Verb>,
  target: &Option<StatementTarget>,
  result: &Option<Outcome>,
  context: &Option<Context>,
  timestamp: &Option<chrono::DateTime<chrono::Utc>>,
  version: Version,
) {
  if let Some(actor) = actor {
    set(obj, "actor", actor.to_json(version));
  }
  if let Some(verb) = verb {
    set(obj, "verb", verb.to_json(version));
  }
  if let Some(target) = target {
    set(obj, "object", target.to_json(version));
  }
  if let Some(result) = result {
    set(obj, "result", result.to_json(version));
  }
  if let Some(context) = context {
    set(obj, "context", context.to_json(version));
  }
  if let Some(timestamp) = timestamp {
    set_str(obj, "timestamp", &timestamp.to_rfc3339());
  }
}

impl ToJson for SubStatement {
  fn to_json(&self, version: Version) -> Value {
    let mut obj = Object::new();
    set_str(&mut obj, "objectType", "SubStatement");
    render_statement_common(
      &mut obj,
      &self.actor,
      &self.verb,
      &self.target,
      &self.result,
      &self.context,
      &self.timestamp,
      version,
    );
    Value::Object(obj)
  }
}

impl ToJson for Statement {
  fn to_json(&self, version: Version) -> Value {
    let mut obj = Object::new();
    if let Some(id) = &self.id {
      set_str(&mut obj, "id", &id.to_string());
    }
    render_statement_common(
      &mut obj,
      &self.actor,
      &self.verb,
      &self.target,
      &self.result,
      &self.context,
      &self.timestamp,
      version,
    );
    if let Some(stored) = &self.stored {
      set_str(&mut obj, "stored", &stored.to_rfc3339());
    }
    if let Some(authority) = &self.authority {
      set(&mut obj, "authority", authority.to_json(version));
    }
    if let Some(v) = &self.version {
      set_str(&mut obj, "version", v.as_str());
    }
    Value::Object(obj)
  }
}

impl ToJson for StatementsResult {
  fn to_json(&self, version: Version) -> Value {
    let mut obj = Object::new();
    set(
      &mut obj,
      "statements",
      Value::Array(self.statements.iter().map(|s| s.to_json(version)).collect()),
    );
    set_opt_str(&mut obj, "more", &self.more);
    Value::Object(obj)
  }
}

// ─── About ───────────────────────────────────────────────────────────────────

impl ToJson for About {
  fn to_json(&self, _version: Version) -> Value {
    let mut obj = Object::new();
    set(
      &mut obj,
      "version",
      Value::Array(
        self
          .version
          .iter()
          .map(|v| Value::String(v.clone()))
          .collect(),
      ),
    );
    if let Some(extensions) = &self.extensions {
      set(&mut obj, "extensions", extensions_value(extensions));
    }
    Value::Object(obj)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  #[test]
  fn unset_fields_are_omitted_not_null() {
    let rendered = Agent::default().to_json(Version::latest());
    let obj = rendered.as_object().unwrap();
    // Only the discriminator is written.
    assert_eq!(obj.len(), 1);
    assert_eq!(obj["objectType"], "Agent");
  }

  #[test]
  fn each_target_variant_writes_its_discriminator() {
    let cases: Vec<(StatementTarget, &str)> = vec![
      (StatementTarget::Agent(Agent::default()), "Agent"),
      (StatementTarget::Group(Group::default()), "Group"),
      (
        StatementTarget::Activity(Activity::new("http://example.org/a")),
        "Activity",
      ),
      (
        StatementTarget::StatementRef(StatementRef::new(Uuid::new_v4())),
        "StatementRef",
      ),
      (
        StatementTarget::SubStatement(Box::new(SubStatement::default())),
        "SubStatement",
      ),
    ];
    for (target, expected) in cases {
      let rendered = target.to_json(Version::latest());
      assert_eq!(rendered["objectType"], expected);
    }
  }

  #[test]
  fn statement_version_tag_is_the_version_string() {
    let statement = Statement {
      version: Some(Version::V102),
      ..Statement::default()
    };
    let rendered = statement.to_json(Version::latest());
    assert_eq!(rendered["version"], "1.0.2");
  }

  #[test]
  fn statements_result_renders_statements_and_more() {
    let result = StatementsResult {
      statements: vec![Statement::default()],
      more:       None,
    };
    let rendered = result.to_json(Version::latest());
    assert!(rendered["statements"].is_array());
    assert!(rendered.get("more").is_none());
  }
}
