//! JSON → entity parsing.
//!
//! Presence-driven: an absent key leaves the entity field unset; a present
//! key that cannot be coerced to its expected type is a hard
//! [`Error::Malformed`]. The statement-target union is resolved by the
//! `objectType` discriminator in [`target_from_json`], which is also where
//! the one-level sub-statement nesting cap lives.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;
use xapi_core::{
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

use crate::{
  FromJson,
  error::{Error, Result},
};

type Object = Map<String, Value>;

// ─── Field helpers ───────────────────────────────────────────────────────────

fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

fn malformed(entity: &'static str, detail: impl Into<String>) -> Error {
  Error::Malformed {
    entity,
    detail: detail.into(),
  }
}

fn as_object<'a>(value: &'a Value, entity: &'static str) -> Result<&'a Object> {
  value
    .as_object()
    .ok_or_else(|| malformed(entity, format!("expected an object, got {}", kind(value))))
}

fn opt_str(obj: &Object, key: &str, entity: &'static str) -> Result<Option<String>> {
  match obj.get(key) {
    None => Ok(None),
    Some(Value::String(s)) => Ok(Some(s.clone())),
    Some(other) => Err(malformed(
      entity,
      format!("{key:?} must be a string, got {}", kind(other)),
    )),
  }
}

fn req_str(obj: &Object, key: &str, entity: &'static str) -> Result<String> {
  opt_str(obj, key, entity)?
    .ok_or_else(|| malformed(entity, format!("missing required field {key:?}")))
}

fn opt_bool(obj: &Object, key: &str, entity: &'static str) -> Result<Option<bool>> {
  match obj.get(key) {
    None => Ok(None),
    Some(Value::Bool(b)) => Ok(Some(*b)),
    Some(other) => Err(malformed(
      entity,
      format!("{key:?} must be a boolean, got {}", kind(other)),
    )),
  }
}

fn opt_f64(obj: &Object, key: &str, entity: &'static str) -> Result<Option<f64>> {
  match obj.get(key) {
    None => Ok(None),
    Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| {
      malformed(entity, format!("{key:?} is not representable as f64"))
    }),
    Some(other) => Err(malformed(
      entity,
      format!("{key:?} must be a number, got {}", kind(other)),
    )),
  }
}

fn opt_uuid(obj: &Object, key: &str, entity: &'static str) -> Result<Option<Uuid>> {
  match opt_str(obj, key, entity)? {
    None => Ok(None),
    Some(s) => Uuid::parse_str(&s)
      .map(Some)
      .map_err(|e| malformed(entity, format!("{key:?} is not a UUID: {e}"))),
  }
}

fn opt_datetime(
  obj: &Object,
  key: &str,
  entity: &'static str,
) -> Result<Option<DateTime<Utc>>> {
  match opt_str(obj, key, entity)? {
    None => Ok(None),
    Some(s) => DateTime::parse_from_rfc3339(&s)
      .map(|dt| Some(dt.with_timezone(&Utc)))
      .map_err(|e| malformed(entity, format!("{key:?} is not RFC 3339: {e}"))),
  }
}

fn opt_language_map(
  obj: &Object,
  key: &str,
  entity: &'static str,
) -> Result<Option<LanguageMap>> {
  let Some(value) = obj.get(key) else {
    return Ok(None);
  };
  let map = as_object(value, entity)?;
  let mut out = LanguageMap::new();
  for (lang, text) in map {
    match text {
      Value::String(s) => out.insert(lang.clone(), s.clone()),
      other => {
        return Err(malformed(
          entity,
          format!("{key:?}[{lang:?}] must be a string, got {}", kind(other)),
        ));
      }
    }
  }
  Ok(Some(out))
}

fn opt_extensions(
  obj: &Object,
  key: &str,
  entity: &'static str,
) -> Result<Option<Extensions>> {
  let Some(value) = obj.get(key) else {
    return Ok(None);
  };
  let map = as_object(value, entity)?;
  Ok(Some(
    map
      .iter()
      .map(|(iri, v)| (iri.clone(), v.clone()))
      .collect(),
  ))
}

// ─── Actors ──────────────────────────────────────────────────────────────────

impl FromJson for AgentAccount {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "AgentAccount")?;
    Ok(Self {
      home_page: opt_str(obj, "homePage", "AgentAccount")?,
      name:      opt_str(obj, "name", "AgentAccount")?,
    })
  }
}

impl FromJson for Agent {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "Agent")?;
    Ok(Self {
      name:         opt_str(obj, "name", "Agent")?,
      mbox:         opt_str(obj, "mbox", "Agent")?,
      mbox_sha1sum: opt_str(obj, "mbox_sha1sum", "Agent")?,
      openid:       opt_str(obj, "openid", "Agent")?,
      account:      obj
        .get("account")
        .map(AgentAccount::from_json)
        .transpose()?,
    })
  }
}

impl FromJson for Group {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "Group")?;
    let member = match obj.get("member") {
      None => None,
      Some(Value::Array(items)) => {
        Some(items.iter().map(Agent::from_json).collect::<Result<_>>()?)
      }
      Some(other) => {
        return Err(malformed(
          "Group",
          format!("\"member\" must be an array, got {}", kind(other)),
        ));
      }
    };
    Ok(Self {
      name: opt_str(obj, "name", "Group")?,
      mbox: opt_str(obj, "mbox", "Group")?,
      mbox_sha1sum: opt_str(obj, "mbox_sha1sum", "Group")?,
      openid: opt_str(obj, "openid", "Group")?,
      account: obj
        .get("account")
        .map(AgentAccount::from_json)
        .transpose()?,
      member,
    })
  }
}

impl FromJson for Actor {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "Actor")?;
    match opt_str(obj, "objectType", "Actor")?.as_deref() {
      None | Some("Agent") => Ok(Self::Agent(Agent::from_json(value)?)),
      Some("Group") => Ok(Self::Group(Group::from_json(value)?)),
      Some(other) => Err(Error::UnknownObjectType(other.to_string())),
    }
  }
}

// ─── Verbs and activities ────────────────────────────────────────────────────

impl FromJson for Verb {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "Verb")?;
    Ok(Self {
      id:      opt_str(obj, "id", "Verb")?,
      display: opt_language_map(obj, "display", "Verb")?,
    })
  }
}

impl FromJson for ActivityDefinition {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "ActivityDefinition")?;
    Ok(Self {
      name:          opt_language_map(obj, "name", "ActivityDefinition")?,
      description:   opt_language_map(obj, "description", "ActivityDefinition")?,
      activity_type: opt_str(obj, "type", "ActivityDefinition")?,
      more_info:     opt_str(obj, "moreInfo", "ActivityDefinition")?,
      extensions:    opt_extensions(obj, "extensions", "ActivityDefinition")?,
    })
  }
}

impl FromJson for Activity {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "Activity")?;
    Ok(Self {
      id:         req_str(obj, "id", "Activity")?,
      definition: obj
        .get("definition")
        .map(ActivityDefinition::from_json)
        .transpose()?,
    })
  }
}

impl FromJson for StatementRef {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "StatementRef")?;
    let id = opt_uuid(obj, "id", "StatementRef")?
      .ok_or_else(|| malformed("StatementRef", "missing required field \"id\""))?;
    Ok(Self { id })
  }
}

// ─── Outcome and context ─────────────────────────────────────────────────────

impl FromJson for Score {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "Score")?;
    Ok(Self {
      scaled: opt_f64(obj, "scaled", "Score")?,
      raw:    opt_f64(obj, "raw", "Score")?,
      min:    opt_f64(obj, "min", "Score")?,
      max:    opt_f64(obj, "max", "Score")?,
    })
  }
}

impl FromJson for Outcome {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "Result")?;
    Ok(Self {
      score:      obj.get("score").map(Score::from_json).transpose()?,
      success:    opt_bool(obj, "success", "Result")?,
      completion: opt_bool(obj, "completion", "Result")?,
      response:   opt_str(obj, "response", "Result")?,
      duration:   opt_str(obj, "duration", "Result")?,
      extensions: opt_extensions(obj, "extensions", "Result")?,
    })
  }
}

/// A context-activities slot may be a single activity object or an array
/// of them; both normalise to a list.
fn activity_list(
  obj: &Object,
  key: &str,
  entity: &'static str,
) -> Result<Option<Vec<Activity>>> {
  match obj.get(key) {
    None => Ok(None),
    Some(Value::Array(items)) => Ok(Some(
      items.iter().map(Activity::from_json).collect::<Result<_>>()?,
    )),
    Some(single @ Value::Object(_)) => Ok(Some(vec![Activity::from_json(single)?])),
    Some(other) => Err(malformed(
      entity,
      format!("{key:?} must be an object or array, got {}", kind(other)),
    )),
  }
}

impl FromJson for ContextActivities {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "ContextActivities")?;
    Ok(Self {
      parent:   activity_list(obj, "parent", "ContextActivities")?,
      grouping: activity_list(obj, "grouping", "ContextActivities")?,
      category: activity_list(obj, "category", "ContextActivities")?,
      other:    activity_list(obj, "other", "ContextActivities")?,
    })
  }
}

impl FromJson for Context {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "Context")?;
    Ok(Self {
      registration: opt_uuid(obj, "registration", "Context")?,
      instructor: obj.get("instructor").map(Actor::from_json).transpose()?,
      team: obj.get("team").map(Group::from_json).transpose()?,
      context_activities: obj
        .get("contextActivities")
        .map(ContextActivities::from_json)
        .transpose()?,
      revision: opt_str(obj, "revision", "Context")?,
      platform: opt_str(obj, "platform", "Context")?,
      language: opt_str(obj, "language", "Context")?,
      statement: obj
        .get("statement")
        .map(StatementRef::from_json)
        .transpose()?,
      extensions: opt_extensions(obj, "extensions", "Context")?,
    })
  }
}

// ─── Target resolution ───────────────────────────────────────────────────────

/// Resolve a statement's `object` field to a [`StatementTarget`].
///
/// `allow_sub_statement` is false when the containing entity is itself a
/// sub-statement: the `"SubStatement"` branch then degenerates to `None`
/// (target unset) rather than recursing. This one-level cap is the
/// protocol's rule, not a convenience.
pub(crate) fn target_from_json(
  value: &Value,
  allow_sub_statement: bool,
) -> Result<Option<StatementTarget>> {
  let obj = as_object(value, "StatementTarget")?;
  match opt_str(obj, "objectType", "StatementTarget")?.as_deref() {
    None | Some("Activity") => {
      Ok(Some(StatementTarget::Activity(Activity::from_json(value)?)))
    }
    Some("Agent") => Ok(Some(StatementTarget::Agent(Agent::from_json(value)?))),
    Some("Group") => Ok(Some(StatementTarget::Group(Group::from_json(value)?))),
    Some("StatementRef") => Ok(Some(StatementTarget::StatementRef(
      StatementRef::from_json(value)?,
    ))),
    Some("SubStatement") if allow_sub_statement => Ok(Some(
      StatementTarget::SubStatement(Box::new(SubStatement::from_json(value)?)),
    )),
    Some("SubStatement") => Ok(None),
    Some(other) => Err(Error::UnknownObjectType(other.to_string())),
  }
}

// ─── Statements ──────────────────────────────────────────────────────────────

struct StatementCommon {
  actor:     Option<Actor>,
  verb:      Option<Verb>,
  result:    Option<Outcome>,
  context:   Option<Context>,
  timestamp: Option<DateTime<Utc>>,
}

/// The fields shared by statements and sub-statements, minus the target
/// (which differs in how the discriminator is applied).
fn statement_common(obj: &Object, entity: &'static str) -> Result<StatementCommon> {
  Ok(StatementCommon {
    actor:     obj.get("actor").map(Actor::from_json).transpose()?,
    verb:      obj.get("verb").map(Verb::from_json).transpose()?,
    result:    obj.get("result").map(Outcome::from_json).transpose()?,
    context:   obj.get("context").map(Context::from_json).transpose()?,
    timestamp: opt_datetime(obj, "timestamp", entity)?,
  })
}

impl FromJson for SubStatement {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "SubStatement")?;
    let common = statement_common(obj, "SubStatement")?;
    let target = match obj.get("object") {
      None => None,
      Some(v) => target_from_json(v, false)?,
    };
    Ok(Self {
      actor: common.actor,
      verb: common.verb,
      target,
      result: common.result,
      context: common.context,
      timestamp: common.timestamp,
    })
  }
}

impl FromJson for Statement {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "Statement")?;
    let common = statement_common(obj, "Statement")?;
    let target = match obj.get("object") {
      None => None,
      Some(v) => target_from_json(v, true)?,
    };
    let version = match opt_str(obj, "version", "Statement")? {
      None => None,
      Some(s) => Some(s.parse()?),
    };
    Ok(Self {
      id: opt_uuid(obj, "id", "Statement")?,
      actor: common.actor,
      verb: common.verb,
      target,
      result: common.result,
      context: common.context,
      timestamp: common.timestamp,
      stored: opt_datetime(obj, "stored", "Statement")?,
      authority: obj.get("authority").map(Actor::from_json).transpose()?,
      version,
    })
  }
}

impl FromJson for StatementsResult {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "StatementsResult")?;
    let statements = match obj.get("statements") {
      Some(Value::Array(items)) => {
        items.iter().map(Statement::from_json).collect::<Result<_>>()?
      }
      Some(other) => {
        return Err(malformed(
          "StatementsResult",
          format!("\"statements\" must be an array, got {}", kind(other)),
        ));
      }
      None => {
        return Err(malformed(
          "StatementsResult",
          "missing required field \"statements\"",
        ));
      }
    };
    Ok(Self {
      statements,
      more: opt_str(obj, "more", "StatementsResult")?,
    })
  }
}

// ─── About ───────────────────────────────────────────────────────────────────

impl FromJson for About {
  fn from_json(value: &Value) -> Result<Self> {
    let obj = as_object(value, "About")?;
    let version = match obj.get("version") {
      Some(Value::Array(items)) => items
        .iter()
        .map(|v| match v {
          Value::String(s) => Ok(s.clone()),
          other => Err(malformed(
            "About",
            format!("\"version\" entries must be strings, got {}", kind(other)),
          )),
        })
        .collect::<Result<_>>()?,
      Some(other) => {
        return Err(malformed(
          "About",
          format!("\"version\" must be an array, got {}", kind(other)),
        ));
      }
      None => {
        return Err(malformed("About", "missing required field \"version\""));
      }
    };
    Ok(Self {
      version,
      extensions: opt_extensions(obj, "extensions", "About")?,
    })
  }
}

// ─── Wire arrays ─────────────────────────────────────────────────────────────

/// Parse a bare JSON array of UUID strings — the body of a successful
/// statement POST.
pub fn parse_uuid_array(text: &str) -> Result<Vec<Uuid>> {
  parse_string_array(text)?
    .iter()
    .map(|s| {
      Uuid::parse_str(s)
        .map_err(|e| malformed("statement id array", format!("{s:?}: {e}")))
    })
    .collect()
}

/// Parse a bare JSON array of strings — the body of a profile/state id
/// listing. An empty array yields an empty (never null) list.
pub fn parse_string_array(text: &str) -> Result<Vec<String>> {
  let value: Value = serde_json::from_str(text)?;
  match value {
    Value::Array(items) => items
      .into_iter()
      .map(|v| match v {
        Value::String(s) => Ok(s),
        other => Err(malformed(
          "string array",
          format!("entries must be strings, got {}", kind(&other)),
        )),
      })
      .collect(),
    other => Err(malformed(
      "string array",
      format!("expected an array, got {}", kind(&other)),
    )),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  // ── Discriminator resolution ──────────────────────────────────────────

  #[test]
  fn object_without_object_type_resolves_to_activity() {
    let v = json!({"actor": {"mbox": "mailto:a@example.com"},
                   "object": {"id": "http://example.org/a"}});
    let s = Statement::from_json(&v).unwrap();
    assert!(matches!(s.target, Some(StatementTarget::Activity(_))));
  }

  #[test]
  fn object_type_activity_resolves_to_activity() {
    let v = json!({"object": {"objectType": "Activity", "id": "http://example.org/a"}});
    let s = Statement::from_json(&v).unwrap();
    assert!(matches!(s.target, Some(StatementTarget::Activity(_))));
  }

  #[test]
  fn object_type_agent_resolves_to_agent() {
    let v = json!({"object": {"objectType": "Agent", "mbox": "mailto:b@example.com"}});
    let s = Statement::from_json(&v).unwrap();
    assert!(matches!(s.target, Some(StatementTarget::Agent(_))));
  }

  #[test]
  fn object_type_group_resolves_to_group() {
    let v = json!({"object": {"objectType": "Group", "name": "Team"}});
    let s = Statement::from_json(&v).unwrap();
    assert!(matches!(s.target, Some(StatementTarget::Group(_))));
  }

  #[test]
  fn object_type_statement_ref_resolves_to_ref() {
    let id = Uuid::new_v4();
    let v = json!({"object": {"objectType": "StatementRef", "id": id.to_string()}});
    let s = Statement::from_json(&v).unwrap();
    let Some(StatementTarget::StatementRef(r)) = s.target else {
      panic!("expected StatementRef")
    };
    assert_eq!(r.id, id);
  }

  #[test]
  fn object_type_sub_statement_resolves_at_top_level() {
    let v = json!({"object": {
      "objectType": "SubStatement",
      "verb": {"id": "http://adlnet.gov/expapi/verbs/launched"},
    }});
    let s = Statement::from_json(&v).unwrap();
    assert!(matches!(s.target, Some(StatementTarget::SubStatement(_))));
  }

  #[test]
  fn unknown_object_type_is_an_error() {
    let v = json!({"object": {"objectType": "Widget"}});
    let r = Statement::from_json(&v);
    assert!(matches!(r, Err(Error::UnknownObjectType(t)) if t == "Widget"));
  }

  // ── Nesting cap ───────────────────────────────────────────────────────

  #[test]
  fn sub_statement_inside_sub_statement_degenerates_to_no_target() {
    let v = json!({
      "objectType": "SubStatement",
      "actor": {"mbox": "mailto:a@example.com"},
      "verb": {"id": "http://adlnet.gov/expapi/verbs/completed"},
      "object": {
        "objectType": "SubStatement",
        "verb": {"id": "http://adlnet.gov/expapi/verbs/launched"},
      },
    });
    let sub = SubStatement::from_json(&v).unwrap();
    assert!(sub.target.is_none());
    assert!(sub.verb.is_some());
  }

  #[test]
  fn statement_with_doubly_nested_sub_statement_caps_at_one_level() {
    let v = json!({"object": {
      "objectType": "SubStatement",
      "object": {
        "objectType": "SubStatement",
        "object": {"id": "http://example.org/deep"},
      },
    }});
    let s = Statement::from_json(&v).unwrap();
    let Some(StatementTarget::SubStatement(sub)) = s.target else {
      panic!("expected SubStatement at the top level")
    };
    assert!(sub.target.is_none());
  }

  // ── Malformed fields ──────────────────────────────────────────────────

  #[test]
  fn non_uuid_statement_id_is_malformed() {
    let v = json!({"id": "not-a-uuid"});
    assert!(matches!(
      Statement::from_json(&v),
      Err(Error::Malformed { entity: "Statement", .. })
    ));
  }

  #[test]
  fn non_string_mbox_is_malformed() {
    let v = json!({"mbox": 17});
    assert!(matches!(
      Agent::from_json(&v),
      Err(Error::Malformed { entity: "Agent", .. })
    ));
  }

  #[test]
  fn bad_timestamp_is_malformed() {
    let v = json!({"timestamp": "yesterday"});
    assert!(Statement::from_json(&v).is_err());
  }

  #[test]
  fn unknown_statement_version_is_an_error() {
    let v = json!({"version": "9.9.9"});
    assert!(matches!(
      Statement::from_json(&v),
      Err(Error::Core(xapi_core::Error::UnknownVersion(_)))
    ));
  }

  #[test]
  fn activity_without_id_is_malformed() {
    let v = json!({"objectType": "Activity"});
    assert!(matches!(
      Activity::from_json(&v),
      Err(Error::Malformed { entity: "Activity", .. })
    ));
  }

  #[test]
  fn statement_from_non_object_is_malformed() {
    assert!(Statement::from_json(&json!([])).is_err());
    assert!(Statement::from_json(&json!("x")).is_err());
  }

  // ── Actors ────────────────────────────────────────────────────────────

  #[test]
  fn actor_defaults_to_agent() {
    let v = json!({"mbox": "mailto:a@example.com"});
    assert!(matches!(Actor::from_json(&v).unwrap(), Actor::Agent(_)));
  }

  #[test]
  fn actor_group_with_members() {
    let v = json!({
      "objectType": "Group",
      "member": [{"mbox": "mailto:a@example.com"}, {"name": "B"}],
    });
    let Actor::Group(g) = Actor::from_json(&v).unwrap() else {
      panic!("expected Group")
    };
    assert_eq!(g.member.unwrap().len(), 2);
  }

  #[test]
  fn actor_unknown_object_type_is_an_error() {
    let v = json!({"objectType": "Robot"});
    assert!(matches!(Actor::from_json(&v), Err(Error::UnknownObjectType(_))));
  }

  // ── Context activities ────────────────────────────────────────────────

  #[test]
  fn context_activity_single_object_normalises_to_list() {
    let v = json!({"parent": {"id": "http://example.org/p"}});
    let ca = ContextActivities::from_json(&v).unwrap();
    assert_eq!(ca.parent.unwrap().len(), 1);
    assert!(ca.grouping.is_none());
  }

  // ── Wire arrays ───────────────────────────────────────────────────────

  #[test]
  fn uuid_array_parses() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let text = format!("[\"{a}\",\"{b}\"]");
    assert_eq!(parse_uuid_array(&text).unwrap(), vec![a, b]);
  }

  #[test]
  fn uuid_array_rejects_non_uuid_entries() {
    assert!(parse_uuid_array("[\"nope\"]").is_err());
  }

  #[test]
  fn empty_string_array_yields_empty_vec() {
    assert_eq!(parse_string_array("[]").unwrap(), Vec::<String>::new());
  }

  #[test]
  fn string_array_rejects_non_array() {
    assert!(parse_string_array("{}").is_err());
  }
}
