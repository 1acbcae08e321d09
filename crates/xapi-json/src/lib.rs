//! JSON codec for the xAPI entity model.
//!
//! Converts between [`serde_json::Value`] objects and [`xapi_core`] domain
//! types. Parsing is field-presence-driven: every absent wire key leaves
//! the corresponding entity field unset, so `parse(render(e)) == e` holds
//! for any combination of present fields. Rendering is parameterized by
//! protocol [`Version`].
//!
//! # Quick start
//!
//! ```no_run
//! use xapi_core::{Version, statement::Statement};
//! use xapi_json::{FromJson, ToJson};
//!
//! let statement = Statement::from_json_str(r#"{"actor":{"mbox":"mailto:a@example.com"}}"#).unwrap();
//! let text = statement.to_json_string(Version::latest());
//! ```

pub mod error;
mod parse;
mod render;

pub use error::{Error, Result};
pub use parse::{parse_string_array, parse_uuid_array};

use serde_json::Value;
use xapi_core::Version;

// ─── Codec traits ────────────────────────────────────────────────────────────

/// Build an entity from a parsed JSON value.
///
/// Fails with [`Error::Malformed`] when required structure is absent or a
/// present field cannot be coerced to its expected type.
pub trait FromJson: Sized {
  fn from_json(value: &Value) -> Result<Self>;

  fn from_json_str(text: &str) -> Result<Self> {
    let value: Value = serde_json::from_str(text)?;
    Self::from_json(&value)
  }
}

/// Render an entity as a JSON value for the given protocol version,
/// omitting unset fields.
pub trait ToJson {
  fn to_json(&self, version: Version) -> Value;

  fn to_json_string(&self, version: Version) -> String {
    self.to_json(version).to_string()
  }
}

// ─── Round-trip tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod roundtrip_tests {
  use chrono::{TimeZone, Utc};
  use serde_json::json;
  use uuid::Uuid;
  use xapi_core::{
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

  use super::*;

  fn versions() -> [Version; 4] {
    [Version::V100, Version::V101, Version::V102, Version::V103]
  }

  fn full_agent() -> Agent {
    Agent {
      name: Some("Alice".to_string()),
      mbox: Some("mailto:alice@example.com".to_string()),
      mbox_sha1sum: None,
      openid: None,
      account: None,
    }
  }

  fn full_statement() -> Statement {
    let mut extensions = Extensions::new();
    extensions.insert("http://example.org/ext", json!({"k": [1, 2]}));

    Statement {
      id: Some(Uuid::new_v4()),
      actor: Some(Actor::Agent(full_agent())),
      verb: Some(Verb::completed()),
      target: Some(StatementTarget::Activity(Activity {
        id:         "http://example.org/course/1".to_string(),
        definition: Some(ActivityDefinition {
          name:          Some(LanguageMap::of("en-US", "Course One")),
          description:   Some(LanguageMap::of("en-US", "The first course")),
          activity_type: Some("http://adlnet.gov/expapi/activities/course".to_string()),
          more_info:     Some("http://example.org/course/1/info".to_string()),
          extensions:    Some(extensions.clone()),
        }),
      })),
      result: Some(Outcome {
        score:      Some(Score {
          scaled: Some(0.75),
          raw:    Some(75.0),
          min:    Some(0.0),
          max:    Some(100.0),
        }),
        success:    Some(true),
        completion: Some(true),
        response:   Some("free text".to_string()),
        duration:   Some("PT4M30S".to_string()),
        extensions: Some(extensions.clone()),
      }),
      context: Some(Context {
        registration:       Some(Uuid::new_v4()),
        instructor:         Some(Actor::Agent(full_agent())),
        team:               Some(Group {
          name:   Some("Team A".to_string()),
          member: Some(vec![full_agent()]),
          ..Group::default()
        }),
        context_activities: Some(ContextActivities {
          parent:   Some(vec![Activity::new("http://example.org/parent")]),
          grouping: None,
          category: Some(vec![Activity::new("http://example.org/category")]),
          other:    None,
        }),
        revision:           Some("r1".to_string()),
        platform:           Some("test-suite".to_string()),
        language:           Some("en-US".to_string()),
        statement:          Some(StatementRef::new(Uuid::new_v4())),
        extensions:         Some(extensions),
      }),
      timestamp: Some(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()),
      stored: Some(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 1).unwrap()),
      authority: Some(Actor::Agent(full_agent())),
      version: Some(Version::V103),
    }
  }

  #[test]
  fn full_statement_round_trips_under_every_version() {
    let statement = full_statement();
    for v in versions() {
      let rendered = statement.to_json(v);
      let reparsed = Statement::from_json(&rendered).unwrap();
      assert_eq!(reparsed, statement, "version {v}");
    }
  }

  #[test]
  fn empty_statement_round_trips() {
    let statement = Statement::default();
    let rendered = statement.to_json(Version::latest());
    let reparsed = Statement::from_json(&rendered).unwrap();
    assert_eq!(reparsed, statement);
  }

  #[test]
  fn absent_fields_stay_absent() {
    // A statement with only an actor must not grow a timestamp, result or
    // context through a render/parse cycle.
    let statement = Statement {
      actor: Some(Actor::Agent(full_agent())),
      ..Statement::default()
    };
    let rendered = statement.to_json(Version::latest());
    let obj = rendered.as_object().unwrap();
    assert!(obj.contains_key("actor"));
    assert!(!obj.contains_key("timestamp"));
    assert!(!obj.contains_key("result"));
    assert!(!obj.contains_key("context"));
    assert!(!obj.contains_key("id"));

    let reparsed = Statement::from_json(&rendered).unwrap();
    assert_eq!(reparsed, statement);
  }

  #[test]
  fn group_actor_round_trips() {
    let statement = Statement {
      actor: Some(Actor::Group(Group {
        name:   Some("Team A".to_string()),
        mbox:   Some("mailto:team@example.com".to_string()),
        member: Some(vec![full_agent()]),
        ..Group::default()
      })),
      ..Statement::default()
    };
    for v in versions() {
      let reparsed =
        Statement::from_json(&statement.to_json(v)).unwrap();
      assert_eq!(reparsed, statement);
    }
  }

  #[test]
  fn agent_account_round_trips() {
    let agent = Agent {
      account: Some(AgentAccount {
        home_page: Some("http://example.org".to_string()),
        name:      Some("alice".to_string()),
      }),
      ..Agent::default()
    };
    let reparsed = Agent::from_json(&agent.to_json(Version::latest())).unwrap();
    assert_eq!(reparsed, agent);
  }

  #[test]
  fn sub_statement_target_round_trips() {
    let sub = SubStatement {
      actor:  Some(Actor::Agent(full_agent())),
      verb:   Some(Verb::launched()),
      target: Some(StatementTarget::Activity(Activity::new(
        "http://example.org/inner",
      ))),
      ..SubStatement::default()
    };
    let statement = Statement {
      actor: Some(Actor::Agent(full_agent())),
      verb: Some(Verb::completed()),
      target: Some(StatementTarget::from(sub)),
      ..Statement::default()
    };
    let reparsed =
      Statement::from_json(&statement.to_json(Version::latest())).unwrap();
    assert_eq!(reparsed, statement);
  }

  #[test]
  fn statements_result_round_trips() {
    let result = StatementsResult {
      statements: vec![full_statement(), Statement::default()],
      more:       Some("/xapi/statements/more/abc".to_string()),
    };
    let rendered = result.to_json(Version::latest());
    let reparsed = StatementsResult::from_json(&rendered).unwrap();
    assert_eq!(reparsed, result);
  }
}
