//! Query-parameter serialization for the statements resource.

use xapi_core::{Version, query::StatementsQuery};
use xapi_json::ToJson;

/// Serialize a [`StatementsQuery`] to wire query-parameter pairs.
///
/// Agents are embedded as JSON rendered for `version`; timestamps are
/// RFC 3339; booleans are `true`/`false`.
pub(crate) fn statements_query_params(
  query: &StatementsQuery,
  version: Version,
) -> Vec<(String, String)> {
  let mut params: Vec<(String, String)> = Vec::new();
  let mut push = |key: &str, value: String| {
    params.push((key.to_string(), value));
  };

  if let Some(agent) = &query.agent {
    push("agent", agent.to_json_string(version));
  }
  if let Some(verb_id) = &query.verb_id {
    push("verb", verb_id.clone());
  }
  if let Some(activity_id) = &query.activity_id {
    push("activity", activity_id.clone());
  }
  if let Some(registration) = &query.registration {
    push("registration", registration.to_string());
  }
  if let Some(related_activities) = query.related_activities {
    push("related_activities", related_activities.to_string());
  }
  if let Some(related_agents) = query.related_agents {
    push("related_agents", related_agents.to_string());
  }
  if let Some(since) = &query.since {
    push("since", since.to_rfc3339());
  }
  if let Some(until) = &query.until {
    push("until", until.to_rfc3339());
  }
  if let Some(limit) = query.limit {
    push("limit", limit.to_string());
  }
  if let Some(format) = query.format {
    push("format", format.as_str().to_string());
  }
  if let Some(ascending) = query.ascending {
    push("ascending", ascending.to_string());
  }

  params
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use uuid::Uuid;
  use xapi_core::{
    actor::Agent,
    query::{QueryResultFormat, StatementsQuery},
  };

  use super::*;

  fn value_of<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }

  #[test]
  fn empty_query_yields_no_params() {
    let params =
      statements_query_params(&StatementsQuery::default(), Version::latest());
    assert!(params.is_empty());
  }

  #[test]
  fn full_query_serializes_every_filter() {
    let registration = Uuid::new_v4();
    let query = StatementsQuery {
      agent:              Some(Agent {
        mbox: Some("mailto:a@example.com".to_string()),
        ..Agent::default()
      }),
      verb_id:            Some("http://adlnet.gov/expapi/verbs/completed".to_string()),
      activity_id:        Some("http://example.org/course/1".to_string()),
      registration:       Some(registration),
      related_activities: Some(true),
      related_agents:     Some(false),
      since:              Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
      until:              Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
      limit:              Some(25),
      format:             Some(QueryResultFormat::Exact),
      ascending:          Some(true),
    };

    let params = statements_query_params(&query, Version::latest());

    assert_eq!(
      value_of(&params, "verb"),
      Some("http://adlnet.gov/expapi/verbs/completed")
    );
    assert_eq!(value_of(&params, "activity"), Some("http://example.org/course/1"));
    assert_eq!(
      value_of(&params, "registration"),
      Some(registration.to_string().as_str())
    );
    assert_eq!(value_of(&params, "related_activities"), Some("true"));
    assert_eq!(value_of(&params, "related_agents"), Some("false"));
    assert_eq!(value_of(&params, "limit"), Some("25"));
    assert_eq!(value_of(&params, "format"), Some("exact"));
    assert_eq!(value_of(&params, "ascending"), Some("true"));
    assert!(value_of(&params, "since").unwrap().starts_with("2024-01-01T"));
    assert!(value_of(&params, "until").unwrap().starts_with("2024-06-01T"));

    // the agent filter is embedded JSON
    let agent_json: serde_json::Value =
      serde_json::from_str(value_of(&params, "agent").unwrap()).unwrap();
    assert_eq!(agent_json["mbox"], "mailto:a@example.com");
  }
}
