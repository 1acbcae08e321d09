//! The public operation set: `impl Lrs for RemoteLrs`.
//!
//! Status contract: 200 is success-with-body (GET/query), 204 is
//! success-no-body (writes/deletes), 404 is tolerated as an empty success
//! only for document retrieval. Anything else becomes a failed envelope
//! built from the response body and status code.

use reqwest::{Method, StatusCode};
use uuid::Uuid;
use xapi_core::{
  Lrs, LrsResponse,
  about::About,
  activity::Activity,
  actor::{Actor, Agent},
  document::{
    ActivityProfileDocument, AgentProfileDocument, Document, StateDocument,
  },
  query::{StatementsQuery, StatementsResult},
  statement::{Statement, StatementRef, StatementTarget},
  verb::Verb,
};
use xapi_json::{FromJson, ToJson};

use crate::{
  RemoteLrs,
  error::{Error, Result},
  http::HttpRequest,
  params::statements_query_params,
  statements::STATEMENTS_RESOURCE,
};

const STATE_RESOURCE: &str = "activities/state";
const ACTIVITY_PROFILE_RESOURCE: &str = "activities/profile";
const AGENT_PROFILE_RESOURCE: &str = "agents/profile";

impl Lrs for RemoteLrs {
  type Error = Error;

  async fn about(&self) -> Result<LrsResponse<About>> {
    let res = self.execute(HttpRequest::new(Method::GET, "about")).await?;
    if !res.is(StatusCode::OK) {
      return Ok(res.into_failure());
    }
    let about = About::from_json_str(&res.body_text())?;
    Ok(LrsResponse::ok(about))
  }

  // ── Statements ────────────────────────────────────────────────────────

  async fn save_statement(
    &self,
    statement: &mut Statement,
  ) -> Result<LrsResponse<Statement>> {
    let body = statement.to_json_string(self.version).into_bytes();
    let req = match statement.id {
      // No id yet: POST, and adopt the server-assigned id on success.
      None => HttpRequest::new(Method::POST, STATEMENTS_RESOURCE),
      // Id present: PUT under that id; the id is never rewritten.
      Some(id) => HttpRequest::new(Method::PUT, STATEMENTS_RESOURCE)
        .query(vec![("statementId".to_string(), id.to_string())]),
    }
    .content_type("application/json")
    .body(body);

    let res = self.execute(req).await?;
    match statement.id {
      None => {
        if !res.is(StatusCode::OK) {
          return Ok(res.into_failure());
        }
        let ids = xapi_json::parse_uuid_array(&res.body_text())?;
        let assigned = ids.first().copied().ok_or_else(|| {
          Error::Entity(xapi_json::Error::Malformed {
            entity: "statement id array",
            detail: "expected exactly one id, got none".to_string(),
          })
        })?;
        // The server's id is authoritative on this path.
        statement.id = Some(assigned);
      }
      Some(_) => {
        if !res.is(StatusCode::NO_CONTENT) {
          return Ok(res.into_failure());
        }
      }
    }

    Ok(LrsResponse::ok(statement.clone()))
  }

  async fn save_statements(
    &self,
    statements: &mut [Statement],
  ) -> Result<LrsResponse<StatementsResult>> {
    let array = serde_json::Value::Array(
      statements
        .iter()
        .map(|s| s.to_json(self.version))
        .collect(),
    );
    let req = HttpRequest::new(Method::POST, STATEMENTS_RESOURCE)
      .content_type("application/json")
      .body(array.to_string().into_bytes());

    let res = self.execute(req).await?;
    if !res.is(StatusCode::OK) {
      return Ok(res.into_failure());
    }

    // Positional correlation is the protocol's contract: the response
    // array is ordered like the submitted batch. A length mismatch fails
    // the whole batch with no ids assigned.
    let ids = xapi_json::parse_uuid_array(&res.body_text())?;
    if ids.len() != statements.len() {
      return Err(Error::BatchMismatch {
        sent:     statements.len(),
        received: ids.len(),
      });
    }
    for (statement, id) in statements.iter_mut().zip(ids) {
      statement.id = Some(id);
    }

    Ok(LrsResponse::ok(StatementsResult {
      statements: statements.to_vec(),
      more:       None,
    }))
  }

  async fn void_statement(
    &self,
    target_id: Uuid,
    agent: Agent,
  ) -> Result<LrsResponse<Statement>> {
    let mut statement = Statement {
      actor: Some(Actor::Agent(agent)),
      verb: Some(Verb::voided()),
      target: Some(StatementTarget::StatementRef(StatementRef::new(target_id))),
      ..Statement::default()
    };
    // Voiding statements never carry a pre-set id, so this follows the
    // POST path and receives a fresh id from the server.
    self.save_statement(&mut statement).await
  }

  async fn retrieve_statement(&self, id: Uuid) -> Result<LrsResponse<Statement>> {
    self
      .get_statement(vec![("statementId".to_string(), id.to_string())])
      .await
  }

  async fn retrieve_voided_statement(
    &self,
    id: Uuid,
  ) -> Result<LrsResponse<Statement>> {
    self
      .get_statement(vec![("voidedStatementId".to_string(), id.to_string())])
      .await
  }

  async fn query_statements(
    &self,
    query: &StatementsQuery,
  ) -> Result<LrsResponse<StatementsResult>> {
    let res = self
      .execute(
        HttpRequest::new(Method::GET, STATEMENTS_RESOURCE)
          .query(statements_query_params(query, self.version)),
      )
      .await?;
    if !res.is(StatusCode::OK) {
      return Ok(res.into_failure());
    }
    let result = StatementsResult::from_json_str(&res.body_text())?;
    Ok(LrsResponse::ok(result))
  }

  async fn more_statements(
    &self,
    previous: &StatementsResult,
  ) -> Result<LrsResponse<StatementsResult>> {
    // The cursor is relative to the endpoint's host authority, not to the
    // previous request's full resource path.
    let cursor = previous.more_cursor().ok_or(Error::EmptyCursor)?;
    let resource = format!(
      "{}/{}",
      self.endpoint_origin(),
      cursor.trim_start_matches('/'),
    );

    let res = self.execute(HttpRequest::new(Method::GET, resource)).await?;
    if !res.is(StatusCode::OK) {
      return Ok(res.into_failure());
    }
    let result = StatementsResult::from_json_str(&res.body_text())?;
    Ok(LrsResponse::ok(result))
  }

  // ── State documents ───────────────────────────────────────────────────

  async fn retrieve_state_ids(
    &self,
    activity: &Activity,
    agent: &Agent,
    registration: Option<Uuid>,
  ) -> Result<LrsResponse<Vec<String>>> {
    let params = self.state_scope_params(activity, agent, registration);
    self.get_id_list(STATE_RESOURCE, params).await
  }

  async fn retrieve_state(
    &self,
    id: &str,
    activity: &Activity,
    agent: &Agent,
    registration: Option<Uuid>,
  ) -> Result<LrsResponse<StateDocument>> {
    let mut params = vec![("stateId".to_string(), id.to_string())];
    params.extend(self.state_scope_params(activity, agent, registration));

    let mut state = StateDocument {
      document: Document::new(id),
      activity: activity.clone(),
      agent: agent.clone(),
      registration,
    };

    let res = self
      .get_document(STATE_RESOURCE, params, &mut state.document)
      .await?;
    // 404 is "no such state": the empty document is the answer.
    if !res.is(StatusCode::OK) && !res.is(StatusCode::NOT_FOUND) {
      return Ok(res.into_failure());
    }
    Ok(LrsResponse::ok(state))
  }

  async fn save_state(&self, state: &StateDocument) -> Result<LrsResponse<()>> {
    let mut params = vec![("stateId".to_string(), state.document.id.clone())];
    params.extend(self.state_scope_params(
      &state.activity,
      &state.agent,
      state.registration,
    ));
    self
      .save_document(STATE_RESOURCE, params, &state.document, Method::PUT)
      .await
  }

  async fn delete_state(&self, state: &StateDocument) -> Result<LrsResponse<()>> {
    let mut params = vec![("stateId".to_string(), state.document.id.clone())];
    params.extend(self.state_scope_params(
      &state.activity,
      &state.agent,
      state.registration,
    ));
    self.delete_document(STATE_RESOURCE, params).await
  }

  async fn clear_state(
    &self,
    activity: &Activity,
    agent: &Agent,
    registration: Option<Uuid>,
  ) -> Result<LrsResponse<()>> {
    let params = self.state_scope_params(activity, agent, registration);
    self.delete_document(STATE_RESOURCE, params).await
  }

  // ── Activity profiles ─────────────────────────────────────────────────

  async fn retrieve_activity_profile_ids(
    &self,
    activity: &Activity,
  ) -> Result<LrsResponse<Vec<String>>> {
    let params = self.activity_profile_scope_params(activity);
    self.get_id_list(ACTIVITY_PROFILE_RESOURCE, params).await
  }

  async fn retrieve_activity_profile(
    &self,
    id: &str,
    activity: &Activity,
  ) -> Result<LrsResponse<ActivityProfileDocument>> {
    let mut params = vec![("profileId".to_string(), id.to_string())];
    params.extend(self.activity_profile_scope_params(activity));

    let mut profile = ActivityProfileDocument {
      document: Document::new(id),
      activity: activity.clone(),
    };

    let res = self
      .get_document(ACTIVITY_PROFILE_RESOURCE, params, &mut profile.document)
      .await?;
    if !res.is(StatusCode::OK) && !res.is(StatusCode::NOT_FOUND) {
      return Ok(res.into_failure());
    }
    Ok(LrsResponse::ok(profile))
  }

  async fn save_activity_profile(
    &self,
    profile: &ActivityProfileDocument,
  ) -> Result<LrsResponse<()>> {
    let mut params = vec![("profileId".to_string(), profile.document.id.clone())];
    params.extend(self.activity_profile_scope_params(&profile.activity));
    self
      .save_document(
        ACTIVITY_PROFILE_RESOURCE,
        params,
        &profile.document,
        Method::PUT,
      )
      .await
  }

  async fn delete_activity_profile(
    &self,
    profile: &ActivityProfileDocument,
  ) -> Result<LrsResponse<()>> {
    let mut params = vec![("profileId".to_string(), profile.document.id.clone())];
    params.extend(self.activity_profile_scope_params(&profile.activity));
    self.delete_document(ACTIVITY_PROFILE_RESOURCE, params).await
  }

  // ── Agent profiles ────────────────────────────────────────────────────

  async fn retrieve_agent_profile_ids(
    &self,
    agent: &Agent,
  ) -> Result<LrsResponse<Vec<String>>> {
    let params = self.agent_profile_scope_params(agent);
    self.get_id_list(AGENT_PROFILE_RESOURCE, params).await
  }

  async fn retrieve_agent_profile(
    &self,
    id: &str,
    agent: &Agent,
  ) -> Result<LrsResponse<AgentProfileDocument>> {
    let mut params = vec![("profileId".to_string(), id.to_string())];
    params.extend(self.agent_profile_scope_params(agent));

    let mut profile = AgentProfileDocument {
      document: Document::new(id),
      agent:    agent.clone(),
    };

    let res = self
      .get_document(AGENT_PROFILE_RESOURCE, params, &mut profile.document)
      .await?;
    if !res.is(StatusCode::OK) && !res.is(StatusCode::NOT_FOUND) {
      return Ok(res.into_failure());
    }
    Ok(LrsResponse::ok(profile))
  }

  async fn save_agent_profile(
    &self,
    profile: &AgentProfileDocument,
  ) -> Result<LrsResponse<()>> {
    let mut params = vec![("profileId".to_string(), profile.document.id.clone())];
    params.extend(self.agent_profile_scope_params(&profile.agent));
    self
      .save_document(AGENT_PROFILE_RESOURCE, params, &profile.document, Method::PUT)
      .await
  }

  async fn force_save_agent_profile(
    &self,
    profile: &AgentProfileDocument,
  ) -> Result<LrsResponse<()>> {
    let mut params = vec![("profileId".to_string(), profile.document.id.clone())];
    params.extend(self.agent_profile_scope_params(&profile.agent));
    self
      .save_document(AGENT_PROFILE_RESOURCE, params, &profile.document, Method::POST)
      .await
  }

  async fn delete_agent_profile(
    &self,
    profile: &AgentProfileDocument,
  ) -> Result<LrsResponse<()>> {
    let mut params = vec![("profileId".to_string(), profile.document.id.clone())];
    params.extend(self.agent_profile_scope_params(&profile.agent));
    self.delete_document(AGENT_PROFILE_RESOURCE, params).await
  }
}
