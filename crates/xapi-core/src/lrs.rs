//! The `Lrs` trait — every operation a Learning Record Store offers.
//!
//! The trait is implemented by transports (e.g. `xapi-client`'s
//! `RemoteLrs`). Higher layers depend on this abstraction, not on any
//! concrete HTTP stack.

use std::future::Future;

use uuid::Uuid;

use crate::{
  about::About,
  activity::Activity,
  actor::Agent,
  document::{ActivityProfileDocument, AgentProfileDocument, StateDocument},
  query::{StatementsQuery, StatementsResult},
  response::LrsResponse,
  statement::Statement,
};

/// Abstraction over a Learning Record Store.
///
/// Transport and unexpected-status failures are reported inside the
/// returned [`LrsResponse`]; the outer `Result` is reserved for hard
/// failures (malformed entities, programmer errors).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait Lrs: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the LRS's self-description (supported versions, extensions).
  fn about(
    &self,
  ) -> impl Future<Output = Result<LrsResponse<About>, Self::Error>> + Send + '_;

  // ── Statements ────────────────────────────────────────────────────────

  /// Persist one statement.
  ///
  /// Without an id the statement is POSTed and the server-assigned id is
  /// written back onto `statement`; with an id it is PUT and the id is
  /// left untouched.
  fn save_statement<'a>(
    &'a self,
    statement: &'a mut Statement,
  ) -> impl Future<Output = Result<LrsResponse<Statement>, Self::Error>> + Send + 'a;

  /// Persist a batch of statements with one request.
  ///
  /// The server's id array is assigned positionally onto `statements`;
  /// a length mismatch fails the whole batch with no ids assigned.
  fn save_statements<'a>(
    &'a self,
    statements: &'a mut [Statement],
  ) -> impl Future<Output = Result<LrsResponse<StatementsResult>, Self::Error>>
  + Send
  + 'a;

  /// Record a voiding statement against `target_id` on behalf of `agent`.
  fn void_statement(
    &self,
    target_id: Uuid,
    agent: Agent,
  ) -> impl Future<Output = Result<LrsResponse<Statement>, Self::Error>> + Send + '_;

  /// Fetch one statement by id.
  fn retrieve_statement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<LrsResponse<Statement>, Self::Error>> + Send + '_;

  /// Fetch one voided statement by id.
  fn retrieve_voided_statement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<LrsResponse<Statement>, Self::Error>> + Send + '_;

  /// Run a filtered statements query and return the first page.
  fn query_statements<'a>(
    &'a self,
    query: &'a StatementsQuery,
  ) -> impl Future<Output = Result<LrsResponse<StatementsResult>, Self::Error>>
  + Send
  + 'a;

  /// Follow a previous page's `more` cursor to the next page.
  ///
  /// The cursor must be present and non-empty.
  fn more_statements<'a>(
    &'a self,
    previous: &'a StatementsResult,
  ) -> impl Future<Output = Result<LrsResponse<StatementsResult>, Self::Error>>
  + Send
  + 'a;

  // ── State documents ───────────────────────────────────────────────────

  /// List state document ids for an (activity, agent[, registration]).
  fn retrieve_state_ids<'a>(
    &'a self,
    activity: &'a Activity,
    agent: &'a Agent,
    registration: Option<Uuid>,
  ) -> impl Future<Output = Result<LrsResponse<Vec<String>>, Self::Error>>
  + Send
  + 'a;

  /// Fetch one state document. A 404 yields a success envelope holding
  /// the empty document.
  fn retrieve_state<'a>(
    &'a self,
    id: &'a str,
    activity: &'a Activity,
    agent: &'a Agent,
    registration: Option<Uuid>,
  ) -> impl Future<Output = Result<LrsResponse<StateDocument>, Self::Error>>
  + Send
  + 'a;

  fn save_state<'a>(
    &'a self,
    state: &'a StateDocument,
  ) -> impl Future<Output = Result<LrsResponse<()>, Self::Error>> + Send + 'a;

  fn delete_state<'a>(
    &'a self,
    state: &'a StateDocument,
  ) -> impl Future<Output = Result<LrsResponse<()>, Self::Error>> + Send + 'a;

  /// Delete every state document for an (activity, agent[, registration]).
  fn clear_state<'a>(
    &'a self,
    activity: &'a Activity,
    agent: &'a Agent,
    registration: Option<Uuid>,
  ) -> impl Future<Output = Result<LrsResponse<()>, Self::Error>> + Send + 'a;

  // ── Activity profiles ─────────────────────────────────────────────────

  fn retrieve_activity_profile_ids<'a>(
    &'a self,
    activity: &'a Activity,
  ) -> impl Future<Output = Result<LrsResponse<Vec<String>>, Self::Error>>
  + Send
  + 'a;

  fn retrieve_activity_profile<'a>(
    &'a self,
    id: &'a str,
    activity: &'a Activity,
  ) -> impl Future<Output = Result<LrsResponse<ActivityProfileDocument>, Self::Error>>
  + Send
  + 'a;

  fn save_activity_profile<'a>(
    &'a self,
    profile: &'a ActivityProfileDocument,
  ) -> impl Future<Output = Result<LrsResponse<()>, Self::Error>> + Send + 'a;

  fn delete_activity_profile<'a>(
    &'a self,
    profile: &'a ActivityProfileDocument,
  ) -> impl Future<Output = Result<LrsResponse<()>, Self::Error>> + Send + 'a;

  // ── Agent profiles ────────────────────────────────────────────────────

  fn retrieve_agent_profile_ids<'a>(
    &'a self,
    agent: &'a Agent,
  ) -> impl Future<Output = Result<LrsResponse<Vec<String>>, Self::Error>>
  + Send
  + 'a;

  fn retrieve_agent_profile<'a>(
    &'a self,
    id: &'a str,
    agent: &'a Agent,
  ) -> impl Future<Output = Result<LrsResponse<AgentProfileDocument>, Self::Error>>
  + Send
  + 'a;

  /// Conditional save (PUT) honouring the document's ETag.
  fn save_agent_profile<'a>(
    &'a self,
    profile: &'a AgentProfileDocument,
  ) -> impl Future<Output = Result<LrsResponse<()>, Self::Error>> + Send + 'a;

  /// Unconditional save (POST).
  fn force_save_agent_profile<'a>(
    &'a self,
    profile: &'a AgentProfileDocument,
  ) -> impl Future<Output = Result<LrsResponse<()>, Self::Error>> + Send + 'a;

  fn delete_agent_profile<'a>(
    &'a self,
    profile: &'a AgentProfileDocument,
  ) -> impl Future<Output = Result<LrsResponse<()>, Self::Error>> + Send + 'a;
}
