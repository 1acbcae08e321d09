//! Shared primitives for the document resources (state, activity profile,
//! agent profile).
//!
//! All three resources share the same wire shape: GET returns opaque
//! bytes, PUT/POST writes them back conditionally via `If-Match`, DELETE
//! removes them, and a scoped GET without a document id lists ids.

use reqwest::{Method, StatusCode};
use xapi_core::{
  LrsResponse,
  activity::Activity,
  actor::Agent,
  document::Document,
};
use uuid::Uuid;
use xapi_json::ToJson;

use crate::{
  RemoteLrs,
  error::Result,
  http::{HttpRequest, HttpResponse},
};

impl RemoteLrs {
  /// GET a document. On 200 the document's content, content type, ETag
  /// and last-modified are populated; any other status leaves it
  /// untouched. The caller decides whether a 404 is an error.
  pub(crate) async fn get_document(
    &self,
    resource: &str,
    query: Vec<(String, String)>,
    document: &mut Document,
  ) -> Result<HttpResponse> {
    let res = self
      .execute(HttpRequest::new(Method::GET, resource).query(query))
      .await?;
    if res.is(StatusCode::OK) {
      document.content = res.content.clone();
      document.content_type = res.content_type.clone();
      document.etag = res.etag.clone();
      document.updated = res.last_modified;
    }
    Ok(res)
  }

  /// PUT or POST a document; success iff 204 No-Content. The document's
  /// ETag, when present, rides along as `If-Match`.
  pub(crate) async fn save_document(
    &self,
    resource: &str,
    query: Vec<(String, String)>,
    document: &Document,
    method: Method,
  ) -> Result<LrsResponse<()>> {
    let mut req = HttpRequest::new(method, resource)
      .query(query)
      .body(document.content.clone());
    if let Some(content_type) = &document.content_type {
      req = req.content_type(content_type.clone());
    }
    if let Some(etag) = &document.etag {
      req = req.header("If-Match", etag.clone());
    }

    let res = self.execute(req).await?;
    if !res.is(StatusCode::NO_CONTENT) {
      return Ok(res.into_failure());
    }
    Ok(LrsResponse::ok(()))
  }

  /// DELETE a document (or a whole scope); success iff 204 No-Content.
  pub(crate) async fn delete_document(
    &self,
    resource: &str,
    query: Vec<(String, String)>,
  ) -> Result<LrsResponse<()>> {
    let res = self
      .execute(HttpRequest::new(Method::DELETE, resource).query(query))
      .await?;
    if !res.is(StatusCode::NO_CONTENT) {
      return Ok(res.into_failure());
    }
    Ok(LrsResponse::ok(()))
  }

  /// GET an owner-scoped id listing; success iff 200 with a JSON string
  /// array body. An empty array is an empty (never null) list.
  pub(crate) async fn get_id_list(
    &self,
    resource: &str,
    query: Vec<(String, String)>,
  ) -> Result<LrsResponse<Vec<String>>> {
    let res = self
      .execute(HttpRequest::new(Method::GET, resource).query(query))
      .await?;
    if !res.is(StatusCode::OK) {
      return Ok(res.into_failure());
    }
    let ids = xapi_json::parse_string_array(&res.body_text())?;
    Ok(LrsResponse::ok(ids))
  }

  // ── Owner-scoping parameters ──────────────────────────────────────────

  pub(crate) fn state_scope_params(
    &self,
    activity: &Activity,
    agent: &Agent,
    registration: Option<Uuid>,
  ) -> Vec<(String, String)> {
    let mut params = vec![
      ("activityId".to_string(), activity.id.clone()),
      ("agent".to_string(), agent.to_json_string(self.version)),
    ];
    if let Some(registration) = registration {
      params.push(("registration".to_string(), registration.to_string()));
    }
    params
  }

  pub(crate) fn activity_profile_scope_params(
    &self,
    activity: &Activity,
  ) -> Vec<(String, String)> {
    vec![("activityId".to_string(), activity.id.clone())]
  }

  pub(crate) fn agent_profile_scope_params(
    &self,
    agent: &Agent,
  ) -> Vec<(String, String)> {
    vec![("agent".to_string(), agent.to_json_string(self.version))]
  }
}
