//! Shared primitives for the statements resource.

use reqwest::{Method, StatusCode};
use xapi_core::{LrsResponse, statement::Statement};
use xapi_json::FromJson;

use crate::{RemoteLrs, error::Result, http::HttpRequest};

pub(crate) const STATEMENTS_RESOURCE: &str = "statements";

impl RemoteLrs {
  /// GET one statement. `query` carries either `statementId` or
  /// `voidedStatementId`; success iff 200 with a statement body.
  pub(crate) async fn get_statement(
    &self,
    query: Vec<(String, String)>,
  ) -> Result<LrsResponse<Statement>> {
    let res = self
      .execute(HttpRequest::new(Method::GET, STATEMENTS_RESOURCE).query(query))
      .await?;
    if !res.is(StatusCode::OK) {
      return Ok(res.into_failure());
    }
    let statement = Statement::from_json_str(&res.body_text())?;
    Ok(LrsResponse::ok(statement))
  }
}
