//! Store proxy endpoints, mirroring the remote API one-to-one.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::error;

use comptoir_notion::{NotionClient, Page, Properties, QueryFilter};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct StatusResponse {
  pub status: &'static str,
  pub message: String,
  pub has_api_key: bool,
}

/// The browser UI posts `apiKey`; snake_case is accepted too.
#[derive(Deserialize)]
pub struct ValidateRequest {
  #[serde(default, alias = "apiKey")]
  pub api_key: Option<String>,
}

#[derive(Serialize)]
pub struct ValidateResponse {
  pub valid: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct QueryRequest {
  #[serde(default)]
  pub filter: Option<QueryFilter>,
}

#[derive(Deserialize)]
pub struct CreatePageRequest {
  pub database_id: String,
  pub properties: Properties,
}

#[derive(Deserialize)]
pub struct UpdatePageRequest {
  pub properties: Properties,
}

/// GET / — liveness banner.
pub async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
  Json(json!({
    "message": "comptoir proxy is running",
    "has_api_key": !state.settings.notion_api_key.is_empty(),
  }))
}

/// GET /api/notion/status — probe the configured credential.
pub async fn status(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
  match state.notion.list_users().await {
    Ok(_) => Ok(Json(StatusResponse {
      status: "connected",
      message: "successfully connected to the store API".to_string(),
      has_api_key: true,
    })),
    Err(e) => {
      error!(error = %e, "store_status_check_failed");
      Err(ApiError::Notion(e))
    }
  }
}

/// POST /api/notion/validate — probe a caller-supplied credential.
pub async fn validate(
  Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
  let api_key = request
    .api_key
    .filter(|k| !k.is_empty())
    .ok_or_else(|| ApiError::InvalidInput("api_key is required".to_string()))?;

  // Throwaway client: the supplied key must not touch shared state.
  let probe = NotionClient::new(api_key)?;
  match probe.list_users().await {
    Ok(_) => Ok(Json(ValidateResponse {
      valid: true,
      error: None,
    })),
    Err(e) => Ok(Json(ValidateResponse {
      valid: false,
      error: Some(e.to_string()),
    })),
  }
}

/// GET /api/notion/database/{database_id} — declared schema summary.
pub async fn retrieve_database(
  State(state): State<Arc<AppState>>,
  Path(database_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  let schema = state.notion.retrieve_database(&database_id).await?;
  let properties: BTreeMap<&str, &str> = schema
    .property_names()
    .filter_map(|name| schema.kind_of(name).map(|kind| (name, kind)))
    .collect();
  Ok(Json(json!({
    "name": schema.name(),
    "properties": properties,
  })))
}

/// POST /api/notion/database/{database_id}/query — filtered record list.
pub async fn query_database(
  State(state): State<Arc<AppState>>,
  Path(database_id): Path<String>,
  Json(request): Json<QueryRequest>,
) -> Result<Json<Value>, ApiError> {
  let pages = state
    .notion
    .query_database(&database_id, request.filter.as_ref())
    .await?;
  Ok(Json(json!({ "results": pages.iter().map(page_json).collect::<Vec<_>>() })))
}

/// POST /api/notion/pages — create a record.
pub async fn create_page(
  State(state): State<Arc<AppState>>,
  Json(request): Json<CreatePageRequest>,
) -> Result<Json<Value>, ApiError> {
  let page = state
    .notion
    .create_page(&request.database_id, &request.properties)
    .await?;
  Ok(Json(page_json(&page)))
}

/// PATCH /api/notion/pages/{page_id} — update a record's properties.
pub async fn update_page(
  State(state): State<Arc<AppState>>,
  Path(page_id): Path<String>,
  Json(request): Json<UpdatePageRequest>,
) -> Result<Json<Value>, ApiError> {
  let page = state
    .notion
    .update_page(&page_id, &request.properties)
    .await?;
  Ok(Json(page_json(&page)))
}

/// POST /api/notion/pages/{page_id}/archive — archive a record.
pub async fn archive_page(
  State(state): State<Arc<AppState>>,
  Path(page_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  let page = state.notion.archive_page(&page_id).await?;
  Ok(Json(page_json(&page)))
}

fn page_json(page: &Page) -> Value {
  json!({
    "id": page.id,
    "archived": page.archived,
    "properties": page.properties,
  })
}
