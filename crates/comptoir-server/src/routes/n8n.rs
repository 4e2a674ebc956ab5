//! Workflow-driven sync endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use comptoir_n8n::RunOutcome;
use comptoir_schema::{DomainItem, EntityType};

use crate::error::ApiError;
use crate::state::AppState;

/// The browser UI posts camelCase keys; snake_case is accepted too.
#[derive(Debug, Deserialize)]
pub struct SyncRequest {
  #[serde(default, alias = "workflowId")]
  pub workflow_id: Option<String>,
  #[serde(default, alias = "entityType")]
  pub entity_type: Option<String>,
}

/// Validate the request before any engine call happens.
fn parse_sync_request(request: &SyncRequest) -> Result<(String, EntityType), ApiError> {
  let workflow_id = request
    .workflow_id
    .as_deref()
    .filter(|s| !s.is_empty())
    .ok_or_else(|| ApiError::InvalidInput("workflow_id is required".to_string()))?;

  let raw_entity = request
    .entity_type
    .as_deref()
    .filter(|s| !s.is_empty())
    .ok_or_else(|| ApiError::InvalidInput("entity_type is required".to_string()))?;

  let entity = raw_entity
    .parse::<EntityType>()
    .map_err(|e| ApiError::InvalidInput(e.to_string()))?;

  Ok((workflow_id.to_string(), entity))
}

/// The workflow's output rows, wherever the engine nests them.
fn extract_rows(data: &Value) -> Vec<Value> {
  if let Some(rows) = data.as_array() {
    return rows.clone();
  }
  for path in [&["rows"][..], &["resultData", "rows"][..]] {
    let mut cursor = data;
    for key in path {
      match cursor.get(key) {
        Some(next) => cursor = next,
        None => {
          cursor = &Value::Null;
          break;
        }
      }
    }
    if let Some(rows) = cursor.as_array() {
      return rows.clone();
    }
  }
  Vec::new()
}

/// POST /api/n8n/sync — run a workflow to completion, then push its output
/// rows into the entity's configured database.
pub async fn sync(
  State(state): State<Arc<AppState>>,
  Json(request): Json<SyncRequest>,
) -> Result<Json<Value>, ApiError> {
  let (workflow_id, entity) = parse_sync_request(&request)?;

  let database_id = state
    .settings
    .database_id(entity)
    .ok_or_else(|| ApiError::Configuration(format!("no database configured for {entity}")))?
    .to_string();

  let outcome = state
    .waiter
    .run_and_await(&state.n8n, &workflow_id, &json!({ "entityType": entity }))
    .await?;

  let data = match outcome {
    RunOutcome::TimedOut => return Err(ApiError::Timeout),
    RunOutcome::Error { detail } => return Err(ApiError::Workflow(detail.to_string())),
    RunOutcome::Success { data } => data,
  };

  let schema = state
    .registry
    .schema(entity)
    .ok_or_else(|| ApiError::Configuration(format!("no schema registered for {entity}")))?;

  let items: Vec<DomainItem> = extract_rows(&data)
    .iter()
    .map(|row| DomainItem::from_row(schema, row))
    .collect();

  info!(entity = %entity, rows = items.len(), "workflow_rows_received");

  let results = state.synchronizer.sync(entity, &database_id, &items).await?;
  let synced = results.iter().filter(|r| r.is_success()).count();

  Ok(Json(json!({
    "success": synced == results.len(),
    "message": format!("synced {synced}/{} {entity} records", results.len()),
    "data": results,
  })))
}
