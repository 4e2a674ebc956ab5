use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use comptoir_n8n::EngineError;
use comptoir_notion::NotionError;
use comptoir_sync::SyncError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
  pub success: bool,
  pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
  /// Missing or malformed request fields.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// Server-side misconfiguration (missing credential or database id).
  #[error("configuration error: {0}")]
  Configuration(String),

  #[error(transparent)]
  Notion(#[from] NotionError),

  #[error(transparent)]
  Engine(#[from] EngineError),

  #[error(transparent)]
  Sync(#[from] SyncError),

  /// The workflow reached its terminal error status; carries the
  /// engine-reported detail.
  #[error("workflow failed: {0}")]
  Workflow(String),

  /// The workflow did not reach a terminal status within the poll budget.
  /// Deliberately distinct from a workflow error.
  #[error("workflow execution timed out")]
  Timeout,
}

impl ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
      ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Notion(err) => upstream_status(err),
      ApiError::Engine(EngineError::Api { status, .. }) => {
        StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
      }
      ApiError::Engine(_) => StatusCode::BAD_GATEWAY,
      ApiError::Sync(SyncError::UnknownEntity(_)) => StatusCode::BAD_REQUEST,
      ApiError::Sync(SyncError::SchemaRetrieval { .. }) => StatusCode::BAD_GATEWAY,
      ApiError::Workflow(_) => StatusCode::BAD_GATEWAY,
      ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
    }
  }
}

fn upstream_status(err: &NotionError) -> StatusCode {
  match err {
    NotionError::Api { status, .. } => {
      StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
    }
    NotionError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    NotionError::Http(_) | NotionError::Decode(_) => StatusCode::BAD_GATEWAY,
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let code = self.status_code();
    let body = ErrorBody {
      success: false,
      error: self.to_string(),
    };
    (code, Json(body)).into_response()
  }
}
