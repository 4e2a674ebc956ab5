use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post};
use tracing::info;

use crate::routes::{n8n, notion};
use crate::state::AppState;

/// Assemble the proxy router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/", get(notion::root))
    .route("/api/notion/status", get(notion::status))
    .route("/api/notion/validate", post(notion::validate))
    .route("/api/notion/database/{database_id}", get(notion::retrieve_database))
    .route(
      "/api/notion/database/{database_id}/query",
      post(notion::query_database),
    )
    .route("/api/notion/pages", post(notion::create_page))
    .route("/api/notion/pages/{page_id}", patch(notion::update_page))
    .route("/api/notion/pages/{page_id}/archive", post(notion::archive_page))
    .route("/api/n8n/sync", post(n8n::sync))
    .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>) -> Result<(), std::io::Error> {
  let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
  let router = build_router(state);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  info!(addr = %addr, "proxy_listening");
  axum::serve(listener, router).await
}

// Building the router needs a full AppState; state construction itself is
// covered here since it validates both client configurations.
#[cfg(test)]
mod tests {
  use comptoir_config::Settings;

  use super::*;
  use crate::error::ApiError;

  #[test]
  fn state_builds_from_minimal_settings() {
    let settings =
      Settings::from_lookup(|name| (name == "NOTION_API_KEY").then(|| "secret_x".to_string()))
        .unwrap();
    let state = AppState::new(settings);
    assert!(state.is_ok());
  }

  #[test]
  fn state_rejects_bad_engine_url() {
    let settings = Settings::from_lookup(|name| match name {
      "NOTION_API_KEY" => Some("secret_x".to_string()),
      "N8N_API_URL" => Some("::not a url::".to_string()),
      _ => None,
    })
    .unwrap();
    assert!(matches!(AppState::new(settings), Err(ApiError::Engine(_))));
  }
}
