//! Comptoir Server
//!
//! The HTTP proxy layer. It exists so the browser admin UI never talks to
//! the store directly: the API token stays here, and the store's CORS
//! restrictions never apply. Endpoints mirror the store API one-to-one,
//! plus the `/api/n8n/sync` action that runs a workflow to completion and
//! pushes its output rows through the synchronizer.

mod error;
mod routes;
mod server;
mod state;

pub use error::ApiError;
pub use server::{build_router, serve};
pub use state::AppState;
