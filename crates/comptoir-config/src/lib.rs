//! Comptoir Config
//!
//! Runtime configuration loaded from environment variables. Nothing is
//! persisted to disk; credentials and database ids are supplied by the
//! environment, as the proxy deployments do.
//!
//! Variables:
//! - `NOTION_API_KEY` — store credential (required to serve)
//! - `NOTION_DB_PRODUCTS` / `NOTION_DB_PROJECTS` / `NOTION_DB_ORDERS` /
//!   `NOTION_DB_CONTACTS` — target database id per entity type
//! - `N8N_API_URL` — workflow engine root (default `http://localhost:5678/api`)
//! - `N8N_API_KEY` — workflow engine credential (optional)
//! - `COMPTOIR_PORT` — proxy listen port (default 3001)

use std::collections::HashMap;
use std::env;

use comptoir_schema::EntityType;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_N8N_URL: &str = "http://localhost:5678/api";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("missing required environment variable {0}")]
  Missing(&'static str),

  #[error("invalid value for {name}: {message}")]
  Invalid { name: &'static str, message: String },
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
  pub notion_api_key: String,
  pub n8n_api_url: String,
  pub n8n_api_key: Option<String>,
  pub port: u16,
  databases: HashMap<EntityType, String>,
}

impl Settings {
  /// Load from the process environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Load from an arbitrary lookup. Split out so tests do not have to
  /// mutate the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let notion_api_key = lookup("NOTION_API_KEY")
      .filter(|v| !v.is_empty())
      .ok_or(ConfigError::Missing("NOTION_API_KEY"))?;

    let port = match lookup("COMPTOIR_PORT") {
      None => DEFAULT_PORT,
      Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
        name: "COMPTOIR_PORT",
        message: format!("'{raw}' is not a port number"),
      })?,
    };

    let mut databases = HashMap::new();
    for (entity, name) in [
      (EntityType::Products, "NOTION_DB_PRODUCTS"),
      (EntityType::Projects, "NOTION_DB_PROJECTS"),
      (EntityType::Orders, "NOTION_DB_ORDERS"),
      (EntityType::Contacts, "NOTION_DB_CONTACTS"),
    ] {
      if let Some(id) = lookup(name).filter(|v| !v.is_empty()) {
        databases.insert(entity, id);
      }
    }

    Ok(Self {
      notion_api_key,
      n8n_api_url: lookup("N8N_API_URL")
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_N8N_URL.to_string()),
      n8n_api_key: lookup("N8N_API_KEY").filter(|v| !v.is_empty()),
      port,
      databases,
    })
  }

  /// The configured database id for an entity type, if any.
  pub fn database_id(&self, entity: EntityType) -> Option<&str> {
    self.databases.get(&entity).map(String::as_str)
  }

  /// Credential masked for log output, first seven characters only.
  pub fn masked_api_key(&self) -> String {
    let prefix: String = self.notion_api_key.chars().take(7).collect();
    format!("{prefix}...")
  }
}
