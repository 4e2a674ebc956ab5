use comptoir_config::Settings;
use comptoir_n8n::{N8nClient, Waiter};
use comptoir_notion::NotionClient;
use comptoir_schema::SchemaRegistry;
use comptoir_sync::Synchronizer;

use crate::error::ApiError;

/// Shared server state. Clients are constructed once here and reused for
/// the process lifetime; handlers receive the state behind an `Arc`.
pub struct AppState {
  pub settings: Settings,
  pub registry: SchemaRegistry,
  pub notion: NotionClient,
  pub synchronizer: Synchronizer<NotionClient>,
  pub n8n: N8nClient,
  pub waiter: Waiter,
}

impl AppState {
  pub fn new(settings: Settings) -> Result<Self, ApiError> {
    let registry = SchemaRegistry::default();
    let notion = NotionClient::new(&settings.notion_api_key)?;
    let n8n = N8nClient::new(&settings.n8n_api_url, settings.n8n_api_key.clone())?;
    let synchronizer = Synchronizer::new(notion.clone(), registry.clone());

    Ok(Self {
      settings,
      registry,
      notion,
      synchronizer,
      n8n,
      waiter: Waiter::default(),
    })
  }
}
