use async_trait::async_trait;
use comptoir_notion::{DatabaseSchema, NotionClient, NotionError, Properties, QueryFilter};

/// A reference to a remote record: just its opaque id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
  pub id: String,
}

/// The remote store surface the synchronizer needs.
///
/// `NotionClient` is the production implementation; tests run against an
/// in-memory fake.
#[async_trait]
pub trait RemoteStore: Send + Sync {
  /// Declared property schema of a database.
  async fn database_schema(&self, database_id: &str) -> Result<DatabaseSchema, NotionError>;

  /// Records matching an equality filter, in the store's list order.
  async fn find_matching(
    &self,
    database_id: &str,
    filter: &QueryFilter,
  ) -> Result<Vec<RecordRef>, NotionError>;

  async fn create_record(
    &self,
    database_id: &str,
    properties: &Properties,
  ) -> Result<RecordRef, NotionError>;

  async fn update_record(
    &self,
    record_id: &str,
    properties: &Properties,
  ) -> Result<RecordRef, NotionError>;
}

#[async_trait]
impl RemoteStore for NotionClient {
  async fn database_schema(&self, database_id: &str) -> Result<DatabaseSchema, NotionError> {
    self.retrieve_database(database_id).await
  }

  async fn find_matching(
    &self,
    database_id: &str,
    filter: &QueryFilter,
  ) -> Result<Vec<RecordRef>, NotionError> {
    let pages = self.query_database(database_id, Some(filter)).await?;
    Ok(pages.into_iter().map(|p| RecordRef { id: p.id }).collect())
  }

  async fn create_record(
    &self,
    database_id: &str,
    properties: &Properties,
  ) -> Result<RecordRef, NotionError> {
    let page = self.create_page(database_id, properties).await?;
    Ok(RecordRef { id: page.id })
  }

  async fn update_record(
    &self,
    record_id: &str,
    properties: &Properties,
  ) -> Result<RecordRef, NotionError> {
    let page = self.update_page(record_id, properties).await?;
    Ok(RecordRef { id: page.id })
  }
}
