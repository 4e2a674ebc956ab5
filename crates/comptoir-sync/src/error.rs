use comptoir_notion::NotionError;
use comptoir_schema::SchemaError;
use thiserror::Error;

/// Batch-fatal synchronizer errors.
#[derive(Debug, Error)]
pub enum SyncError {
  /// No schema registered for the requested entity type.
  #[error("no schema registered for entity type '{0}'")]
  UnknownEntity(String),

  /// The target database's schema could not be retrieved. Fatal to the
  /// whole call: no partial batch is attempted.
  #[error("failed to retrieve schema for database '{database_id}': {source}")]
  SchemaRetrieval {
    database_id: String,
    #[source]
    source: NotionError,
  },
}

/// Per-item failures. Captured into the item's result slot, never fatal to
/// the batch.
#[derive(Debug, Error)]
pub enum ItemError {
  #[error(transparent)]
  Schema(#[from] SchemaError),

  #[error("remote write failed: {0}")]
  Store(#[from] NotionError),
}
