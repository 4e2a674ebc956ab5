//! The find-or-create synchronizer.

use comptoir_notion::{DatabaseSchema, QueryFilter};
use comptoir_schema::{
  DomainItem, EntitySchema, EntityType, FieldMapping, FieldValue, PropertyKind, SchemaError,
  SchemaRegistry,
};
use tracing::{info, instrument, warn};

use crate::error::{ItemError, SyncError};
use crate::outcome::{SyncAction, SyncOutcome};
use crate::serialize::build_properties;
use crate::store::RemoteStore;

/// Pushes batches of domain items into remote databases.
pub struct Synchronizer<S> {
  store: S,
  registry: SchemaRegistry,
}

impl<S: RemoteStore> Synchronizer<S> {
  pub fn new(store: S, registry: SchemaRegistry) -> Self {
    Self { store, registry }
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  /// Sync a batch of items of one entity type into a target database.
  ///
  /// Returns one outcome per item, in input order. A schema retrieval
  /// failure aborts the whole call before any item is attempted; item
  /// failures are recorded in place and the loop continues.
  #[instrument(name = "sync_batch", skip(self, items), fields(entity = %entity))]
  pub async fn sync(
    &self,
    entity: EntityType,
    database_id: &str,
    items: &[DomainItem],
  ) -> Result<Vec<SyncOutcome>, SyncError> {
    let schema = self
      .registry
      .schema(entity)
      .ok_or_else(|| SyncError::UnknownEntity(entity.to_string()))?;

    // One retrieve per batch; a failure here is a connectivity problem and
    // fails fast rather than producing N identical item errors.
    let target =
      self
        .store
        .database_schema(database_id)
        .await
        .map_err(|source| SyncError::SchemaRetrieval {
          database_id: database_id.to_string(),
          source,
        })?;

    info!(item_count = items.len(), "sync_started");

    let mut outcomes = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
      let outcome = match self.sync_item(schema, &target, database_id, item).await {
        Ok((id, action)) => {
          info!(index, id = %id, action = ?action, "item_synced");
          SyncOutcome::Synced { id, action }
        }
        Err(e) => {
          warn!(index, error = %e, "item_sync_failed");
          SyncOutcome::Failed {
            error: e.to_string(),
          }
        }
      };
      outcomes.push(outcome);
    }

    info!(
      synced = outcomes.iter().filter(|o| o.is_success()).count(),
      failed = outcomes.iter().filter(|o| !o.is_success()).count(),
      "sync_finished"
    );

    Ok(outcomes)
  }

  async fn sync_item(
    &self,
    schema: &EntitySchema,
    target: &DatabaseSchema,
    database_id: &str,
    item: &DomainItem,
  ) -> Result<(String, SyncAction), ItemError> {
    let properties = build_properties(schema, target, item)?;

    let key = schema.natural_key_mapping();
    let key_value = item
      .get(&key.logical)
      .ok_or_else(|| SchemaError::MissingNaturalKey(key.logical.clone()))?;
    let filter = natural_key_filter(key, key_value)?;

    let matches = self.store.find_matching(database_id, &filter).await?;

    // First match in list order wins; extra matches (pre-existing
    // duplicates) are left untouched.
    match matches.first() {
      Some(existing) => {
        let updated = self.store.update_record(&existing.id, &properties).await?;
        Ok((updated.id, SyncAction::Updated))
      }
      None => {
        let created = self.store.create_record(database_id, &properties).await?;
        Ok((created.id, SyncAction::Created))
      }
    }
  }
}

/// Equality filter on the entity's natural-key property.
fn natural_key_filter(key: &FieldMapping, value: &FieldValue) -> Result<QueryFilter, SchemaError> {
  match (key.kind, value) {
    (PropertyKind::Number, FieldValue::Number(n)) => {
      Ok(QueryFilter::number_equals(&key.property, *n))
    }
    (kind, value) => {
      let text = value.as_text().ok_or_else(|| SchemaError::KindMismatch {
        field: key.logical.clone(),
        value_kind: value.kind_name(),
        kind: kind.as_str(),
      })?;
      Ok(QueryFilter::equals(&key.property, kind.as_str(), text))
    }
  }
}
