//! Synchronizer behavior against an in-memory remote store.

use std::sync::Mutex;

use async_trait::async_trait;
use comptoir_notion::{DatabaseSchema, NotionError, Properties, PropertyValue, QueryFilter};
use comptoir_schema::{DomainItem, EntityType, FieldValue, SchemaRegistry};
use comptoir_sync::{RecordRef, RemoteStore, SyncAction, SyncError, SyncOutcome, Synchronizer};
use serde_json::{Value, json};

struct FakeRecord {
  id: String,
  properties: Properties,
}

/// In-memory single-database store. Filters are interpreted from their
/// wire shape, the same JSON the real store would receive.
struct FakeStore {
  schema: Value,
  records: Mutex<Vec<FakeRecord>>,
  next_id: Mutex<u32>,
  fail_schema: bool,
  /// Simulate a write error when a created record carries this text value.
  fail_create_on: Option<String>,
}

impl FakeStore {
  fn new(schema: Value) -> Self {
    Self {
      schema,
      records: Mutex::new(Vec::new()),
      next_id: Mutex::new(1),
      fail_schema: false,
      fail_create_on: None,
    }
  }

  fn product_schema() -> Value {
    json!({
      "Nom": { "type": "title" },
      "Référence": { "type": "rich_text" },
      "Description": { "type": "rich_text" },
      "Prix": { "type": "number" },
    })
  }

  fn seed(&self, id: &str, properties: Properties) {
    self.records.lock().unwrap().push(FakeRecord {
      id: id.to_string(),
      properties,
    });
  }

  fn record_count(&self) -> usize {
    self.records.lock().unwrap().len()
  }

  fn properties_of(&self, id: &str) -> Option<Properties> {
    self
      .records
      .lock()
      .unwrap()
      .iter()
      .find(|r| r.id == id)
      .map(|r| r.properties.clone())
  }

  fn fresh_id(&self) -> String {
    let mut next = self.next_id.lock().unwrap();
    let id = format!("page-{next}");
    *next += 1;
    id
  }
}

/// The comparable scalar inside a stored property value.
fn comparable(value: &PropertyValue) -> Value {
  match value {
    PropertyValue::Title(spans) | PropertyValue::RichText(spans) => json!(
      spans
        .first()
        .map(|s| s.text.content.clone())
        .unwrap_or_default()
    ),
    PropertyValue::Number(n) => json!(n),
    PropertyValue::Select(s) => json!(s.name),
    PropertyValue::Date(d) => json!(d.start),
    PropertyValue::Email(s) | PropertyValue::PhoneNumber(s) => json!(s),
  }
}

/// Pull (property, equals-value) out of a filter's wire shape.
fn filter_parts(filter: &QueryFilter) -> (String, Value) {
  let wire = serde_json::to_value(filter).unwrap();
  let object = wire.as_object().unwrap();
  let property = object["property"].as_str().unwrap().to_string();
  let equals = object
    .iter()
    .find(|(k, _)| *k != "property")
    .map(|(_, condition)| condition["equals"].clone())
    .unwrap();
  (property, equals)
}

#[async_trait]
impl RemoteStore for FakeStore {
  async fn database_schema(&self, _database_id: &str) -> Result<DatabaseSchema, NotionError> {
    if self.fail_schema {
      return Err(NotionError::Api {
        status: 503,
        message: "store unreachable".to_string(),
      });
    }
    Ok(serde_json::from_value(json!({ "properties": self.schema })).unwrap())
  }

  async fn find_matching(
    &self,
    _database_id: &str,
    filter: &QueryFilter,
  ) -> Result<Vec<RecordRef>, NotionError> {
    let (property, equals) = filter_parts(filter);
    let records = self.records.lock().unwrap();
    Ok(
      records
        .iter()
        .filter(|r| {
          r.properties
            .get(&property)
            .map(|v| comparable(v) == equals)
            .unwrap_or(false)
        })
        .map(|r| RecordRef { id: r.id.clone() })
        .collect(),
    )
  }

  async fn create_record(
    &self,
    _database_id: &str,
    properties: &Properties,
  ) -> Result<RecordRef, NotionError> {
    if let Some(needle) = &self.fail_create_on {
      let hit = properties.values().any(|v| comparable(v) == json!(needle));
      if hit {
        return Err(NotionError::Api {
          status: 500,
          message: "simulated write failure".to_string(),
        });
      }
    }
    let id = self.fresh_id();
    self.records.lock().unwrap().push(FakeRecord {
      id: id.clone(),
      properties: properties.clone(),
    });
    Ok(RecordRef { id })
  }

  async fn update_record(
    &self,
    record_id: &str,
    properties: &Properties,
  ) -> Result<RecordRef, NotionError> {
    let mut records = self.records.lock().unwrap();
    let record = records
      .iter_mut()
      .find(|r| r.id == record_id)
      .ok_or_else(|| NotionError::Api {
        status: 404,
        message: format!("no record {record_id}"),
      })?;
    record.properties = properties.clone();
    Ok(RecordRef {
      id: record_id.to_string(),
    })
  }
}

fn product(reference: &str, name: &str, price: f64) -> DomainItem {
  DomainItem::new()
    .with("name", FieldValue::Text(name.into()))
    .with("reference_number", FieldValue::Text(reference.into()))
    .with("unit_price", FieldValue::Number(price))
}

fn synchronizer(store: FakeStore) -> Synchronizer<FakeStore> {
  Synchronizer::new(store, SchemaRegistry::default())
}

#[tokio::test]
async fn syncing_twice_updates_instead_of_duplicating() {
  let sync = synchronizer(FakeStore::new(FakeStore::product_schema()));

  let first = sync
    .sync(EntityType::Products, "db", &[product("CR-1", "Crate", 10.0)])
    .await
    .unwrap();
  let SyncOutcome::Synced { id, action } = &first[0] else {
    panic!("first sync failed: {first:?}");
  };
  assert_eq!(*action, SyncAction::Created);

  let second = sync
    .sync(EntityType::Products, "db", &[product("CR-1", "Crate", 12.0)])
    .await
    .unwrap();
  let SyncOutcome::Synced {
    id: second_id,
    action,
  } = &second[0]
  else {
    panic!("second sync failed: {second:?}");
  };

  assert_eq!(*action, SyncAction::Updated);
  assert_eq!(second_id, id);
  assert_eq!(sync.store().record_count(), 1);

  // Last write wins.
  let properties = sync.store().properties_of(id).unwrap();
  assert_eq!(properties.get("Prix"), Some(&PropertyValue::Number(12.0)));
}

#[tokio::test]
async fn item_failure_does_not_abort_the_batch() {
  let mut store = FakeStore::new(FakeStore::product_schema());
  store.fail_create_on = Some("CR-2".to_string());
  let sync = synchronizer(store);

  let items = [
    product("CR-1", "Crate small", 5.0),
    product("CR-2", "Crate medium", 7.5),
    product("CR-3", "Crate large", 9.0),
  ];
  let outcomes = sync.sync(EntityType::Products, "db", &items).await.unwrap();

  assert_eq!(outcomes.len(), 3);
  assert!(outcomes[0].is_success());
  assert!(matches!(
    &outcomes[1],
    SyncOutcome::Failed { error } if error.contains("simulated write failure")
  ));
  assert!(outcomes[2].is_success());
  assert_eq!(sync.store().record_count(), 2);
}

#[tokio::test]
async fn multiple_matches_update_the_first_in_list_order() {
  let store = FakeStore::new(FakeStore::product_schema());
  // Two pre-existing duplicates with the same natural key.
  let dup = |name: &str| {
    let mut properties = Properties::new();
    properties.insert("Nom".into(), PropertyValue::title(name));
    properties.insert("Référence".into(), PropertyValue::rich_text("CR-9"));
    properties
  };
  store.seed("dup-a", dup("Older"));
  store.seed("dup-b", dup("Newer"));
  let sync = synchronizer(store);

  let outcomes = sync
    .sync(EntityType::Products, "db", &[product("CR-9", "Merged", 1.0)])
    .await
    .unwrap();

  assert!(matches!(
    &outcomes[0],
    SyncOutcome::Synced { id, action: SyncAction::Updated } if id == "dup-a"
  ));

  // The duplicate is not reconciled: still two records, second untouched.
  assert_eq!(sync.store().record_count(), 2);
  let untouched = sync.store().properties_of("dup-b").unwrap();
  assert_eq!(untouched.get("Nom"), Some(&PropertyValue::title("Newer")));
}

#[tokio::test]
async fn schema_retrieval_failure_fails_fast() {
  let mut store = FakeStore::new(FakeStore::product_schema());
  store.fail_schema = true;
  let sync = synchronizer(store);

  let err = sync
    .sync(EntityType::Products, "db", &[product("CR-1", "Crate", 1.0)])
    .await
    .unwrap_err();

  assert!(matches!(err, SyncError::SchemaRetrieval { database_id, .. } if database_id == "db"));
  // No partial batch: nothing written.
  assert_eq!(sync.store().record_count(), 0);
}

#[tokio::test]
async fn missing_natural_key_is_a_per_item_error() {
  let sync = synchronizer(FakeStore::new(FakeStore::product_schema()));

  let keyless = DomainItem::new().with("name", FieldValue::Text("No ref".into()));
  let items = [keyless, product("CR-5", "Crate", 2.0)];
  let outcomes = sync.sync(EntityType::Products, "db", &items).await.unwrap();

  assert!(matches!(
    &outcomes[0],
    SyncOutcome::Failed { error } if error.contains("reference_number")
  ));
  assert!(outcomes[1].is_success());
}

#[tokio::test]
async fn target_schema_drift_drops_unknown_properties() {
  // Target database without the price column.
  let store = FakeStore::new(json!({
    "Nom": { "type": "title" },
    "Référence": { "type": "rich_text" },
  }));
  let sync = synchronizer(store);

  let outcomes = sync
    .sync(EntityType::Products, "db", &[product("CR-7", "Crate", 4.0)])
    .await
    .unwrap();

  let SyncOutcome::Synced { id, .. } = &outcomes[0] else {
    panic!("sync failed: {outcomes:?}");
  };
  let properties = sync.store().properties_of(id).unwrap();
  assert!(properties.contains_key("Nom"));
  assert!(!properties.contains_key("Prix"));
}
