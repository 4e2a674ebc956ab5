use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::{FieldValue, PropertyKind};
use crate::registry::EntitySchema;

/// One ERP record, as handed to the synchronizer.
///
/// Items are transient per sync call; field names are the *logical* names
/// (`name`, `reference_number`, …), not remote property names. The map is
/// ordered so serialized payloads are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainItem {
  fields: BTreeMap<String, FieldValue>,
}

impl DomainItem {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style insertion, used heavily in tests and fixtures.
  pub fn with(mut self, field: impl Into<String>, value: FieldValue) -> Self {
    self.fields.insert(field.into(), value);
    self
  }

  pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
    self.fields.insert(field.into(), value);
  }

  pub fn get(&self, field: &str) -> Option<&FieldValue> {
    self.fields.get(field)
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
    self.fields.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// Build an item from a loose JSON row (a workflow engine output row),
  /// typing each value according to the entity schema's declared kind.
  ///
  /// Fields the schema does not know, and null or kind-incompatible
  /// values, are dropped.
  pub fn from_row(schema: &EntitySchema, row: &serde_json::Value) -> Self {
    let mut item = DomainItem::new();
    let Some(object) = row.as_object() else {
      return item;
    };

    for mapping in schema.mappings() {
      let Some(value) = object.get(&mapping.logical) else {
        continue;
      };
      if let Some(typed) = coerce(mapping.kind, value) {
        item.set(mapping.logical.clone(), typed);
      }
    }

    item
  }
}

fn coerce(kind: PropertyKind, value: &serde_json::Value) -> Option<FieldValue> {
  match kind {
    PropertyKind::Title | PropertyKind::RichText => {
      value.as_str().map(|s| FieldValue::Text(s.to_string()))
    }
    PropertyKind::Number => value.as_f64().map(FieldValue::Number),
    PropertyKind::Select => value.as_str().map(|s| FieldValue::Select(s.to_string())),
    PropertyKind::Date => value.as_str().map(|s| FieldValue::Date(s.to_string())),
    PropertyKind::Email => value.as_str().map(|s| FieldValue::Email(s.to_string())),
    PropertyKind::PhoneNumber => value.as_str().map(|s| FieldValue::Phone(s.to_string())),
  }
}
