use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityType;
use crate::error::SchemaError;
use crate::field::PropertyKind;

/// One logical field and where it lands remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
  /// Logical field name on the ERP side, e.g. "reference_number".
  pub logical: String,
  /// Remote property name, e.g. "Référence".
  pub property: String,
  /// Declared remote property kind.
  pub kind: PropertyKind,
}

impl FieldMapping {
  pub fn new(logical: &str, property: &str, kind: PropertyKind) -> Self {
    Self {
      logical: logical.to_string(),
      property: property.to_string(),
      kind,
    }
  }
}

/// The property schema of one entity type: its field mappings plus the
/// logical field used as the natural key for find-or-create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
  natural_key: String,
  mappings: Vec<FieldMapping>,
}

impl EntitySchema {
  /// Build a schema, rejecting a natural key without a mapping and
  /// mappings that collide on the same remote property.
  pub fn new(
    entity: EntityType,
    natural_key: &str,
    mappings: Vec<FieldMapping>,
  ) -> Result<Self, SchemaError> {
    let mut seen = HashMap::new();
    for mapping in &mappings {
      if seen.insert(mapping.property.clone(), ()).is_some() {
        return Err(SchemaError::DuplicateProperty {
          entity: entity.to_string(),
          property: mapping.property.clone(),
        });
      }
    }

    if !mappings.iter().any(|m| m.logical == natural_key) {
      return Err(SchemaError::MissingNaturalKey(natural_key.to_string()));
    }

    Ok(Self {
      natural_key: natural_key.to_string(),
      mappings,
    })
  }

  pub fn natural_key(&self) -> &str {
    &self.natural_key
  }

  /// The mapping of the natural-key field. Guaranteed by construction.
  pub fn natural_key_mapping(&self) -> &FieldMapping {
    self
      .mappings
      .iter()
      .find(|m| m.logical == self.natural_key)
      .expect("natural key mapping validated at construction")
  }

  pub fn mappings(&self) -> &[FieldMapping] {
    &self.mappings
  }
}

/// Table of entity schemas, keyed by entity type.
///
/// `SchemaRegistry::default()` carries the property layout of the original
/// deployment's databases; callers with different remote databases build
/// their own registry.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
  schemas: HashMap<EntityType, EntitySchema>,
}

impl SchemaRegistry {
  pub fn new() -> Self {
    Self {
      schemas: HashMap::new(),
    }
  }

  pub fn insert(&mut self, entity: EntityType, schema: EntitySchema) {
    self.schemas.insert(entity, schema);
  }

  pub fn schema(&self, entity: EntityType) -> Option<&EntitySchema> {
    self.schemas.get(&entity)
  }
}

impl Default for SchemaRegistry {
  fn default() -> Self {
    use PropertyKind::*;

    let mut registry = SchemaRegistry::new();

    registry.insert(
      EntityType::Products,
      EntitySchema::new(
        EntityType::Products,
        "reference_number",
        vec![
          FieldMapping::new("name", "Nom", Title),
          FieldMapping::new("reference_number", "Référence", RichText),
          FieldMapping::new("description", "Description", RichText),
          FieldMapping::new("unit_price", "Prix", Number),
        ],
      )
      .expect("products schema"),
    );

    registry.insert(
      EntityType::Projects,
      EntitySchema::new(
        EntityType::Projects,
        "name",
        vec![
          FieldMapping::new("name", "Nom", Title),
          FieldMapping::new("description", "Description", RichText),
          FieldMapping::new("status", "Status", Select),
          FieldMapping::new("created_date", "Date de création", Date),
        ],
      )
      .expect("projects schema"),
    );

    registry.insert(
      EntityType::Orders,
      EntitySchema::new(
        EntityType::Orders,
        "reference",
        vec![
          FieldMapping::new("reference", "Référence", Title),
          FieldMapping::new("customer", "Client", RichText),
          FieldMapping::new("status", "Statut", Select),
          FieldMapping::new("order_date", "Date de commande", Date),
        ],
      )
      .expect("orders schema"),
    );

    registry.insert(
      EntityType::Contacts,
      EntitySchema::new(
        EntityType::Contacts,
        "email",
        vec![
          FieldMapping::new("name", "Nom", Title),
          FieldMapping::new("email", "Email", Email),
          FieldMapping::new("phone", "Téléphone", PhoneNumber),
          FieldMapping::new("address", "Adresse", RichText),
        ],
      )
      .expect("contacts schema"),
    );

    registry
  }
}
