use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// The entity types the ERP pushes to the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
  Products,
  Projects,
  Orders,
  Contacts,
}

impl EntityType {
  /// All known entity types, in registry order.
  pub const ALL: [EntityType; 4] = [
    EntityType::Products,
    EntityType::Projects,
    EntityType::Orders,
    EntityType::Contacts,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      EntityType::Products => "products",
      EntityType::Projects => "projects",
      EntityType::Orders => "orders",
      EntityType::Contacts => "contacts",
    }
  }
}

impl fmt::Display for EntityType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for EntityType {
  type Err = SchemaError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "products" => Ok(EntityType::Products),
      "projects" => Ok(EntityType::Projects),
      "orders" => Ok(EntityType::Orders),
      "contacts" => Ok(EntityType::Contacts),
      other => Err(SchemaError::UnknownEntity(other.to_string())),
    }
  }
}
