use serde::{Deserialize, Serialize};
use serde_json::json;

/// An equality filter on one database property.
///
/// Serializes to the store's filter shape, e.g.
/// `{"property":"Email","email":{"equals":"a@b.fr"}}`; the condition key
/// is the property's kind name. Deserialization accepts the same shape, so
/// proxy callers can pass filters through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
  pub property: String,
  #[serde(flatten)]
  condition: serde_json::Value,
}

impl QueryFilter {
  /// Equality on a text-like property (`title`, `rich_text`, `email`,
  /// `phone_number`, `select` by name, `date` by start).
  pub fn equals(property: impl Into<String>, kind: &str, value: impl Into<String>) -> Self {
    Self {
      property: property.into(),
      condition: json!({ kind: { "equals": value.into() } }),
    }
  }

  /// Equality on a number property.
  pub fn number_equals(property: impl Into<String>, value: f64) -> Self {
    Self {
      property: property.into(),
      condition: json!({ "number": { "equals": value } }),
    }
  }
}
