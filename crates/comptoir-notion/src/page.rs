use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// A remote record: an opaque id plus its raw property map.
///
/// Properties are kept as loose JSON (store responses carry ids, types and
/// annotations we never write); the typed accessors below reproduce the
/// readback rules for each property kind, joining multi-span rich text and
/// tolerating absent or null properties.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
  pub id: String,
  #[serde(default)]
  pub archived: bool,
  #[serde(default)]
  pub properties: Value,
}

impl Page {
  fn property(&self, name: &str) -> Option<&Value> {
    self.properties.get(name)
  }

  /// Joined plain text of a `title` or `rich_text` property.
  pub fn plain_text(&self, name: &str) -> Option<String> {
    let prop = self.property(name)?;
    let spans = prop.get("title").or_else(|| prop.get("rich_text"))?;
    let joined: String = spans
      .as_array()?
      .iter()
      .filter_map(|span| span.get("plain_text").and_then(Value::as_str))
      .collect();
    Some(joined)
  }

  pub fn number(&self, name: &str) -> Option<f64> {
    self.property(name)?.get("number")?.as_f64()
  }

  pub fn select_name(&self, name: &str) -> Option<String> {
    self
      .property(name)?
      .get("select")?
      .get("name")?
      .as_str()
      .map(str::to_string)
  }

  pub fn date_start(&self, name: &str) -> Option<String> {
    self
      .property(name)?
      .get("date")?
      .get("start")?
      .as_str()
      .map(str::to_string)
  }

  pub fn email(&self, name: &str) -> Option<String> {
    self
      .property(name)?
      .get("email")?
      .as_str()
      .map(str::to_string)
  }

  pub fn phone(&self, name: &str) -> Option<String> {
    self
      .property(name)?
      .get("phone_number")?
      .as_str()
      .map(str::to_string)
  }
}

/// The declared property schema of a database, as returned by retrieve.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSchema {
  #[serde(default)]
  title: Vec<Value>,
  #[serde(default)]
  properties: HashMap<String, PropertyDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
struct PropertyDescriptor {
  #[serde(rename = "type")]
  kind: String,
}

impl DatabaseSchema {
  /// Whether the database declares a property with this name.
  pub fn has_property(&self, name: &str) -> bool {
    self.properties.contains_key(name)
  }

  /// The declared kind string of a property, if present.
  pub fn kind_of(&self, name: &str) -> Option<&str> {
    self.properties.get(name).map(|d| d.kind.as_str())
  }

  pub fn property_names(&self) -> impl Iterator<Item = &str> {
    self.properties.keys().map(String::as_str)
  }

  /// Human-readable database name from the title spans, if any.
  pub fn name(&self) -> Option<String> {
    let first = self.title.first()?;
    first
      .get("plain_text")
      .and_then(Value::as_str)
      .map(str::to_string)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn page(properties: Value) -> Page {
    serde_json::from_value(json!({ "id": "page-1", "properties": properties })).unwrap()
  }

  #[test]
  fn plain_text_joins_spans() {
    let page = page(json!({
      "Nom": { "title": [
        { "plain_text": "Crate " },
        { "plain_text": "40x60" },
      ]},
      "Description": { "rich_text": [{ "plain_text": "palette" }] },
    }));
    assert_eq!(page.plain_text("Nom").as_deref(), Some("Crate 40x60"));
    assert_eq!(page.plain_text("Description").as_deref(), Some("palette"));
  }

  #[test]
  fn accessors_tolerate_missing_and_null_properties() {
    let page = page(json!({
      "Status": { "select": null },
      "Prix": { "number": null },
    }));
    assert_eq!(page.plain_text("Nom"), None);
    assert_eq!(page.select_name("Status"), None);
    assert_eq!(page.number("Prix"), None);
    assert_eq!(page.date_start("Date de commande"), None);
  }

  #[test]
  fn typed_accessors_read_wire_values() {
    let page = page(json!({
      "Prix": { "number": 12.5 },
      "Statut": { "select": { "name": "pending" } },
      "Date de commande": { "date": { "start": "2025-03-01" } },
      "Email": { "email": "a@b.fr" },
      "Téléphone": { "phone_number": "+33 1 00" },
    }));
    assert_eq!(page.number("Prix"), Some(12.5));
    assert_eq!(page.select_name("Statut").as_deref(), Some("pending"));
    assert_eq!(
      page.date_start("Date de commande").as_deref(),
      Some("2025-03-01")
    );
    assert_eq!(page.email("Email").as_deref(), Some("a@b.fr"));
    assert_eq!(page.phone("Téléphone").as_deref(), Some("+33 1 00"));
  }

  #[test]
  fn database_schema_exposes_declared_properties() {
    let schema: DatabaseSchema = serde_json::from_value(json!({
      "title": [{ "plain_text": "Produits" }],
      "properties": {
        "Nom": { "id": "a", "type": "title" },
        "Prix": { "id": "b", "type": "number" },
      }
    }))
    .unwrap();

    assert!(schema.has_property("Nom"));
    assert!(!schema.has_property("Référence"));
    assert_eq!(schema.kind_of("Prix"), Some("number"));
    assert_eq!(schema.name().as_deref(), Some("Produits"));
  }
}
