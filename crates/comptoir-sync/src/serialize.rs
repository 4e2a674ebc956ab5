//! Field-to-property serialization.

use comptoir_notion::{DatabaseSchema, Properties, PropertyValue};
use comptoir_schema::{EntitySchema, FieldValue, PropertyKind, SchemaError};

/// Serialize one field value into the wire shape of the mapped kind.
///
/// All string-carrying values serialize into any text-accepting kind; the
/// only hard mismatch is between numbers and text (either direction).
pub fn to_property(
  field: &str,
  value: &FieldValue,
  kind: PropertyKind,
) -> Result<PropertyValue, SchemaError> {
  let mismatch = || SchemaError::KindMismatch {
    field: field.to_string(),
    value_kind: value.kind_name(),
    kind: kind.as_str(),
  };

  match kind {
    PropertyKind::Number => match value {
      FieldValue::Number(n) => Ok(PropertyValue::Number(*n)),
      _ => Err(mismatch()),
    },
    PropertyKind::Title => value
      .as_text()
      .map(PropertyValue::title)
      .ok_or_else(mismatch),
    PropertyKind::RichText => value
      .as_text()
      .map(PropertyValue::rich_text)
      .ok_or_else(mismatch),
    PropertyKind::Select => value
      .as_text()
      .map(PropertyValue::select)
      .ok_or_else(mismatch),
    PropertyKind::Date => value.as_text().map(PropertyValue::date).ok_or_else(mismatch),
    PropertyKind::Email => value
      .as_text()
      .map(|s| PropertyValue::Email(s.to_string()))
      .ok_or_else(mismatch),
    PropertyKind::PhoneNumber => value
      .as_text()
      .map(|s| PropertyValue::PhoneNumber(s.to_string()))
      .ok_or_else(mismatch),
  }
}

/// Build the property payload for one item.
///
/// A mapping contributes only when the item carries the field AND the
/// target database declares the property; mappings absent from the target
/// schema are silently skipped, which keeps pushes working across schema
/// drift on either side.
pub fn build_properties(
  schema: &EntitySchema,
  target: &DatabaseSchema,
  item: &comptoir_schema::DomainItem,
) -> Result<Properties, SchemaError> {
  let mut properties = Properties::new();

  for mapping in schema.mappings() {
    if !target.has_property(&mapping.property) {
      continue;
    }
    let Some(value) = item.get(&mapping.logical) else {
      continue;
    };
    let property = to_property(&mapping.logical, value, mapping.kind)?;
    properties.insert(mapping.property.clone(), property);
  }

  Ok(properties)
}
