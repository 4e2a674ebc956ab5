use serde::{Deserialize, Serialize};

/// A value carried by one logical field of a [`crate::DomainItem`].
///
/// Dates are ISO-8601 date strings (the remote store only consumes the
/// `start` component, so no calendar arithmetic happens on this side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
  Text(String),
  Number(f64),
  Select(String),
  Date(String),
  Email(String),
  Phone(String),
}

impl FieldValue {
  /// Short name used in kind-mismatch diagnostics.
  pub fn kind_name(&self) -> &'static str {
    match self {
      FieldValue::Text(_) => "text",
      FieldValue::Number(_) => "number",
      FieldValue::Select(_) => "select",
      FieldValue::Date(_) => "date",
      FieldValue::Email(_) => "email",
      FieldValue::Phone(_) => "phone",
    }
  }

  /// The textual content of the value, if it has one.
  pub fn as_text(&self) -> Option<&str> {
    match self {
      FieldValue::Text(s)
      | FieldValue::Select(s)
      | FieldValue::Date(s)
      | FieldValue::Email(s)
      | FieldValue::Phone(s) => Some(s),
      FieldValue::Number(_) => None,
    }
  }
}

/// The declared kind of a remote property.
///
/// Serde names match the remote store's property type strings so the
/// variants round-trip through database schema payloads unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
  Title,
  RichText,
  Number,
  Select,
  Date,
  Email,
  PhoneNumber,
}

impl PropertyKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      PropertyKind::Title => "title",
      PropertyKind::RichText => "rich_text",
      PropertyKind::Number => "number",
      PropertyKind::Select => "select",
      PropertyKind::Date => "date",
      PropertyKind::Email => "email",
      PropertyKind::PhoneNumber => "phone_number",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn property_kind_serde_matches_wire_names() {
    assert_eq!(
      serde_json::to_string(&PropertyKind::RichText).unwrap(),
      "\"rich_text\""
    );
    assert_eq!(
      serde_json::to_string(&PropertyKind::PhoneNumber).unwrap(),
      "\"phone_number\""
    );
    let kind: PropertyKind = serde_json::from_str("\"title\"").unwrap();
    assert_eq!(kind, PropertyKind::Title);
  }

  #[test]
  fn as_text_covers_string_variants() {
    assert_eq!(FieldValue::Text("a".into()).as_text(), Some("a"));
    assert_eq!(FieldValue::Email("x@y.z".into()).as_text(), Some("x@y.z"));
    assert_eq!(FieldValue::Number(3.0).as_text(), None);
  }
}
