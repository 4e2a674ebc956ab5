use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A page property payload, keyed by remote property name.
///
/// Ordered map so request bodies are deterministic.
pub type Properties = BTreeMap<String, PropertyValue>;

/// One typed property value in the store's wire shape.
///
/// The enum is externally tagged with the store's property type names, so
/// serializing yields exactly `{"title":[…]}`, `{"number":12.5}`,
/// `{"select":{"name":"…"}}` and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
  Title(Vec<RichTextSpan>),
  RichText(Vec<RichTextSpan>),
  Number(f64),
  Select(SelectValue),
  Date(DateValue),
  Email(String),
  PhoneNumber(String),
}

impl PropertyValue {
  /// A title property holding a single text span.
  pub fn title(content: impl Into<String>) -> Self {
    PropertyValue::Title(vec![RichTextSpan::new(content)])
  }

  /// A rich-text property holding a single text span.
  pub fn rich_text(content: impl Into<String>) -> Self {
    PropertyValue::RichText(vec![RichTextSpan::new(content)])
  }

  pub fn select(name: impl Into<String>) -> Self {
    PropertyValue::Select(SelectValue { name: name.into() })
  }

  pub fn date(start: impl Into<String>) -> Self {
    PropertyValue::Date(DateValue {
      start: start.into(),
    })
  }
}

/// One span of rich text. Only the writable `text.content` part is carried;
/// the store fills in annotations and plain text on its side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextSpan {
  pub text: TextContent,
}

impl RichTextSpan {
  pub fn new(content: impl Into<String>) -> Self {
    Self {
      text: TextContent {
        content: content.into(),
      },
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
  pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectValue {
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
  pub start: String,
}
