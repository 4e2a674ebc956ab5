use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
  #[error("unknown entity type: {0}")]
  UnknownEntity(String),

  #[error("field '{field}' holds a {value_kind} value but maps to a {kind} property")]
  KindMismatch {
    field: String,
    value_kind: &'static str,
    kind: &'static str,
  },

  #[error("item is missing its natural key field '{0}'")]
  MissingNaturalKey(String),

  #[error("duplicate remote property '{property}' in schema for {entity}")]
  DuplicateProperty { entity: String, property: String },
}
