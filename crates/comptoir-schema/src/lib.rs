//! Comptoir Schema
//!
//! This crate holds the static knowledge about what the ERP pushes to the
//! remote store: which entity types exist, which logical fields each entity
//! carries, how each field maps to a remote property name and kind, and
//! which field acts as the natural key used to find an existing record.
//!
//! The per-entity mapping is a registry table rather than a branch per
//! entity, so adding an entity type means adding one registry entry.

mod entity;
mod error;
mod field;
mod item;
mod registry;

pub use entity::EntityType;
pub use error::SchemaError;
pub use field::{FieldValue, PropertyKind};
pub use item::DomainItem;
pub use registry::{EntitySchema, FieldMapping, SchemaRegistry};
