//! Comptoir Notion
//!
//! Thin client for a Notion-compatible structured store, speaking the raw
//! HTTPS API (bearer token, pinned API version). It covers exactly the
//! surface the synchronizer and the proxy endpoints need: database schema
//! retrieval, filtered queries, page create/update/archive, and a user
//! listing used as a credential probe.
//!
//! Property payloads are the externally-tagged [`PropertyValue`] enum, whose
//! serde output is byte-for-byte the store's wire shape.

mod client;
mod error;
mod filter;
mod page;
mod property;

pub use client::{NOTION_API_VERSION, NotionClient};
pub use error::NotionError;
pub use filter::QueryFilter;
pub use page::{DatabaseSchema, Page};
pub use property::{DateValue, Properties, PropertyValue, RichTextSpan, SelectValue, TextContent};
