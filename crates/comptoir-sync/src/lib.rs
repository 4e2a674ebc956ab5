//! Comptoir Sync
//!
//! The record synchronizer: pushes a batch of [`comptoir_schema::DomainItem`]s
//! of one entity type into a target remote database without creating
//! duplicates. Each item is matched against existing records by its
//! natural key (reference number, name or email, per entity) and either
//! updated or created.
//!
//! Failure semantics: a failed database schema retrieval aborts the whole
//! batch; a failed item is recorded in its slot of the result array and the
//! batch continues.
//!
//! Known limitation: find-or-create is query-then-act. Two concurrent syncs
//! of the same natural key can both observe zero matches and both create.
//! The store offers no uniqueness constraint to lean on, so the race is
//! documented rather than closed.

mod error;
mod outcome;
mod serialize;
mod store;
mod synchronizer;

pub use error::{ItemError, SyncError};
pub use outcome::{SyncAction, SyncOutcome};
pub use serialize::{build_properties, to_property};
pub use store::{RecordRef, RemoteStore};
pub use synchronizer::Synchronizer;
