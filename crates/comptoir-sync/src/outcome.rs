use serde::Serialize;
use serde::ser::SerializeStruct;

/// Whether a synced item landed as a new record or an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
  Created,
  Updated,
}

/// The outcome of one item in a sync batch.
///
/// The result array carries one entry per input item, in input order; the
/// caller reduces it. Serializes to the proxy wire shape
/// `{"success":true,"id":…,"action":…}` / `{"success":false,"error":…}`.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
  Synced { id: String, action: SyncAction },
  Failed { error: String },
}

impl SyncOutcome {
  pub fn is_success(&self) -> bool {
    matches!(self, SyncOutcome::Synced { .. })
  }
}

impl Serialize for SyncOutcome {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      SyncOutcome::Synced { id, action } => {
        let mut s = serializer.serialize_struct("SyncOutcome", 3)?;
        s.serialize_field("success", &true)?;
        s.serialize_field("id", id)?;
        s.serialize_field("action", action)?;
        s.end()
      }
      SyncOutcome::Failed { error } => {
        let mut s = serializer.serialize_struct("SyncOutcome", 2)?;
        s.serialize_field("success", &false)?;
        s.serialize_field("error", error)?;
        s.end()
      }
    }
  }
}
