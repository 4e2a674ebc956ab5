use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::engine::{ExecutionStatus, WorkflowEngine};
use crate::error::EngineError;
use crate::poll::poll_until;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_MAX_POLLS: u32 = 10;

/// Terminal outcome of a triggered workflow run.
///
/// `TimedOut` means the poll budget ran out before the engine reported a
/// terminal status; it carries no fabricated data or error detail and is
/// deliberately distinct from `Error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
  Success { data: Value },
  Error { detail: Value },
  #[serde(rename = "timeout")]
  TimedOut,
}

/// Triggers a workflow and waits for it to finish, bounded by a fixed
/// number of fixed-interval polls.
///
/// The defaults (1s interval, 10 polls) bound the wait at roughly ten
/// seconds, which suits the interactive admin actions this path serves.
#[derive(Debug, Clone)]
pub struct Waiter {
  interval: Duration,
  max_polls: u32,
}

impl Default for Waiter {
  fn default() -> Self {
    Self {
      interval: DEFAULT_POLL_INTERVAL,
      max_polls: DEFAULT_MAX_POLLS,
    }
  }
}

impl Waiter {
  pub fn new(interval: Duration, max_polls: u32) -> Self {
    Self {
      interval,
      max_polls,
    }
  }

  /// Trigger `workflow_id` with `input` and wait for a terminal status.
  ///
  /// A trigger failure propagates immediately; no poll happens. Poll
  /// transport failures also propagate. Otherwise the result is one of the
  /// three [`RunOutcome`] variants.
  #[instrument(name = "workflow_run", skip(self, engine, input))]
  pub async fn run_and_await<E: WorkflowEngine + ?Sized>(
    &self,
    engine: &E,
    workflow_id: &str,
    input: &Value,
  ) -> Result<RunOutcome, EngineError> {
    let execution_id = engine.execute(workflow_id, input).await?;
    info!(execution_id = %execution_id, "workflow_triggered");

    let terminal = poll_until(self.interval, self.max_polls, || {
      let execution_id = execution_id.clone();
      async move {
        let snapshot = engine.execution_status(&execution_id).await?;
        Ok::<_, EngineError>(snapshot.status.is_terminal().then_some(snapshot))
      }
    })
    .await?;

    let outcome = match terminal {
      None => {
        warn!(execution_id = %execution_id, polls = self.max_polls, "workflow_wait_timeout");
        RunOutcome::TimedOut
      }
      Some(snapshot) if snapshot.status == ExecutionStatus::Error => {
        warn!(execution_id = %execution_id, "workflow_failed");
        RunOutcome::Error {
          detail: snapshot.error.unwrap_or(Value::Null),
        }
      }
      Some(snapshot) => {
        info!(execution_id = %execution_id, "workflow_completed");
        // Output data is returned untouched; interpreting its shape is the
        // caller's business.
        RunOutcome::Success {
          data: snapshot.data.unwrap_or(Value::Null),
        }
      }
    };

    Ok(outcome)
  }
}
