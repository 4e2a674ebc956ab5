use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineError;

/// Status of a workflow execution, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
  Running,
  Success,
  Error,
  Waiting,
}

impl ExecutionStatus {
  /// A terminal status will never change again; `waiting` is not terminal.
  pub fn is_terminal(&self) -> bool {
    matches!(self, ExecutionStatus::Success | ExecutionStatus::Error)
  }
}

/// One observation of an execution: status plus whatever output or error
/// detail the engine attached.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExecutionSnapshot {
  pub status: ExecutionStatus,
  #[serde(default)]
  pub data: Option<Value>,
  #[serde(default)]
  pub error: Option<Value>,
}

/// The engine surface the waiter needs. `N8nClient` is the production
/// implementation; tests use scripted fakes.
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
  /// Trigger a workflow execution; returns the execution id.
  async fn execute(&self, workflow_id: &str, input: &Value) -> Result<String, EngineError>;

  /// Fetch the current state of an execution.
  async fn execution_status(&self, execution_id: &str) -> Result<ExecutionSnapshot, EngineError>;
}
