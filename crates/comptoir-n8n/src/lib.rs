//! Comptoir n8n
//!
//! Client for an n8n-compatible workflow engine plus the completion
//! waiter: trigger a workflow execution, then poll its status at a fixed
//! interval until it reaches a terminal state or the attempt budget runs
//! out. Timeout is its own outcome, distinct from a workflow error.
//!
//! The polling loop itself is the standalone [`poll::poll_until`] utility
//! so it can be exercised against a paused clock.

mod client;
mod engine;
mod error;
pub mod poll;
mod waiter;

pub use client::N8nClient;
pub use engine::{ExecutionSnapshot, ExecutionStatus, WorkflowEngine};
pub use error::EngineError;
pub use waiter::{RunOutcome, Waiter};
