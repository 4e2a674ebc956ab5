use thiserror::Error;

/// Errors from the workflow engine client.
#[derive(Debug, Error)]
pub enum EngineError {
  #[error("workflow engine configuration error: {0}")]
  Configuration(String),

  #[error("workflow engine request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("workflow engine api error ({status}): {message}")]
  Api { status: u16, message: String },

  #[error("failed to decode workflow engine response: {0}")]
  Decode(String),
}
