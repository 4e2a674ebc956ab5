use thiserror::Error;

/// Errors from the remote store client.
#[derive(Debug, Error)]
pub enum NotionError {
  /// Client misconfiguration (empty token, bad base URL).
  #[error("notion client configuration error: {0}")]
  Configuration(String),

  /// Transport-level failure (connection, TLS, timeout).
  #[error("notion request failed: {0}")]
  Http(#[from] reqwest::Error),

  /// The store answered with a non-2xx status.
  #[error("notion api error ({status}): {message}")]
  Api { status: u16, message: String },

  /// The response body did not have the expected shape.
  #[error("failed to decode notion response: {0}")]
  Decode(String),
}
