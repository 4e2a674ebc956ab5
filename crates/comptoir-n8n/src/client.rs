use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::engine::{ExecutionSnapshot, WorkflowEngine};
use crate::error::EngineError;

const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Client for the n8n-compatible workflow API.
#[derive(Debug, Clone)]
pub struct N8nClient {
  http: Client,
  base: Url,
  api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteResponse {
  execution_id: Option<String>,
  data: Option<ExecuteResponseData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteResponseData {
  execution_id: Option<String>,
}

impl N8nClient {
  /// `base` is the API root, e.g. `http://localhost:5678/api`.
  pub fn new(base: &str, api_key: Option<String>) -> Result<Self, EngineError> {
    let normalized = if base.ends_with('/') {
      base.to_string()
    } else {
      format!("{base}/")
    };
    let base = Url::parse(&normalized)
      .map_err(|e| EngineError::Configuration(format!("bad engine url '{base}': {e}")))?;

    let http = Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .map_err(EngineError::Http)?;

    Ok(Self {
      http,
      base,
      api_key,
    })
  }

  fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, EngineError> {
    let url = self
      .base
      .join(path)
      .map_err(|e| EngineError::Configuration(format!("bad request path '{path}': {e}")))?;

    debug!(method = %method, url = %url, "n8n_request");

    let mut request = self.http.request(method, url);
    if let Some(key) = &self.api_key {
      request = request.header(API_KEY_HEADER, key);
    }
    Ok(request)
  }

  async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, EngineError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(body);
      return Err(EngineError::Api {
        status: status.as_u16(),
        message,
      });
    }

    serde_json::from_str(&body).map_err(|e| EngineError::Decode(e.to_string()))
  }
}

#[async_trait]
impl WorkflowEngine for N8nClient {
  async fn execute(&self, workflow_id: &str, input: &Value) -> Result<String, EngineError> {
    let body = serde_json::json!({ "data": input });
    let request = self
      .request(Method::POST, &format!("workflows/{workflow_id}/execute"))?
      .json(&body);
    let response: ExecuteResponse = self.send(request).await?;

    // Engines differ on whether the id is top-level or nested under data.
    response
      .execution_id
      .or(response.data.and_then(|d| d.execution_id))
      .ok_or_else(|| EngineError::Decode("execute response carries no executionId".to_string()))
  }

  async fn execution_status(&self, execution_id: &str) -> Result<ExecutionSnapshot, EngineError> {
    let request = self.request(Method::GET, &format!("executions/{execution_id}"))?;
    self.send(request).await
  }
}
