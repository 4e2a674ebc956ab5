use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::NotionError;
use crate::filter::QueryFilter;
use crate::page::{DatabaseSchema, Page};
use crate::property::Properties;

/// Pinned store API version, sent on every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1/";
const QUERY_PAGE_SIZE: u32 = 100;

/// Client for the Notion-compatible store API.
///
/// Construct once at startup and share; the client holds no per-call state
/// beyond the connection pool.
#[derive(Debug, Clone)]
pub struct NotionClient {
  http: Client,
  base: Url,
  token: String,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
  #[serde(skip_serializing_if = "Option::is_none")]
  filter: Option<&'a QueryFilter>,
  page_size: u32,
}

#[derive(serde::Deserialize)]
struct QueryResponse {
  #[serde(default)]
  results: Vec<Page>,
}

#[derive(serde::Deserialize)]
struct UsersResponse {
  #[serde(default)]
  results: Vec<Value>,
}

impl NotionClient {
  pub fn new(token: impl Into<String>) -> Result<Self, NotionError> {
    let token = token.into();
    if token.is_empty() {
      return Err(NotionError::Configuration(
        "api token must not be empty".to_string(),
      ));
    }

    let http = Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .map_err(NotionError::Http)?;

    let base = Url::parse(DEFAULT_BASE_URL)
      .map_err(|e| NotionError::Configuration(format!("bad base url: {e}")))?;

    Ok(Self { http, base, token })
  }

  /// Point the client at a different API origin (proxies, test servers).
  pub fn with_base_url(mut self, base: &str) -> Result<Self, NotionError> {
    // A trailing slash is required for Url::join to keep the path prefix.
    let normalized = if base.ends_with('/') {
      base.to_string()
    } else {
      format!("{base}/")
    };
    self.base = Url::parse(&normalized)
      .map_err(|e| NotionError::Configuration(format!("bad base url '{base}': {e}")))?;
    Ok(self)
  }

  /// Retrieve a database's declared property schema.
  pub async fn retrieve_database(&self, database_id: &str) -> Result<DatabaseSchema, NotionError> {
    let request = self.request(Method::GET, &format!("databases/{database_id}"))?;
    self.send(request).await
  }

  /// Query a database, optionally filtered. Returns at most one page of
  /// results (100 records), which is all the synchronizer ever needs.
  pub async fn query_database(
    &self,
    database_id: &str,
    filter: Option<&QueryFilter>,
  ) -> Result<Vec<Page>, NotionError> {
    let body = QueryRequest {
      filter,
      page_size: QUERY_PAGE_SIZE,
    };
    let request = self
      .request(Method::POST, &format!("databases/{database_id}/query"))?
      .json(&body);
    let response: QueryResponse = self.send(request).await?;
    Ok(response.results)
  }

  /// Create a page under a database.
  #[instrument(name = "notion_create_page", skip(self, properties))]
  pub async fn create_page(
    &self,
    database_id: &str,
    properties: &Properties,
  ) -> Result<Page, NotionError> {
    let body = serde_json::json!({
      "parent": { "database_id": database_id },
      "properties": properties,
    });
    let request = self.request(Method::POST, "pages")?.json(&body);
    self.send(request).await
  }

  /// Update an existing page's properties (last write wins).
  #[instrument(name = "notion_update_page", skip(self, properties))]
  pub async fn update_page(
    &self,
    page_id: &str,
    properties: &Properties,
  ) -> Result<Page, NotionError> {
    let body = serde_json::json!({ "properties": properties });
    let request = self
      .request(Method::PATCH, &format!("pages/{page_id}"))?
      .json(&body);
    self.send(request).await
  }

  /// Archive a page. The store has no delete; archival is the explicit
  /// removal operation and is never invoked by the synchronizer.
  #[instrument(name = "notion_archive_page", skip(self))]
  pub async fn archive_page(&self, page_id: &str) -> Result<Page, NotionError> {
    let body = serde_json::json!({ "archived": true });
    let request = self
      .request(Method::PATCH, &format!("pages/{page_id}"))?
      .json(&body);
    self.send(request).await
  }

  /// Probe the credential by listing users; returns the user count.
  pub async fn list_users(&self) -> Result<usize, NotionError> {
    let request = self.request(Method::GET, "users")?;
    let response: UsersResponse = self.send(request).await?;
    Ok(response.results.len())
  }

  fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, NotionError> {
    let url = self
      .base
      .join(path)
      .map_err(|e| NotionError::Configuration(format!("bad request path '{path}': {e}")))?;

    debug!(method = %method, url = %url, "notion_request");

    Ok(
      self
        .http
        .request(method, url)
        .bearer_auth(&self.token)
        .header("Notion-Version", NOTION_API_VERSION),
    )
  }

  async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, NotionError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      // Error bodies carry a "message" field; fall back to the raw body.
      let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(body);
      return Err(NotionError::Api {
        status: status.as_u16(),
        message,
      });
    }

    serde_json::from_str(&body).map_err(|e| NotionError::Decode(e.to_string()))
  }
}
