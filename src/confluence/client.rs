//! HTTP client implementation for talking to the Confluence REST API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::api::ConfluenceApi;
use super::error::ApiError;
use super::models::{Page, UserInfo};
use super::search::{SearchQuery, SearchResponse, SearchResult, site_base};
use crate::credentials::Credentials;

/// `expand` value requesting everything needed to render a page.
pub const PAGE_EXPAND: &str = "title,version,body.export_view";

/// Confluence API client bound to one REST API base.
#[derive(Clone)]
pub struct ConfluenceClient {
  api_base: String,
  credentials: Credentials,
  client: reqwest::Client,
}

impl ConfluenceClient {
  /// Create a new Confluence client.
  ///
  /// # Arguments
  /// * `api_base` - REST prefix such as `https://example.atlassian.net/wiki/rest/api`.
  /// * `credentials` - Selected authentication for every request.
  /// * `timeout` - Total timeout applied to each request.
  ///
  /// # Errors
  /// Returns an error if the underlying `reqwest::Client` cannot be built.
  pub fn new(api_base: impl Into<String>, credentials: Credentials, timeout: Duration) -> Result<Self> {
    let api_base = api_base.into().trim_end_matches('/').to_string();

    let client = reqwest::Client::builder()
      .timeout(timeout)
      .user_agent(format!("atlask/{} ({})", env!("CARGO_PKG_VERSION"), env!("TARGET")))
      .build()
      .context("Failed to create HTTP client")?;

    Ok(Self {
      api_base,
      credentials,
      client,
    })
  }

  /// REST prefix every request is built from.
  pub fn api_base(&self) -> &str {
    &self.api_base
  }

  async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
    debug!("GET {url} ({} auth)", self.credentials.scheme());

    let response = self
      .client
      .get(url)
      .query(query)
      .header(AUTHORIZATION, self.credentials.authorization_header())
      .header(ACCEPT, "application/json")
      .header(CONTENT_TYPE, "application/json")
      .send()
      .await
      .map_err(ApiError::from)?;

    let status = response.status();
    if !status.is_success() {
      let body = response
        .text()
        .await
        .unwrap_or_else(|_| String::from("(no error details)"));
      trace!("Error response body: {body}");
      return Err(ApiError::from_response(status, &body).into());
    }

    let bytes = response.bytes().await.map_err(ApiError::from)?;
    trace!("Response body: {} bytes", bytes.len());
    serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse Confluence API response from {url}"))
  }
}

#[async_trait]
impl ConfluenceApi for ConfluenceClient {
  async fn get_page(&self, page_id: &str) -> Result<Page> {
    let url = format!("{}/content/{}", self.api_base, page_id);
    let page: Page = self.get_json(&url, &[("expand", PAGE_EXPAND)]).await?;

    if let Some(version) = &page.version {
      debug!("Fetched '{}' (version {})", page.title, version.number);
    }

    Ok(page)
  }

  async fn current_user(&self) -> Result<UserInfo> {
    let url = format!("{}/user/current", self.api_base);
    self.get_json(&url, &[]).await
  }

  async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
    let cql = query.to_cql()?;
    let limit = query.limit.to_string();
    debug!("Searching with CQL: {cql}");

    let url = format!("{}/search", self.api_base);
    let response: SearchResponse = self.get_json(&url, &[("cql", cql.as_str()), ("limit", limit.as_str())]).await?;

    let results = response.into_results(site_base(&self.api_base));
    debug!("Search returned {} page(s)", results.len());
    Ok(results)
  }
}
