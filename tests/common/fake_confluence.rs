//! Fake Confluence API client for testing
//!
//! This module provides a stub implementation of the Confluence API that
//! returns predefined responses without making any network requests.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use atlask::confluence::{ApiError, ConfluenceApi, Page, SearchQuery, SearchResult, UserInfo};

use crate::common::fixtures;

/// A fake Confluence client that returns predefined responses for testing
pub struct FakeConfluenceClient {
  pages: HashMap<String, Page>,
  auth_should_succeed: bool,
}

impl FakeConfluenceClient {
  /// Create a new fake client with no pages
  pub fn new() -> Self {
    Self {
      pages: HashMap::new(),
      auth_should_succeed: true,
    }
  }

  /// Create a fake client with default sample pages
  pub fn with_sample_pages() -> Self {
    let mut client = Self::new();

    client.add_page_from_json("123456", fixtures::sample_page_response());
    client.add_page_from_json("789012", fixtures::sample_complex_page_response());
    client.add_page_from_json("65541", fixtures::sample_server_page_response());
    client.add_page_from_json("404040", fixtures::empty_page_response());
    client.add_page_from_json("505050", fixtures::page_without_body_response());

    client
  }

  /// Add a page from a JSON value
  pub fn add_page_from_json(&mut self, page_id: &str, json: serde_json::Value) {
    let page = serde_json::from_value::<Page>(json).expect("fixture should decode as a page");
    self.pages.insert(page_id.to_string(), page);
  }

  /// Configure whether authentication should succeed
  #[allow(dead_code)]
  pub fn set_auth_success(&mut self, should_succeed: bool) {
    self.auth_should_succeed = should_succeed;
  }
}

impl Default for FakeConfluenceClient {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl ConfluenceApi for FakeConfluenceClient {
  async fn get_page(&self, page_id: &str) -> Result<Page> {
    self
      .pages
      .get(page_id)
      .cloned()
      .ok_or_else(|| anyhow!(ApiError::NotFound))
  }

  async fn current_user(&self) -> Result<UserInfo> {
    if self.auth_should_succeed {
      Ok(serde_json::from_value(fixtures::cloud_user_response())?)
    } else {
      Err(anyhow!(ApiError::Unauthorized))
    }
  }

  /// Case-insensitive title match over the stored pages, ordered by id.
  async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
    query.to_cql()?;
    let needle = query.query.trim().to_lowercase();

    let mut results: Vec<SearchResult> = self
      .pages
      .iter()
      .filter(|(_, page)| page.title.to_lowercase().contains(&needle))
      .map(|(id, page)| SearchResult {
        id: id.clone(),
        title: page.title.clone(),
        space_key: None,
        space_name: None,
        url: None,
      })
      .collect();

    results.sort_by(|a, b| a.id.cmp(&b.id));
    results.truncate(query.limit as usize);
    Ok(results)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_fake_client_empty() {
    let client = FakeConfluenceClient::new();
    assert!(client.get_page("123456").await.is_err());
  }

  #[tokio::test]
  async fn test_fake_client_with_samples() {
    let client = FakeConfluenceClient::with_sample_pages();

    let page = client.get_page("123456").await.unwrap();
    assert_eq!(page.id, "123456");
    assert_eq!(page.title, "Getting Started Guide");
    assert_eq!(page.version.map(|v| v.number), Some(3));

    assert!(client.get_page("999999").await.is_err());
  }

  #[tokio::test]
  async fn test_fake_client_search() {
    let client = FakeConfluenceClient::with_sample_pages();
    let query = SearchQuery {
      query: "guide".to_string(),
      space: None,
      cql: false,
      limit: 10,
    };

    let results = client.search(&query).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "123456");
  }

  #[tokio::test]
  async fn test_fake_client_auth() {
    let mut client = FakeConfluenceClient::new();
    let user = client.current_user().await.unwrap();
    assert_eq!(user.display_name, "Jane Doe");

    client.set_auth_success(false);
    assert!(client.current_user().await.is_err());
  }
}
