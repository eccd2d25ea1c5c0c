//! Trait definitions for interacting with Confluence.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Page, UserInfo};
use super::search::{SearchQuery, SearchResult};

/// Confluence API operations needed to export a page (enables testing with
/// fake implementations).
#[async_trait]
pub trait ConfluenceApi: Send + Sync {
  /// Fetch a page with its title, version, and `export_view` body.
  ///
  /// # Arguments
  /// * `page_id` - Numeric Confluence identifier of the page.
  ///
  /// # Errors
  /// Failures carry an [`ApiError`](super::ApiError) so callers can tell
  /// rejected requests from network trouble.
  async fn get_page(&self, page_id: &str) -> Result<Page>;

  /// Return the user the configured credentials authenticate as.
  async fn current_user(&self) -> Result<UserInfo>;

  /// Find pages matching `query`, at most `query.limit` of them.
  ///
  /// # Errors
  /// A [`QueryError`](super::QueryError) for an unusable query, otherwise
  /// the same failures as [`ConfluenceApi::get_page`].
  async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>>;
}
