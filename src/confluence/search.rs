//! CQL construction and result shaping for `GET {api_base}/search`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default number of results requested from the search API.
pub const DEFAULT_SEARCH_LIMIT: u32 = 25;

/// What to search for and how to scope it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  /// Free text, or a raw CQL expression when `cql` is set.
  pub query: String,
  /// Optional space key restricting a text search.
  pub space: Option<String>,
  /// Pass `query` through as CQL instead of wrapping it in `text ~ "..."`.
  pub cql: bool,
  /// Maximum number of results to request.
  pub limit: u32,
}

/// Errors building a CQL expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
  /// The query is empty or whitespace.
  EmptyQuery,
  /// `--space` was combined with `--cql`; raw CQL must scope itself.
  SpaceWithCql,
}

impl fmt::Display for QueryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::EmptyQuery => write!(f, "Search query cannot be empty."),
      Self::SpaceWithCql => write!(f, "--space cannot be combined with --cql; add `space = KEY` to the CQL instead."),
    }
  }
}

impl std::error::Error for QueryError {}

/// Quote a value as a CQL string literal.
fn cql_string(value: &str) -> String {
  format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

impl SearchQuery {
  /// Build the CQL expression sent as the `cql` query parameter.
  ///
  /// Text searches become `text ~ "..."`, optionally prefixed by
  /// `space = "KEY" AND `. Raw CQL is passed through untouched.
  pub fn to_cql(&self) -> Result<String, QueryError> {
    let query = self.query.trim();
    if query.is_empty() {
      return Err(QueryError::EmptyQuery);
    }

    let space = self.space.as_deref().map(str::trim).filter(|space| !space.is_empty());

    if self.cql {
      if space.is_some() {
        return Err(QueryError::SpaceWithCql);
      }
      return Ok(query.to_string());
    }

    let clause = format!("text ~ {}", cql_string(query));
    Ok(match space {
      Some(space) => format!("space = {} AND {clause}", cql_string(space)),
      None => clause,
    })
  }
}

/// Raw payload of `GET search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
  #[serde(default)]
  pub results: Vec<SearchHit>,
  #[serde(rename = "_links", default)]
  pub links: Links,
}

/// One search hit. Space and user hits carry no `content`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
  #[serde(default)]
  pub content: Option<SearchContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchContent {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub space: Option<SpaceSummary>,
  #[serde(rename = "_links", default)]
  pub links: Links,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpaceSummary {
  #[serde(default)]
  pub key: String,
  #[serde(default)]
  pub name: String,
}

/// `_links` object; `webui` is relative to `base`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
  #[serde(default)]
  pub webui: Option<String>,
  #[serde(default)]
  pub base: Option<String>,
}

/// A page found by search, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
  pub id: String,
  pub title: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub space_key: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub space_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

/// Site root for an API base: `https://x.atlassian.net/wiki/rest/api`
/// becomes `https://x.atlassian.net/wiki`.
pub fn site_base(api_base: &str) -> &str {
  let trimmed = api_base.trim_end_matches('/');
  trimmed.strip_suffix("/rest/api").unwrap_or(trimmed)
}

/// Absolute web URL for a hit, preferring the hit's own `base`, then the
/// response's, then `fallback_base`.
fn web_url(content: &Links, response: &Links, fallback_base: &str) -> Option<String> {
  let webui = content.webui.as_deref().map(str::trim).filter(|webui| !webui.is_empty())?;
  if webui.starts_with("http://") || webui.starts_with("https://") {
    return Some(webui.to_string());
  }

  let base = content
    .base
    .as_deref()
    .or(response.base.as_deref())
    .map(str::trim)
    .filter(|base| !base.is_empty())
    .unwrap_or(fallback_base);

  Some(format!("{}{webui}", base.trim_end_matches('/')))
}

impl SearchResponse {
  /// Content hits as [`SearchResult`]s, dropping hits without a content id.
  pub fn into_results(self, fallback_base: &str) -> Vec<SearchResult> {
    let response_links = self.links;

    self
      .results
      .into_iter()
      .filter_map(|hit| hit.content)
      .filter(|content| !content.id.is_empty())
      .map(|content| {
        let url = web_url(&content.links, &response_links, fallback_base);
        let (space_key, space_name) = match content.space {
          Some(space) => (
            Some(space.key).filter(|key| !key.is_empty()),
            Some(space.name).filter(|name| !name.is_empty()),
          ),
          None => (None, None),
        };

        SearchResult {
          id: content.id,
          title: content.title,
          space_key,
          space_name,
          url,
        }
      })
      .collect()
  }
}
