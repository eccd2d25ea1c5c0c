//! Resolution of Confluence page URLs into REST API coordinates.
//!
//! Confluence page links come in several shapes depending on the deployment
//! and on where the link was copied from:
//!
//! - query form: `https://wiki.example.com/pages/viewpage.action?pageId=123`
//! - REST-ish path form: `https://example.atlassian.net/wiki/pages/123`
//! - display form: `https://example.atlassian.net/wiki/spaces/DOCS/pages/123/Page+Title`
//!
//! [`resolve_page_url`] accepts any of them and produces a [`PageReference`]
//! holding the REST API base and the numeric page identifier.

use std::fmt;

use tracing::{debug, trace};
use url::Url;

/// Location of a single Confluence page in the REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReference {
  /// REST prefix such as `https://example.atlassian.net/wiki/rest/api`.
  pub api_base: String,
  /// Numeric identifier of the page.
  pub page_id: String,
}

impl PageReference {
  /// Endpoint returning the page with its rendered `export_view` body.
  pub fn content_url(&self) -> String {
    format!("{}/content/{}", self.api_base, self.page_id)
  }
}

/// Errors produced while resolving a page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
  /// The input has no scheme or no host.
  MalformedUrl(String),
  /// None of the page-id rules matched.
  UnresolvablePageId(String),
}

impl fmt::Display for ResolveError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MalformedUrl(url) => write!(f, "Invalid URL: {url}"),
      Self::UnresolvablePageId(_) => write!(f, "Could not determine Confluence page ID from URL."),
    }
  }
}

impl std::error::Error for ResolveError {}

/// A single page-id extraction rule. Rules see the parsed URL and its
/// non-empty path segments and either claim the URL or pass.
type PageIdRule = fn(&Url, &[&str]) -> Option<String>;

/// Page-id rules in priority order; the first rule returning a value wins.
const PAGE_ID_RULES: [(&str, PageIdRule); 3] = [
  ("pageId query parameter", page_id_from_query),
  ("pages path segment", page_id_after_pages_segment),
  ("last numeric segment", last_numeric_segment),
];

/// Resolve a Confluence page URL into its REST API base and page ID.
///
/// # Arguments
/// * `page_url` - User-supplied page link in any of the supported shapes.
///
/// # Returns
/// The [`PageReference`] for the page.
///
/// # Errors
/// [`ResolveError::MalformedUrl`] when the input lacks a scheme or host, and
/// [`ResolveError::UnresolvablePageId`] when no rule finds a page ID.
pub fn resolve_page_url(page_url: &str) -> Result<PageReference, ResolveError> {
  let parsed = parse_with_host(page_url)?;
  let api_base = api_base_for(&parsed);
  let segments = path_segments(&parsed);

  for (rule_name, rule) in PAGE_ID_RULES {
    if let Some(page_id) = rule(&parsed, &segments) {
      debug!("Resolved page {page_id} via {rule_name} (API base {api_base})");
      return Ok(PageReference { api_base, page_id });
    }
    trace!("Rule '{rule_name}' did not match {page_url}");
  }

  Err(ResolveError::UnresolvablePageId(page_url.to_string()))
}

/// Derive only the REST API base for a Confluence URL.
///
/// Useful when the URL does not point at a specific page, such as the site
/// root passed to `auth` subcommands.
///
/// # Errors
/// Returns [`ResolveError::MalformedUrl`] when the input lacks a scheme or
/// host.
pub fn resolve_api_base(url: &str) -> Result<String, ResolveError> {
  parse_with_host(url).map(|parsed| api_base_for(&parsed))
}

fn parse_with_host(input: &str) -> Result<Url, ResolveError> {
  let malformed = || ResolveError::MalformedUrl(input.to_string());
  let parsed = Url::parse(input.trim()).map_err(|_| malformed())?;

  match parsed.host_str() {
    Some(host) if !host.is_empty() => Ok(parsed),
    _ => Err(malformed()),
  }
}

fn api_base_for(url: &Url) -> String {
  let path = url.path();
  let prefix = if path.starts_with("/wiki/") || path == "/wiki" {
    "/wiki"
  } else {
    ""
  };

  // host_str is checked by parse_with_host
  let host = url.host_str().unwrap_or_default();
  let authority = match url.port() {
    Some(port) => format!("{host}:{port}"),
    None => host.to_string(),
  };

  format!("{}://{authority}{prefix}/rest/api", url.scheme())
}

fn path_segments(url: &Url) -> Vec<&str> {
  url.path().split('/').filter(|segment| !segment.is_empty()).collect()
}

fn is_numeric(segment: &str) -> bool {
  !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// `?pageId=<digits>`; blank values are ignored and a non-numeric first value
/// lets the path rules run instead.
fn page_id_from_query(url: &Url, _segments: &[&str]) -> Option<String> {
  url
    .query_pairs()
    .find(|(key, value)| key == "pageId" && !value.is_empty())
    .map(|(_, value)| value.into_owned())
    .filter(|value| is_numeric(value))
}

/// `.../pages/<digits>/...`, using the first `pages` segment.
fn page_id_after_pages_segment(_url: &Url, segments: &[&str]) -> Option<String> {
  let position = segments.iter().position(|&segment| segment == "pages")?;
  segments
    .get(position + 1)
    .filter(|candidate| is_numeric(candidate))
    .map(|candidate| candidate.to_string())
}

/// Fallback heuristic: the rightmost all-digit segment.
///
/// This can pick the wrong number when a URL carries other numeric
/// components (dates, numeric space keys), so it only runs after the explicit
/// rules have passed.
fn last_numeric_segment(_url: &Url, segments: &[&str]) -> Option<String> {
  segments
    .iter()
    .rev()
    .find(|segment| is_numeric(segment))
    .map(|segment| segment.to_string())
}
