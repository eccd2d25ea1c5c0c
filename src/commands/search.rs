//! `atlask search`: find pages on a site with text or CQL.
//!
//! Results go to stdout as an aligned table, or as JSON with `--json`.

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use super::exit_code_for;
use crate::cli::SearchArgs;
use crate::color::ColorScheme;
use crate::confluence::{ConfluenceApi, ConfluenceClient, SearchQuery, SearchResult, resolve_api_base};
use crate::credentials::{EnvironmentView, ProcessEnvironment, select_credentials};

const COLUMN_GAP: usize = 2;

/// Handle `atlask search`.
pub(crate) async fn handle_search_command(args: &SearchArgs, colors: &ColorScheme) {
  let query = SearchQuery {
    query: args.query.clone(),
    space: args.space.clone(),
    cql: args.cql,
    limit: args.limit,
  };

  let outcome = search_site(&args.url, &query, &ProcessEnvironment, args.timeout)
    .await
    .and_then(|results| {
      if results.is_empty() {
        eprintln!("{}", colors.dimmed("No pages matched."));
      }
      write_results(&mut io::stdout().lock(), &results, args.json)
    });

  if let Err(e) = outcome {
    eprintln!("{} {e:#}", colors.error("Error:"));
    process::exit(exit_code_for(&e));
  }
}

/// Search the site `site_url` belongs to.
///
/// # Arguments
/// * `site_url` - Any URL on the Confluence site; only its API base is used.
/// * `query` - Text or CQL plus scope and limit.
/// * `env` - Source of `ATLASSIAN_TOKEN`/`ATLASSIAN_EMAIL`.
/// * `timeout` - HTTP request timeout.
///
/// # Errors
/// Propagates [`crate::confluence::QueryError`],
/// [`crate::confluence::ResolveError`],
/// [`crate::credentials::CredentialError`] and
/// [`crate::confluence::ApiError`] unchanged.
pub async fn search_site(
  site_url: &str,
  query: &SearchQuery,
  env: &dyn EnvironmentView,
  timeout: Duration,
) -> anyhow::Result<Vec<SearchResult>> {
  // Reject an unusable query before reading credentials.
  query.to_cql()?;

  let api_base = resolve_api_base(site_url)?;
  let credentials = select_credentials(&api_base, env)?;
  info!("Searching {api_base} ({} auth)", credentials.scheme());

  let client = ConfluenceClient::new(api_base.as_str(), credentials, timeout)?;
  search_with(&client, query).await
}

/// Run `query` through `api`.
pub async fn search_with(api: &dyn ConfluenceApi, query: &SearchQuery) -> anyhow::Result<Vec<SearchResult>> {
  api.search(query).await
}

/// Write results as a table, or as a JSON array when `json` is set.
///
/// # Errors
/// Fails when `out` cannot be written.
pub fn write_results(out: &mut impl Write, results: &[SearchResult], json: bool) -> anyhow::Result<()> {
  if json {
    serde_json::to_writer_pretty(&mut *out, results).context("Failed to serialize search results")?;
    out.write_all(b"\n")?;
  } else if !results.is_empty() {
    out.write_all(render_table(results).as_bytes())?;
  }

  out.flush().context("Failed to write search results")
}

fn render_table(results: &[SearchResult]) -> String {
  let headers = ["ID", "SPACE", "TITLE", "URL"];
  let rows: Vec<[&str; 4]> = results
    .iter()
    .map(|result| {
      [
        result.id.as_str(),
        result.space_key.as_deref().unwrap_or("-"),
        result.title.as_str(),
        result.url.as_deref().unwrap_or(""),
      ]
    })
    .collect();

  let mut widths = headers.map(UnicodeWidthStr::width);
  for row in &rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      *width = (*width).max(cell.width());
    }
  }

  let mut table = String::new();
  for row in std::iter::once(&headers).chain(&rows) {
    let mut line = String::new();
    for (index, (cell, width)) in row.iter().zip(widths).enumerate() {
      line.push_str(cell);
      if index + 1 < row.len() {
        line.push_str(&" ".repeat(width - cell.width() + COLUMN_GAP));
      }
    }
    table.push_str(line.trim_end());
    table.push('\n');
  }

  table
}
