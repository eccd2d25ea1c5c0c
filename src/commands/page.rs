//! `atlask page`: fetch pages and print them in the requested envelope.
//!
//! Documents go to stdout one after another; diagnostics go to stderr. The
//! first failing URL stops the batch, leaving earlier documents printed.

use std::io::{self, BufRead, IsTerminal, Write};
use std::process;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info, warn};

use super::exit_code_for;
use crate::cli::{EXIT_INVALID_INPUT, PageArgs};
use crate::color::ColorScheme;
use crate::confluence::{ConfluenceApi, ConfluenceClient, resolve_page_url};
use crate::credentials::{EnvironmentView, ProcessEnvironment, select_credentials};
use crate::format::{OutputFormat, render_document};
use crate::markdown::html_to_markdown;

/// Usage error printed when neither flags nor stdin supplied a URL.
pub const NO_URLS_MESSAGE: &str = "Provide at least one -u/--url or pipe URLs via STDIN.";

/// Handle `atlask page`.
///
/// Exits the process with a non-zero code on the first failure.
pub(crate) async fn handle_page_command(args: &PageArgs, colors: &ColorScheme) {
  let stdin = io::stdin();
  let piped = (!stdin.is_terminal()).then(|| stdin.lock());

  let urls = match collect_page_urls(&args.urls, piped) {
    Ok(urls) => urls,
    Err(e) => fail(colors, &e),
  };

  if urls.is_empty() {
    eprintln!("{} {}", colors.error("Error:"), NO_URLS_MESSAGE);
    process::exit(EXIT_INVALID_INPUT);
  }

  info!("Fetching {} page(s) as {:?}", urls.len(), args.format);

  let mut stdout = io::stdout().lock();
  if let Err(e) = export_pages(&urls, &ProcessEnvironment, args.format, args.timeout, &mut stdout).await {
    fail(colors, &e);
  }
}

fn fail(colors: &ColorScheme, err: &anyhow::Error) -> ! {
  eprintln!("{} {err:#}", colors.error("Error:"));
  process::exit(exit_code_for(err));
}

/// Gather page URLs from `--url` flags followed by piped input.
///
/// Piped lines are trimmed; blank lines and lines starting with `#` are
/// skipped.
///
/// # Arguments
/// * `flag_urls` - Values of every `-u/--url` flag, in order.
/// * `stdin` - Piped input, or `None` when stdin is a terminal.
///
/// # Errors
/// Returns an error when reading the piped input fails.
pub fn collect_page_urls<R: BufRead>(flag_urls: &[String], stdin: Option<R>) -> anyhow::Result<Vec<String>> {
  let mut urls = flag_urls.to_vec();

  if let Some(reader) = stdin {
    for line in reader.lines() {
      let line = line.context("Failed to read URLs from stdin")?;
      let trimmed = line.trim();
      if trimmed.is_empty() || trimmed.starts_with('#') {
        continue;
      }
      urls.push(trimmed.to_string());
    }
  }

  debug!("Collected {} page URL(s)", urls.len());
  Ok(urls)
}

/// Export every URL in order, writing each document to `out` as soon as it
/// is rendered.
///
/// The first failure stops the batch: documents already written stay in
/// `out` and later URLs are never requested.
///
/// # Errors
/// Returns the first URL's error unchanged (see [`export_page`]), or a write
/// failure.
pub async fn export_pages(
  urls: &[String],
  env: &dyn EnvironmentView,
  format: OutputFormat,
  timeout: Duration,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  for (index, page_url) in urls.iter().enumerate() {
    let document = export_page(page_url, env, format, timeout).await?;
    write_document(out, &document)?;
    debug!("Wrote document {} of {}", index + 1, urls.len());
  }

  Ok(())
}

/// Resolve, authenticate, fetch, and render one page URL.
///
/// # Arguments
/// * `page_url` - Confluence page link as supplied by the user.
/// * `env` - Source of `ATLASSIAN_TOKEN`/`ATLASSIAN_EMAIL`.
/// * `format` - Output envelope.
/// * `timeout` - HTTP request timeout.
///
/// # Errors
/// Propagates [`crate::confluence::ResolveError`],
/// [`crate::credentials::CredentialError`], and
/// [`crate::confluence::ApiError`] unchanged so callers can classify them.
pub async fn export_page(
  page_url: &str,
  env: &dyn EnvironmentView,
  format: OutputFormat,
  timeout: Duration,
) -> anyhow::Result<String> {
  let reference = resolve_page_url(page_url)?;
  let credentials = select_credentials(&reference.api_base, env)?;
  info!(
    "Fetching page {} from {} ({} auth)",
    reference.page_id,
    reference.api_base,
    credentials.scheme()
  );

  let client = ConfluenceClient::new(reference.api_base.as_str(), credentials, timeout)?;
  render_page(&client, &reference.page_id, page_url, format).await
}

/// Fetch a page through `api` and wrap its converted content.
///
/// # Errors
/// Fails when the fetch fails or when the page body is empty.
pub async fn render_page(
  api: &dyn ConfluenceApi,
  page_id: &str,
  page_url: &str,
  format: OutputFormat,
) -> anyhow::Result<String> {
  let page = api.get_page(page_id).await?;

  let html = page.export_view_html();
  if html.trim().is_empty() {
    anyhow::bail!("Page content is empty for URL: {page_url}");
  }

  let markdown = html_to_markdown(html);

  if page.title.is_empty() {
    warn!("Page {page_id} has no title");
  }

  Ok(render_document(format, &page.title, &markdown))
}

/// Write one document, making sure it ends with a newline.
fn write_document(out: &mut impl Write, document: &str) -> anyhow::Result<()> {
  out.write_all(document.as_bytes())?;
  if !document.ends_with('\n') {
    out.write_all(b"\n")?;
  }
  out.flush().context("Failed to write document")
}
