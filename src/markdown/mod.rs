//! Markdown conversion for Confluence's rendered page HTML.
//!
//! The `export_view` body is parsed with `scraper` (html5ever), so the
//! usual browser recovery rules apply: unquoted and boolean attributes,
//! implicitly closed `<p>`/`<li>`, raw `<script>` bodies and full documents
//! with a DOCTYPE are all accepted, and entities are decoded by the parser.
//!
//! # Architecture
//!
//! - [`tables`] - HTML table to Markdown table conversion
//! - [`elements`] - Element converters
//! - [`utils`] - Element helpers and output cleanup
//!
//! # Example
//!
//! ```
//! use atlask::markdown::html_to_markdown;
//!
//! let html = r#"<h1>Title</h1><p><strong>Bold&nbsp;text</strong><br></p>"#;
//! let markdown = html_to_markdown(html);
//! assert!(markdown.contains("# Title"));
//! assert!(markdown.contains("**Bold text**"));
//! ```

use std::time::Instant;

use scraper::Html;
use tracing::{debug, trace};

mod elements;
mod tables;
mod utils;

pub use elements::convert_element_to_markdown;

/// Convert Confluence `export_view` HTML to Markdown.
///
/// # Arguments
/// * `html` - Rendered page body as returned by the REST API.
///
/// # Returns
/// Markdown with ATX headings, ending in a single newline. Malformed markup
/// is recovered the way a browser would, so conversion cannot fail.
pub fn html_to_markdown(html: &str) -> String {
  trace!(
    "Page HTML (first 500 chars):\n{}",
    html.chars().take(500).collect::<String>()
  );

  let parse_start = Instant::now();
  let document = Html::parse_document(html);

  debug!(
    "Parsed page HTML in {duration:?} (length: {length} chars)",
    duration = parse_start.elapsed(),
    length = html.len()
  );
  if !document.errors.is_empty() {
    trace!("HTML parser recovered from {} error(s)", document.errors.len());
  }

  let markdown = convert_element_to_markdown(document.root_element());
  utils::clean_markdown(&markdown)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn render(input: &str) -> String {
    html_to_markdown(input)
  }

  #[test]
  fn test_convert_headings() {
    let output = render("<h1>Title</h1><h2>Subtitle</h2>");
    assert_eq!(output, "# Title\n\n## Subtitle\n");
  }

  #[test]
  fn test_html_entities_are_resolved() {
    let output = render("<p>Wait&hellip; &amp; bar&nbsp;&mdash; 5 &lt; 6 &copy; &unknown;</p>");
    assert_eq!(output, "Wait… & bar — 5 < 6 © &unknown;\n");
  }

  #[test]
  fn test_unclosed_void_elements() {
    let output = render(r#"<p>Line 1<br>Line 2</p><hr><p><img src="a.png" alt="a"></p>"#);
    assert_eq!(output, "Line 1\nLine 2\n\n---\n\n![a](a.png)\n");
  }

  #[test]
  fn test_typical_export_view() {
    let input = r#"<h1 id="Guide-Overview">Overview</h1>
<p>This page explains <a href="https://example.atlassian.net/wiki/spaces/DOCS/pages/2">setup</a>.</p>
<ul class="inline-task-list"><li class="checked">Install</li><li>Configure</li></ul>
<div class="table-wrap"><table class="confluenceTable"><tbody>
<tr><th class="confluenceTh">Key</th><th class="confluenceTh">Value</th></tr>
<tr><td class="confluenceTd">timeout</td><td class="confluenceTd">30</td></tr>
</tbody></table></div>
<div class="code panel pdl"><div class="codeContent panelContent pdl">
<pre class="syntaxhighlighter-pre" data-syntaxhighlighter-params="brush: bash; gutter: false">atlask page -u URL</pre>
</div></div>"#;

    insta::assert_snapshot!(render(input), @r###"
    # Overview

    This page explains [setup](https://example.atlassian.net/wiki/spaces/DOCS/pages/2).

    - [x] Install
    - [ ] Configure

    | Key     | Value |
    | ------- | ----- |
    | timeout | 30    |

    ```bash
    atlask page -u URL
    ```
    "###);
  }

  #[test]
  fn test_convert_table() {
    let input = r#"
      <table>
        <tr><th>Header 1</th><th>Header 2</th></tr>
        <tr><td>Row 1 Col 1</td><td>Row 1 Col 2</td></tr>
        <tr><td>Row 2 Col 1</td><td>Row 2 Col 2</td></tr>
      </table>
    "#;
    insta::assert_snapshot!(render(input), @r###"
    | Header 1    | Header 2    |
    | ----------- | ----------- |
    | Row 1 Col 1 | Row 1 Col 2 |
    | Row 2 Col 1 | Row 2 Col 2 |
    "###);
  }

  #[test]
  fn test_unbalanced_bold_is_closed() {
    assert_eq!(render("<p><b>unbalanced</p>"), "**unbalanced**\n");
  }

  #[test]
  fn test_plain_text_passes_through() {
    assert_eq!(render("just text"), "just text\n");
  }

  #[test]
  fn test_malformed_html_is_recovered() {
    let input = r#"<!DOCTYPE html>
<html><body>
<p>Intro<p>Second
<ul><li>one<li>two</ul>
<script>if (a < b) { render(); }</script>
<table><tr><td colspan=2>x<td>y</table>
</body></html>"#;

    insta::assert_snapshot!(render(input), @r###"
    Intro

    Second

    - one
    - two

    | x   | y   |
    | --- | --- |
    "###);
  }
}
