//! Output envelopes wrapping converted page content.

use clap::ValueEnum;

/// Supported output envelopes for exported pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
  /// `<document title="...">` element (default)
  #[default]
  Xml,
  /// Fenced Markdown block with a title heading
  #[value(alias = "md")]
  Markdown,
}

/// Wrap a page's Markdown content in the requested envelope.
///
/// # Arguments
/// * `format` - Envelope to produce.
/// * `title` - Page title.
/// * `markdown` - Converted page body.
///
/// # Returns
/// The complete document, always ending with a newline.
pub fn render_document(format: OutputFormat, title: &str, markdown: &str) -> String {
  let content = markdown.trim_end();

  match format {
    OutputFormat::Xml => format!(
      "<document title=\"{}\">\n{content}\n</document>\n",
      escape_attribute(title)
    ),
    OutputFormat::Markdown => format!("```markdown\n# Title: {title}\n\n{content}\n```\n"),
  }
}

/// Escape a value for use inside a double-quoted XML attribute.
fn escape_attribute(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for ch in value.chars() {
    match ch {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '"' => escaped.push_str("&quot;"),
      _ => escaped.push(ch),
    }
  }
  escaped
}
