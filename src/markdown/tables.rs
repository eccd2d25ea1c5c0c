//! HTML table to Markdown table conversion.

use scraper::ElementRef;
use unicode_width::UnicodeWidthStr;

use super::utils::{child_elements, get_element_text, tag_name};

/// Convert an HTML table element into Markdown table syntax.
///
/// Handles tables with `thead`, `tbody`, `tfoot` sections, or direct `tr`
/// children (the parser normally inserts `tbody`). Confluence wraps rendered tables in `div.table-wrap`, which the
/// caller passes through untouched.
///
/// # Returns
/// A Markdown fragment containing the formatted table, or an empty string
/// when the table has no cells.
pub fn convert_table_to_markdown(element: ElementRef) -> String {
  let mut tr_elements = Vec::new();

  for child in child_elements(element) {
    match tag_name(child) {
      "tr" => tr_elements.push(child),
      "tbody" | "thead" | "tfoot" => {
        tr_elements.extend(child_elements(child).filter(|row| tag_name(*row) == "tr"));
      }
      _ => {}
    }
  }

  let rows: Vec<Vec<String>> = tr_elements
    .into_iter()
    .map(|tr| {
      child_elements(tr)
        .filter(|cell| matches!(tag_name(*cell), "th" | "td"))
        .map(cell_text)
        .collect::<Vec<_>>()
    })
    .filter(|cells| !cells.is_empty())
    .collect();

  render_markdown_table(rows).unwrap_or_default()
}

/// Flatten a cell to one line; pipes are escaped so they don't split columns.
fn cell_text(cell: ElementRef) -> String {
  get_element_text(cell)
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
    .replace('|', "\\|")
}

/// Pretty-print a Markdown table with aligned columns. The first row is the
/// header. Column widths are measured in terminal cells so wide characters
/// stay aligned.
///
/// # Returns
/// `Some(String)` surrounded by newlines, or `None` when there are no cells.
pub fn render_markdown_table(mut rows: Vec<Vec<String>>) -> Option<String> {
  let column_count = rows.iter().map(Vec::len).max()?;
  if column_count == 0 {
    return None;
  }

  for row in &mut rows {
    row.resize(column_count, String::new());
  }

  let mut column_widths = vec![3; column_count];
  for row in &rows {
    for (index, cell) in row.iter().enumerate() {
      column_widths[index] = column_widths[index].max(cell.width());
    }
  }

  let mut result = String::from("\n");
  let mut rows = rows.iter();

  if let Some(header) = rows.next() {
    result.push_str(&format_row(header, &column_widths));
    result.push('|');
    for width in &column_widths {
      result.push(' ');
      result.push_str(&"-".repeat(*width));
      result.push_str(" |");
    }
    result.push('\n');
  }

  for row in rows {
    result.push_str(&format_row(row, &column_widths));
  }

  result.push('\n');
  Some(result)
}

fn format_row(row: &[String], column_widths: &[usize]) -> String {
  let mut line = String::from("|");

  for (cell, width) in row.iter().zip(column_widths) {
    line.push(' ');
    line.push_str(cell);
    line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    line.push_str(" |");
  }

  line.push('\n');
  line
}
