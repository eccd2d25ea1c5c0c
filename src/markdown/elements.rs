//! HTML element to Markdown converters.
//!
//! Handles the elements found in Confluence's rendered `export_view` HTML:
//! headings, paragraphs, formatting, lists (including inline task lists),
//! links, images, code blocks, block quotes, and tables. Layout wrappers such
//! as `div` and `span` contribute only their content.

use scraper::{ElementRef, Node};
use tracing::trace;

use super::tables::convert_table_to_markdown;
use super::utils::{child_elements, get_attribute, get_element_text, has_class, tag_name};

/// Elements whose content never reaches the output.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head", "title"];

fn looks_like_list_marker(line: &str) -> bool {
  let trimmed = line.trim_start();

  if trimmed.starts_with(['-', '*', '+']) {
    return trimmed.len() > 1 && trimmed.as_bytes()[1] == b' ';
  }

  let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
  digits > 0 && trimmed[digits..].starts_with(". ")
}

/// Render one list item under `prefix`, indenting continuation lines so nested
/// lists and wrapped paragraphs stay inside the item.
fn format_list_item(item: &str, prefix: &str) -> String {
  let indentation = " ".repeat(prefix.chars().count());
  let mut formatted = String::new();
  let mut wrote_first_line = false;

  for line in item.trim_end().lines() {
    if !wrote_first_line {
      if line.trim().is_empty() {
        continue;
      }

      let content = line.trim_start();
      if looks_like_list_marker(content) {
        // Item starts with a nested list; keep the marker on its own line.
        formatted.push_str(prefix.trim_end());
        formatted.push('\n');
        formatted.push_str(&indentation);
      } else {
        formatted.push_str(prefix);
      }
      formatted.push_str(content);
      formatted.push('\n');
      wrote_first_line = true;
    } else if line.trim().is_empty() {
      formatted.push('\n');
    } else {
      formatted.push_str(&indentation);
      formatted.push_str(line);
      formatted.push('\n');
    }
  }

  if !wrote_first_line {
    formatted.push_str(prefix.trim_end());
    formatted.push('\n');
  }

  formatted
}

/// Wrap inline content in a Markdown marker, keeping surrounding whitespace
/// outside the marker (`<b> x </b>` becomes ` **x** `).
fn wrap_inline(content: &str, marker: &str) -> String {
  let trimmed = content.trim();
  if trimmed.is_empty() {
    return content.to_string();
  }

  let leading = &content[..content.len() - content.trim_start().len()];
  let trailing = &content[content.trim_end().len()..];
  format!("{leading}{marker}{trimmed}{marker}{trailing}")
}

fn convert_list(list: ElementRef, ordered: bool) -> String {
  let task_list = has_class(list, "inline-task-list");
  let mut result = String::from("\n");

  for (index, li) in child_elements(list).filter(|li| tag_name(*li) == "li").enumerate() {
    let prefix = if task_list {
      let checkbox = if has_class(li, "checked") { "- [x] " } else { "- [ ] " };
      checkbox.to_string()
    } else if ordered {
      format!("{}. ", index + 1)
    } else {
      "- ".to_string()
    };

    result.push_str(&format_list_item(&convert_element_to_markdown(li), &prefix));
  }

  result.push('\n');
  result
}

/// Language of a code block, from Confluence's
/// `data-syntaxhighlighter-params="brush: java; gutter: false"` or from a
/// `language-*` class on the `pre` or its `code` child.
fn code_language(pre: ElementRef) -> Option<String> {
  if let Some(params) = pre.value().attr("data-syntaxhighlighter-params") {
    let brush = params
      .split(';')
      .filter_map(|param| param.split_once(':'))
      .find(|(key, _)| key.trim() == "brush")
      .map(|(_, value)| value.trim().to_string())
      .filter(|value| !value.is_empty());
    if brush.is_some() {
      return brush;
    }
  }

  std::iter::once(pre)
    .chain(child_elements(pre).filter(|child| tag_name(*child) == "code"))
    .flat_map(|element| element.value().classes())
    .find_map(|class| class.strip_prefix("language-"))
    .map(str::to_string)
}

fn convert_code_block(pre: ElementRef) -> String {
  let code = get_element_text(pre);
  let language = code_language(pre).unwrap_or_default();
  let fence = if code.contains("```") { "````" } else { "```" };
  format!("\n{fence}{language}\n{}\n{fence}\n\n", code.trim_matches('\n').trim_end())
}

fn convert_image(img: ElementRef) -> String {
  // Emoticons carry their emoji in data attributes.
  if let Some(emoji) = get_attribute(img, "data-emoji-fallback").filter(|e| !e.is_empty()) {
    return emoji;
  }
  if has_class(img, "emoticon") {
    return get_attribute(img, "alt").unwrap_or_default();
  }

  let src = get_attribute(img, "src").unwrap_or_default();
  if src.is_empty() {
    return String::new();
  }
  let alt = get_attribute(img, "alt").unwrap_or_default();
  format!("![{alt}]({src})")
}

fn convert_link(link: ElementRef) -> String {
  let text = convert_element_to_markdown(link);
  let text = text.trim();

  match get_attribute(link, "href").filter(|href| !href.is_empty()) {
    Some(href) if text.is_empty() => format!("<{href}>"),
    Some(href) => format!("[{text}]({href})"),
    None => text.to_string(),
  }
}

/// Checkboxes outside Confluence task lists, e.g. `<input type=checkbox checked>`.
fn convert_input(input: ElementRef) -> String {
  match input.value().attr("type") {
    Some(kind) if kind.eq_ignore_ascii_case("checkbox") => {
      let checked = input.value().attr("checked").is_some();
      if checked { "[x] ".to_string() } else { "[ ] ".to_string() }
    }
    _ => String::new(),
  }
}

fn convert_blockquote(quote: ElementRef) -> String {
  let inner = super::utils::clean_markdown(&convert_element_to_markdown(quote));
  let quoted = inner
    .trim_end()
    .lines()
    .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {line}") })
    .collect::<Vec<_>>()
    .join("\n");
  format!("\n{quoted}\n\n")
}

/// Converts an element's children to Markdown recursively.
///
/// # Arguments
/// * `element` - Element whose descendants should be rendered.
///
/// # Returns
/// A Markdown string representing the element's content.
pub fn convert_element_to_markdown(element: ElementRef) -> String {
  let mut result = String::new();

  for child in element.children() {
    match child.value() {
      Node::Element(_) => {
        let Some(child) = ElementRef::wrap(child) else {
          continue;
        };
        let name = tag_name(child);

        match name {
          "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = name[1..].parse::<usize>().unwrap_or(1);
            let text = convert_element_to_markdown(child);
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !text.is_empty() {
              result.push_str(&format!("\n{} {text}\n\n", "#".repeat(level)));
            }
          }

          "p" => {
            let content = convert_element_to_markdown(child);
            let trimmed = content.trim();
            if !trimmed.is_empty() {
              result.push_str(&format!("\n{trimmed}\n\n"));
            }
          }

          "strong" | "b" => result.push_str(&wrap_inline(&convert_element_to_markdown(child), "**")),
          "em" | "i" | "u" => result.push_str(&wrap_inline(&convert_element_to_markdown(child), "_")),
          "s" | "del" | "strike" => result.push_str(&wrap_inline(&convert_element_to_markdown(child), "~~")),
          "code" => result.push_str(&wrap_inline(&get_element_text(child), "`")),

          "ul" => result.push_str(&convert_list(child, false)),
          "ol" => result.push_str(&convert_list(child, true)),

          "a" => result.push_str(&convert_link(child)),
          "img" => result.push_str(&convert_image(child)),
          "input" => result.push_str(&convert_input(child)),

          "br" => result.push('\n'),
          "hr" => result.push_str("\n---\n\n"),

          "pre" => result.push_str(&convert_code_block(child)),
          "blockquote" => result.push_str(&convert_blockquote(child)),
          "table" => result.push_str(&convert_table_to_markdown(child)),

          "time" => {
            let text = get_element_text(child);
            if !text.trim().is_empty() {
              result.push_str(&text);
            } else if let Some(datetime) = get_attribute(child, "datetime") {
              result.push_str(&datetime);
            }
          }

          "div" | "section" | "article" | "header" | "footer" | "main" | "aside" | "figure" | "details" => {
            result.push('\n');
            result.push_str(&convert_element_to_markdown(child));
            result.push('\n');
          }

          skipped if SKIPPED_ELEMENTS.contains(&skipped) => {}

          _ => {
            trace!("Passing through <{name}>");
            result.push_str(&convert_element_to_markdown(child));
          }
        }
      }
      Node::Text(text) => result.push_str(text),
      _ => {}
    }
  }

  result
}
