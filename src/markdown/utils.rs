//! Helpers for working with parsed HTML elements and tidying the Markdown
//! output.

use scraper::ElementRef;

/// Lower-cased local name of an element.
pub fn tag_name<'a>(element: ElementRef<'a>) -> &'a str {
  element.value().name()
}

/// Iterate the element children of `element`, skipping text and comments.
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
  element.children().filter_map(ElementRef::wrap)
}

/// Owned value of an attribute, if present.
pub fn get_attribute(element: ElementRef, attr_name: &str) -> Option<String> {
  element.value().attr(attr_name).map(str::to_string)
}

/// Whether the element's `class` attribute lists `class_name`.
pub fn has_class(element: ElementRef, class_name: &str) -> bool {
  element.value().classes().any(|class| class == class_name)
}

/// Collects all text content from an element and its descendants.
///
/// Entities are already resolved by the parser, so text is used verbatim.
pub fn get_element_text(element: ElementRef) -> String {
  element.text().collect()
}

/// Clean up the markdown output for predictable downstream processing.
///
/// - Turns non-breaking spaces into regular spaces
/// - Strips trailing whitespace from each line
/// - Removes excessive blank lines (more than 2 consecutive)
/// - Trims leading/trailing whitespace
/// - Ensures the output ends with a newline
pub fn clean_markdown(content: &str) -> String {
  let mut result = content
    .replace('\u{00A0}', " ")
    .lines()
    .map(str::trim_end)
    .collect::<Vec<_>>()
    .join("\n");

  while result.contains("\n\n\n") {
    result = result.replace("\n\n\n", "\n\n");
  }

  result = result.trim().to_string();

  if !result.ends_with('\n') {
    result.push('\n');
  }

  result
}
