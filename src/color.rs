//! Color utilities for terminal output.
//!
//! Styling only ever applies to human-facing diagnostics; exported documents
//! are written to stdout uncolored.

use std::fmt::Display;
use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::cli::ColorOption;

/// Semantic color palette shared by the command handlers.
pub struct ColorScheme {
  enabled: bool,
}

impl ColorScheme {
  /// Create a color scheme from the `--color` preference. `auto` colors only
  /// when stderr, where diagnostics go, is a terminal.
  pub fn new(color_option: ColorOption) -> Self {
    let enabled = match color_option {
      ColorOption::Always => true,
      ColorOption::Never => false,
      ColorOption::Auto => std::io::stderr().is_terminal(),
    };

    Self { enabled }
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  fn paint<T: Display>(&self, text: T, style: impl FnOnce(&T) -> String) -> String {
    if self.enabled { style(&text) } else { text.to_string() }
  }

  /// Style for success messages (green)
  pub fn success<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.green().to_string())
  }

  /// Style for error messages (bright red)
  pub fn error<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_red().bold().to_string())
  }

  /// Style for warning messages (yellow)
  pub fn warning<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.yellow().to_string())
  }

  /// Style for info messages (cyan)
  pub fn info<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.cyan().to_string())
  }

  /// Style for emphasis/important text (bright white, bold)
  pub fn emphasis<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_white().bold().to_string())
  }

  /// Style for URLs and links (blue, underlined)
  pub fn link<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.blue().underline().to_string())
  }

  /// Style for numbers and metrics (bright blue)
  pub fn number<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_blue().to_string())
  }

  /// Style for commands and code (bright green)
  pub fn code<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_green().to_string())
  }

  /// Style for dimmed/secondary text
  pub fn dimmed<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.dimmed().to_string())
  }
}
