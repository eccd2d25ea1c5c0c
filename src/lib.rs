//! atlask - ask atlassian
//!
//! Fetches Confluence pages by URL and renders them as XML or Markdown
//! documents, and searches a site with text or CQL. The library exposes URL
//! resolution, credential selection, the REST client and the HTML to
//! Markdown converter used by the CLI.

pub mod cli;
pub mod color;
pub mod commands;
pub mod confluence;
pub mod credentials;
pub mod format;
pub mod markdown;
