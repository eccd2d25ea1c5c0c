//! Confluence REST access: URL resolution, the HTTP client and the data
//! models it decodes.

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod search;
pub mod url;

pub use api::ConfluenceApi;
pub use client::{ConfluenceClient, PAGE_EXPAND};
pub use error::ApiError;
pub use models::{BodyRepresentation, Page, PageBody, PageVersion, UserInfo};
pub use search::{DEFAULT_SEARCH_LIMIT, QueryError, SearchQuery, SearchResult};
pub use url::{PageReference, ResolveError, resolve_api_base, resolve_page_url};
