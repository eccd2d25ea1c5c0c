//! Errors reported by the Confluence HTTP client.

use std::fmt;

use reqwest::StatusCode;

/// Longest response excerpt quoted in [`ApiError::Status`] messages.
pub const ERROR_BODY_LIMIT: usize = 300;

/// A request that was rejected by Confluence or never reached it.
#[derive(Debug)]
pub enum ApiError {
  /// HTTP 401.
  Unauthorized,
  /// HTTP 403.
  Forbidden,
  /// HTTP 404.
  NotFound,
  /// Any other non-success status, with the start of the response body.
  Status { status: StatusCode, body: String },
  /// The request failed before a response arrived.
  Network(reqwest::Error),
}

impl ApiError {
  /// Classify a non-success response.
  pub fn from_response(status: StatusCode, body: &str) -> Self {
    match status {
      StatusCode::UNAUTHORIZED => Self::Unauthorized,
      StatusCode::FORBIDDEN => Self::Forbidden,
      StatusCode::NOT_FOUND => Self::NotFound,
      _ => Self::Status {
        status,
        body: body.chars().take(ERROR_BODY_LIMIT).collect(),
      },
    }
  }

  /// Whether Confluence refused the supplied credentials.
  pub fn is_auth_failure(&self) -> bool {
    matches!(self, Self::Unauthorized | Self::Forbidden)
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Unauthorized => write!(f, "Authentication failed (401). Check ATLASSIAN_EMAIL/TOKEN."),
      Self::Forbidden => write!(f, "Access forbidden (403). Ensure the token has permissions."),
      Self::NotFound => write!(f, "Page not found (404). Verify the URL/page ID."),
      Self::Status { status, body } => write!(f, "Confluence API error: {} {body}", status.as_u16()),
      Self::Network(err) => write!(f, "Network error: {err}"),
    }
  }
}

impl std::error::Error for ApiError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Network(err) => Some(err),
      _ => None,
    }
  }
}

impl From<reqwest::Error> for ApiError {
  fn from(err: reqwest::Error) -> Self {
    Self::Network(err)
  }
}
