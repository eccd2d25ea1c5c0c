//! Strongly typed credentials and selection errors.

use std::fmt;

/// How a request authenticates against Confluence.
///
/// `Debug` redacts the secret so credentials can sit inside logged structs
/// without leaking.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
  /// HTTP Basic auth; base64 of `email:token`.
  Basic { encoded_user_pass: String },
  /// Bearer token (Server/Data Center personal access token).
  Bearer { token: String },
}

impl Credentials {
  /// Value for the `Authorization` request header.
  pub fn authorization_header(&self) -> String {
    match self {
      Self::Basic { encoded_user_pass } => format!("Basic {encoded_user_pass}"),
      Self::Bearer { token } => format!("Bearer {token}"),
    }
  }

  /// Name of the HTTP authentication scheme.
  pub fn scheme(&self) -> &'static str {
    match self {
      Self::Basic { .. } => "Basic",
      Self::Bearer { .. } => "Bearer",
    }
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Basic { .. } => f.debug_struct("Basic").field("encoded_user_pass", &"<redacted>").finish(),
      Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"<redacted>").finish(),
    }
  }
}

/// Reasons credentials could not be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
  /// `ATLASSIAN_TOKEN` is unset or empty.
  MissingToken,
  /// The host is Atlassian Cloud but no email is available for Basic auth.
  MissingEmailForCloud { host: String },
}

impl fmt::Display for CredentialError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingToken => write!(f, "Missing ATLASSIAN_TOKEN environment variable for authentication."),
      Self::MissingEmailForCloud { .. } => write!(
        f,
        "ATLASSIAN_EMAIL is required for Atlassian Cloud (Basic auth with API token)."
      ),
    }
  }
}

impl std::error::Error for CredentialError {}
