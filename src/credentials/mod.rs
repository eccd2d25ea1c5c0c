//! Credential selection for Confluence authentication.
//!
//! Credentials are read from the environment once per page:
//!
//! - `ATLASSIAN_TOKEN` (required): an API token (Cloud) or personal access
//!   token (Server/Data Center).
//! - `ATLASSIAN_EMAIL` (optional): the account email. When present the token is
//!   sent with HTTP Basic auth; otherwise it is sent as a Bearer token.
//!
//! Atlassian Cloud (`*.atlassian.net`) rejects Bearer tokens, so a Cloud host
//! without an email is refused before any request is made. API tokens for
//! Cloud can be created at <https://id.atlassian.com/manage-profile/security/api-tokens>.

mod env;
mod selector;
mod types;

pub use env::{EnvironmentView, ProcessEnvironment};
pub use selector::{EMAIL_ENV, TOKEN_ENV, select_credentials};
pub use types::{CredentialError, Credentials};
