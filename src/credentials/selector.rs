//! Choosing between Basic and Bearer authentication.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;
use url::Url;

use super::{CredentialError, Credentials, EnvironmentView};

/// Environment variable holding the API token or personal access token.
pub const TOKEN_ENV: &str = "ATLASSIAN_TOKEN";
/// Environment variable holding the account email for Basic auth.
pub const EMAIL_ENV: &str = "ATLASSIAN_EMAIL";

const CLOUD_HOST_SUFFIX: &str = "atlassian.net";

/// Select the credentials to use for requests against `api_base`.
///
/// An email always selects Basic auth. Without one, Cloud hosts are refused
/// and every other host gets a Bearer token.
///
/// # Arguments
/// * `api_base` - REST API base the request will be sent to.
/// * `env` - Source of `ATLASSIAN_TOKEN` and `ATLASSIAN_EMAIL`.
///
/// # Errors
/// [`CredentialError::MissingToken`] when no token is set, and
/// [`CredentialError::MissingEmailForCloud`] for a Cloud host without an email.
pub fn select_credentials(api_base: &str, env: &dyn EnvironmentView) -> Result<Credentials, CredentialError> {
  let token = non_empty(env, TOKEN_ENV).ok_or(CredentialError::MissingToken)?;

  if let Some(email) = non_empty(env, EMAIL_ENV) {
    debug!("Using Basic authentication ({EMAIL_ENV} is set)");
    let encoded_user_pass = BASE64.encode(format!("{email}:{token}"));
    return Ok(Credentials::Basic { encoded_user_pass });
  }

  let host = host_of(api_base);
  if host.ends_with(CLOUD_HOST_SUFFIX) {
    return Err(CredentialError::MissingEmailForCloud { host });
  }

  debug!("Using Bearer authentication for {host}");
  Ok(Credentials::Bearer { token })
}

fn non_empty(env: &dyn EnvironmentView, key: &str) -> Option<String> {
  env.var(key).filter(|value| !value.is_empty())
}

/// Host of the API base, or an empty string when it cannot be parsed.
fn host_of(api_base: &str) -> String {
  Url::parse(api_base)
    .ok()
    .and_then(|url| url.host_str().map(str::to_string))
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  const CLOUD: &str = "https://foo.atlassian.net/wiki/rest/api";
  const SERVER: &str = "https://confluence.mycompany.com/rest/api";

  #[test]
  fn test_email_selects_basic_for_any_host() {
    let env = HashMap::from([(TOKEN_ENV, "t1"), (EMAIL_ENV, "e@x.com")]);
    let expected = Credentials::Basic {
      encoded_user_pass: BASE64.encode("e@x.com:t1"),
    };

    assert_eq!(select_credentials(CLOUD, &env), Ok(expected.clone()));
    assert_eq!(select_credentials(SERVER, &env), Ok(expected));
  }

  #[test]
  fn test_basic_header_decodes_to_email_and_token() {
    let env = HashMap::from([(TOKEN_ENV, "t1"), (EMAIL_ENV, "e@x.com")]);
    let header = select_credentials(CLOUD, &env).unwrap().authorization_header();
    let encoded = header.strip_prefix("Basic ").unwrap();
    let decoded = String::from_utf8(BASE64.decode(encoded).unwrap()).unwrap();
    assert_eq!(decoded, "e@x.com:t1");
  }

  #[test]
  fn test_cloud_without_email_is_refused() {
    let env = HashMap::from([(TOKEN_ENV, "t1")]);
    assert_eq!(
      select_credentials(CLOUD, &env),
      Err(CredentialError::MissingEmailForCloud {
        host: "foo.atlassian.net".to_string()
      })
    );
  }

  #[test]
  fn test_empty_email_counts_as_missing() {
    let env = HashMap::from([(TOKEN_ENV, "t1"), (EMAIL_ENV, "")]);
    assert!(matches!(
      select_credentials(CLOUD, &env),
      Err(CredentialError::MissingEmailForCloud { .. })
    ));
  }

  #[test]
  fn test_server_without_email_uses_bearer() {
    let env = HashMap::from([(TOKEN_ENV, "t1")]);
    assert_eq!(
      select_credentials(SERVER, &env),
      Ok(Credentials::Bearer { token: "t1".to_string() })
    );
  }

  #[test]
  fn test_missing_token_regardless_of_other_variables() {
    let empty: HashMap<&str, &str> = HashMap::new();
    assert_eq!(select_credentials(SERVER, &empty), Err(CredentialError::MissingToken));

    let email_only = HashMap::from([(EMAIL_ENV, "e@x.com")]);
    assert_eq!(select_credentials(CLOUD, &email_only), Err(CredentialError::MissingToken));

    let blank_token = HashMap::from([(TOKEN_ENV, ""), (EMAIL_ENV, "e@x.com")]);
    assert_eq!(select_credentials(CLOUD, &blank_token), Err(CredentialError::MissingToken));
  }

  #[test]
  fn test_unparseable_api_base_is_treated_as_non_cloud() {
    let env = HashMap::from([(TOKEN_ENV, "t1")]);
    assert_eq!(
      select_credentials("not a url", &env),
      Ok(Credentials::Bearer { token: "t1".to_string() })
    );
  }
}
