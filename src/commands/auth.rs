//! Authentication subcommand handlers.
//!
//! `atlask auth show` explains which credentials the environment provides and
//! which scheme would be used for a site, without touching the network.
//! `atlask auth test` performs a live `user/current` call.

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use anyhow::Context;

use crate::cli::{AuthCommand, EXIT_INVALID_INPUT};
use crate::color::ColorScheme;
use crate::commands::exit_code_for;
use crate::confluence::{ConfluenceApi, ConfluenceClient, UserInfo, resolve_api_base};
use crate::credentials::{EMAIL_ENV, EnvironmentView, ProcessEnvironment, TOKEN_ENV, select_credentials};

const API_TOKEN_URL: &str = "https://id.atlassian.com/manage-profile/security/api-tokens";

/// Dispatch the authentication subcommands defined under `atlask auth`.
///
/// # Arguments
/// * `subcommand` - Auth-specific variant to execute.
/// * `colors` - Shared color scheme used to render output consistently.
pub(crate) async fn handle_auth_command(subcommand: &AuthCommand, colors: &ColorScheme) {
  match subcommand {
    AuthCommand::Show { url } => {
      if let Err(e) = show_auth_config(url, &ProcessEnvironment, colors, &mut io::stdout().lock()) {
        eprintln!("{} {}", colors.error("✗"), colors.error(format!("{e:#}")));
        process::exit(exit_code_for(&e));
      }
    }
    AuthCommand::Test { url, timeout } => test_auth(url, *timeout, colors).await,
  }
}

async fn test_auth(url: &str, timeout: Duration, colors: &ColorScheme) {
  let api_base = match resolve_api_base(url) {
    Ok(api_base) => api_base,
    Err(e) => {
      eprintln!("{} {}", colors.error("✗"), colors.error(e));
      process::exit(EXIT_INVALID_INPUT);
    }
  };

  println!("{} {}", colors.info("→"), colors.info("Testing authentication"));
  println!("  {}: {}", colors.emphasis("API base"), colors.link(&api_base));

  let credentials = match select_credentials(&api_base, &ProcessEnvironment) {
    Ok(credentials) => credentials,
    Err(e) => {
      eprintln!("\n{} {}", colors.error("✗"), colors.error("No usable credentials"));
      eprintln!("  {e}");
      let _ = write_setup_instructions(&mut io::stderr().lock(), colors);
      process::exit(2);
    }
  };

  println!("  {}: {}", colors.emphasis("Scheme"), credentials.scheme());

  let result = match ConfluenceClient::new(api_base.as_str(), credentials, timeout) {
    Ok(client) => {
      println!("\n{} {}", colors.info("→"), colors.info("Calling Confluence API..."));
      client.current_user().await
    }
    Err(e) => Err(e),
  };

  match result {
    Ok(user) => {
      println!(
        "\n{} {}",
        colors.success("✓"),
        colors.success("Authentication successful!")
      );
      print_user(&user, colors);
    }
    Err(e) => {
      eprintln!("\n{} {}", colors.error("✗"), colors.error("Authentication failed"));
      eprintln!("  {e:#}");
      eprintln!(
        "\n{}",
        colors.dimmed("Run 'atlask auth show -u <URL>' to see how credentials are selected")
      );
      process::exit(exit_code_for(&e));
    }
  }
}

fn print_user(user: &UserInfo, colors: &ColorScheme) {
  println!("\n{}", colors.emphasis("User Information:"));
  println!("  {}: {}", colors.emphasis("Display Name"), user.display_name);
  if let Some(account_id) = &user.account_id {
    println!("  {}: {}", colors.emphasis("Account ID"), colors.dimmed(account_id));
  }
  if let Some(username) = &user.username {
    println!("  {}: {}", colors.emphasis("Username"), username);
  }
  if let Some(email) = &user.email {
    println!("  {}: {}", colors.emphasis("Email"), email);
  }
}

/// Write the derived API base, the credential variables, and the scheme the
/// selector would pick for `url`. Setup instructions follow when no scheme
/// can be chosen; the whole report goes to `out`.
///
/// # Errors
/// Returns the [`crate::confluence::ResolveError`] for an unusable URL, or a
/// write failure.
fn show_auth_config(
  url: &str,
  env: &dyn EnvironmentView,
  colors: &ColorScheme,
  out: &mut dyn Write,
) -> anyhow::Result<()> {
  let api_base = resolve_api_base(url)?;

  writeln!(out, "{}\n", colors.emphasis("Authentication Configuration"))?;
  writeln!(out, "{}: {}", colors.emphasis("API base"), colors.link(&api_base))?;

  match env.var(EMAIL_ENV).filter(|email| !email.is_empty()) {
    Some(email) => writeln!(out, "\n{}: {}", colors.emphasis(EMAIL_ENV), email)?,
    None => writeln!(out, "\n{}: {}", colors.emphasis(EMAIL_ENV), colors.dimmed("(not set)"))?,
  }

  match env.var(TOKEN_ENV).filter(|token| !token.is_empty()) {
    Some(token) => {
      writeln!(out, "\n{}: {}", colors.emphasis(TOKEN_ENV), colors.dimmed(mask_token(&token)))?;
      writeln!(
        out,
        "  {}: {} characters",
        colors.dimmed("Length"),
        colors.number(token.chars().count())
      )?;
    }
    None => writeln!(out, "\n{}: {}", colors.emphasis(TOKEN_ENV), colors.dimmed("(not set)"))?,
  }

  match select_credentials(&api_base, env) {
    Ok(credentials) => {
      writeln!(
        out,
        "\n{} {} {}",
        colors.success("✓"),
        colors.success("Requests will use"),
        colors.code(credentials.scheme())
      )?;
    }
    Err(e) => {
      writeln!(out, "\n{} {}", colors.warning("⚠"), colors.warning(e))?;
      write_setup_instructions(out, colors)?;
    }
  }

  out.flush().context("Failed to write authentication report")
}

fn write_setup_instructions(out: &mut dyn Write, colors: &ColorScheme) -> io::Result<()> {
  writeln!(out, "\n{}", colors.info("Setup instructions:"))?;
  writeln!(out, "  Atlassian Cloud: set {EMAIL_ENV} and {TOKEN_ENV} (API token from")?;
  writeln!(out, "    {})", colors.link(API_TOKEN_URL))?;
  writeln!(out, "  Server/Data Center: set {TOKEN_ENV} to a personal access token")
}

/// Show the first four characters of long tokens and mask the rest.
fn mask_token(token: &str) -> String {
  let length = token.chars().count();
  if length > 8 {
    token.chars().take(4).chain(std::iter::repeat_n('*', length - 4)).collect()
  } else {
    "*".repeat(length)
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;
  use crate::cli::ColorOption;
  use crate::confluence::ResolveError;

  fn report(url: &str, env: &HashMap<&str, &str>) -> anyhow::Result<String> {
    let mut out = Vec::new();
    show_auth_config(url, env, &ColorScheme::new(ColorOption::Never), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
  }

  #[test]
  fn test_show_reports_selected_scheme() {
    let env = HashMap::from([("ATLASSIAN_TOKEN", "abcdefghijkl"), ("ATLASSIAN_EMAIL", "e@x.com")]);
    let output = report("https://example.atlassian.net/wiki/spaces/X", &env).unwrap();

    assert!(output.contains("API base: https://example.atlassian.net/wiki/rest/api"));
    assert!(output.contains("ATLASSIAN_TOKEN: abcd********"));
    assert!(output.contains("Requests will use Basic"));
    assert!(!output.contains("Setup instructions:"));
  }

  #[test]
  fn test_show_puts_setup_instructions_in_the_same_report() {
    let env = HashMap::from([("ATLASSIAN_TOKEN", "t1")]);
    let output = report("https://example.atlassian.net/wiki", &env).unwrap();

    let warning = output.find("ATLASSIAN_EMAIL is required for Atlassian Cloud").unwrap();
    let instructions = output.find("Setup instructions:").unwrap();
    assert!(warning < instructions);
    assert!(output.ends_with("Server/Data Center: set ATLASSIAN_TOKEN to a personal access token\n"));
  }

  #[test]
  fn test_show_rejects_unusable_url_without_output() {
    let env: HashMap<&str, &str> = HashMap::new();
    let mut out = Vec::new();
    let err = show_auth_config("not a url", &env, &ColorScheme::new(ColorOption::Never), &mut out).unwrap_err();

    assert!(err.is::<ResolveError>());
    assert_eq!(exit_code_for(&err), EXIT_INVALID_INPUT);
    assert!(out.is_empty());
  }

  #[test]
  fn test_mask_long_token() {
    assert_eq!(mask_token("abcdefghijkl"), "abcd********");
  }

  #[test]
  fn test_mask_short_token() {
    assert_eq!(mask_token("abcd"), "****");
    assert_eq!(mask_token(""), "");
  }

  #[test]
  fn test_mask_counts_characters_not_bytes() {
    assert_eq!(mask_token("ééééééééé"), "éééé*****");
  }
}
