//! Command-line interface definitions for atlask.
//!
//! The CLI is defined with clap derives: one subcommand per workflow plus a
//! flattened group of global behavior options.

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::color::ColorScheme;
use crate::commands::auth::handle_auth_command;
use crate::commands::completions::handle_completions_command;
use crate::commands::page::handle_page_command;
use crate::commands::search::handle_search_command;
use crate::commands::version::handle_version_command;
use crate::confluence::DEFAULT_SEARCH_LIMIT;
use crate::format::OutputFormat;

/// Exit code for invalid arguments or unusable input.
pub const EXIT_INVALID_INPUT: i32 = 4;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: &str = "30";

/// atlask - ask atlassian
#[derive(Debug, Parser)]
#[command(
  name = "atlask",
  version,
  about = "atlask - ask atlassian",
  long_about = "Fetch Confluence pages by URL and print them as XML or Markdown.\n\
                Credentials are read from ATLASSIAN_TOKEN and ATLASSIAN_EMAIL.",
  styles = get_clap_styles()
)]
pub struct Cli {
  /// Subcommand to execute
  #[command(subcommand)]
  pub command: Command,

  /// Behavior options
  #[command(flatten)]
  pub behavior: BehaviorOptions,
}

/// Top-level subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
  /// Fetch Confluence pages and print them as XML or Markdown
  Page(PageArgs),

  /// Search a Confluence site with text or CQL
  Search(SearchArgs),

  /// Authentication testing and inspection
  Auth {
    #[command(subcommand)]
    subcommand: AuthCommand,
  },

  /// Display version and build information
  Version {
    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Show only version number
    #[arg(long)]
    short: bool,
  },

  /// Generate shell completion scripts
  Completions {
    /// Target shell for completions
    #[arg(value_enum)]
    shell: Shell,
  },
}

/// Options for `atlask page`
#[derive(Debug, Parser)]
pub struct PageArgs {
  /// Confluence page URL (repeatable; more URLs may be piped via stdin)
  #[arg(short = 'u', long = "url", value_name = "URL")]
  pub urls: Vec<String>,

  /// Output format
  #[arg(short, long, value_enum, ignore_case = true, default_value = "xml")]
  pub format: OutputFormat,

  /// Request timeout in seconds
  #[arg(short, long, default_value = DEFAULT_TIMEOUT_SECS, value_name = "SECONDS", value_parser = parse_timeout)]
  pub timeout: Duration,
}

/// Options for `atlask search`
#[derive(Debug, Parser)]
pub struct SearchArgs {
  /// Any Confluence URL on the target site
  #[arg(short = 'u', long = "url", value_name = "URL")]
  pub url: String,

  /// Text to search for, or a CQL expression with --cql
  #[arg(long, value_name = "QUERY")]
  pub query: String,

  /// Restrict a text search to one space key
  #[arg(short, long, value_name = "KEY", conflicts_with = "cql")]
  pub space: Option<String>,

  /// Send --query as raw CQL
  #[arg(long)]
  pub cql: bool,

  /// Maximum number of results
  #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
  pub limit: u32,

  /// Print results as JSON
  #[arg(long)]
  pub json: bool,

  /// Request timeout in seconds
  #[arg(short, long, default_value = DEFAULT_TIMEOUT_SECS, value_name = "SECONDS", value_parser = parse_timeout)]
  pub timeout: Duration,
}

/// Authentication subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
  /// Show which credentials would be used for a Confluence URL
  Show {
    /// Any Confluence URL on the target site
    #[arg(short = 'u', long = "url", value_name = "URL")]
    url: String,
  },

  /// Verify credentials by fetching the current user
  Test {
    /// Any Confluence URL on the target site
    #[arg(short = 'u', long = "url", value_name = "URL")]
    url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value = DEFAULT_TIMEOUT_SECS, value_name = "SECONDS", value_parser = parse_timeout)]
    timeout: Duration,
  },
}

/// Behavior options
#[derive(Debug, Parser)]
pub struct BehaviorOptions {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose", global = true)]
  pub quiet: bool,

  /// Colorize output
  #[arg(long, value_enum, default_value = "auto", value_name = "WHEN", global = true)]
  pub color: ColorOption,
}

/// Color output options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorOption {
  Auto,
  Always,
  Never,
}

/// Shells supported by `atlask completions`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
  Bash,
  Zsh,
  Fish,
  Powershell,
  Elvish,
}

/// Parse a `--timeout` value into a [`Duration`].
///
/// # Errors
/// Returns a message when the value is not a positive, finite number of
/// seconds that fits in a `Duration`.
pub fn parse_timeout(value: &str) -> Result<Duration, String> {
  let seconds: f64 = value
    .trim()
    .parse()
    .map_err(|_| format!("`{value}` is not a number of seconds"))?;

  if !seconds.is_finite() || seconds <= 0.0 {
    return Err(format!("--timeout must be a positive number of seconds (got {seconds})"));
  }

  Duration::try_from_secs_f64(seconds).map_err(|e| format!("--timeout is out of range: {e}"))
}

/// Parse CLI arguments, initialize shared services, and dispatch to the chosen
/// command.
pub async fn run() {
  let cli = Cli::parse();

  init_tracing(&cli.behavior);

  let colors = ColorScheme::new(cli.behavior.color);

  match &cli.command {
    Command::Page(args) => {
      handle_page_command(args, &colors).await;
    }
    Command::Search(args) => {
      handle_search_command(args, &colors).await;
    }
    Command::Auth { subcommand } => {
      handle_auth_command(subcommand, &colors).await;
    }
    Command::Version { json, short } => {
      handle_version_command(*json, *short, &colors);
    }
    Command::Completions { shell } => {
      handle_completions_command(*shell);
    }
  }
}

fn init_tracing(behavior: &BehaviorOptions) {
  let level = if behavior.quiet {
    LevelFilter::ERROR
  } else {
    match behavior.verbose {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    }
  };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Get custom styles for clap help output
fn get_clap_styles() -> clap::builder::Styles {
  use clap::builder::styling::{AnsiColor, Effects};

  clap::builder::Styles::styled()
    .header(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .literal(AnsiColor::BrightGreen.on_default())
    .placeholder(AnsiColor::BrightCyan.on_default())
    .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
    .valid(AnsiColor::BrightGreen.on_default())
    .invalid(AnsiColor::BrightRed.on_default())
}
