//! Build script for atlask
//!
//! Embeds version and build metadata for runtime access

use std::env;
use std::path::Path;
use std::process::Command;

fn main() {
  embed_build_info();
  set_rerun_conditions();
}

/// Embeds build-time information as environment variables accessible at
/// runtime.
///
/// Every variable is always emitted so `env!` lookups compile even when git or
/// rustc cannot be invoked.
fn embed_build_info() {
  let git_hash = command_output("git", &["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
  println!("cargo:rustc-env=GIT_HASH={git_hash}");

  let timestamp = std::time::SystemTime::now()
    .duration_since(std::time::UNIX_EPOCH)
    .map(|elapsed| elapsed.as_secs())
    .unwrap_or_default();
  println!("cargo:rustc-env=BUILD_TIMESTAMP={timestamp}");

  println!("cargo:rustc-env=TARGET={}", env::var("TARGET").unwrap_or_default());

  let rustc_version = command_output("rustc", &["--version"]).unwrap_or_else(|| "unknown".to_string());
  println!("cargo:rustc-env=RUSTC_VERSION={rustc_version}");
}

/// Run a command and return its trimmed stdout, or `None` when it fails or
/// prints nothing.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
  let output = Command::new(program).args(args).output().ok()?;
  if !output.status.success() {
    return None;
  }

  let text = String::from_utf8(output.stdout).ok()?.trim().to_string();
  (!text.is_empty()).then_some(text)
}

fn set_rerun_conditions() {
  println!("cargo:rerun-if-changed=build.rs");

  // Only watch HEAD when building from a git checkout.
  if Path::new(".git/HEAD").exists() {
    println!("cargo:rerun-if-changed=.git/HEAD");
  }

  println!("cargo:rerun-if-env-changed=TARGET");
}
