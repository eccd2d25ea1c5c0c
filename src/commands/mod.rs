//! CLI subcommand handlers.
//!
//! Each `atlask` subcommand lives in its own module; the shared exit code
//! classification lives here.

use crate::confluence::{ApiError, QueryError, ResolveError};
use crate::credentials::CredentialError;

pub mod auth;
pub mod completions;
pub mod page;
pub mod search;
pub mod version;

/// Exit code for a failed run, based on the first domain error in the chain.
///
/// Invalid input exits with 4, credential and authentication problems with
/// 2, and everything else with 1.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
  for cause in err.chain() {
    if cause.is::<ResolveError>() || cause.is::<QueryError>() {
      return 4;
    }
    if cause.is::<CredentialError>() {
      return 2;
    }
    if let Some(api_error) = cause.downcast_ref::<ApiError>() {
      return if api_error.is_auth_failure() { 2 } else { 1 };
    }
  }

  1
}
