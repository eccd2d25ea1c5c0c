//! Read-only access to environment variables.
//!
//! The selector looks variables up through [`EnvironmentView`] so tests can
//! supply a plain map instead of mutating the process environment.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A key/value lookup over environment-like variables.
pub trait EnvironmentView {
  /// Returns the value of `key`, or `None` when it is unset or not valid
  /// Unicode.
  fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentView for ProcessEnvironment {
  fn var(&self, key: &str) -> Option<String> {
    std::env::var(key).ok()
  }
}

impl<K, V> EnvironmentView for HashMap<K, V>
where
  K: Borrow<str> + Hash + Eq,
  V: AsRef<str>,
{
  fn var(&self, key: &str) -> Option<String> {
    self.get(key).map(|value| value.as_ref().to_string())
  }
}
