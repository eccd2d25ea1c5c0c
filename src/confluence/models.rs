//! Data transfer objects returned by the Confluence REST API.

use serde::{Deserialize, Deserializer, Serialize};

/// A page as returned by `content/{id}?expand=title,version,body.export_view`.
///
/// Fields missing from the response decode to their defaults so a sparse
/// payload still yields an (empty) page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
  /// Numeric identifier assigned by Confluence.
  #[serde(default, deserialize_with = "null_as_default")]
  pub id: String,
  /// Human-readable title displayed in the UI.
  #[serde(default, deserialize_with = "null_as_default")]
  pub title: String,
  /// Version metadata for the current revision.
  #[serde(default)]
  pub version: Option<PageVersion>,
  /// Body representations requested through `expand`.
  #[serde(default)]
  pub body: Option<PageBody>,
}

impl Page {
  /// Rendered HTML of the page, or an empty string when the API omitted it.
  pub fn export_view_html(&self) -> &str {
    self
      .body
      .as_ref()
      .and_then(|body| body.export_view.as_ref())
      .map(|view| view.value.as_str())
      .unwrap_or_default()
  }
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Page body content in the requested representations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageBody {
  /// Rendered HTML intended for export.
  #[serde(default)]
  pub export_view: Option<BodyRepresentation>,
}

/// A single rendered representation of the page body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyRepresentation {
  #[serde(default)]
  pub value: String,
  #[serde(default)]
  pub representation: String,
}

/// Revision metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageVersion {
  #[serde(default)]
  pub number: u64,
  /// ISO-8601 timestamp of the revision.
  #[serde(default)]
  pub when: Option<String>,
}

/// The authenticated user, from `user/current`.
///
/// Cloud reports `accountId`; Server/Data Center reports `username` and
/// `userKey`, so every identifier is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
  #[serde(rename = "accountId", default)]
  pub account_id: Option<String>,
  #[serde(default)]
  pub username: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(rename = "displayName", default)]
  pub display_name: String,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_page_decodes_export_view() {
    let page: Page = serde_json::from_value(json!({
      "id": "123",
      "title": "Runbook",
      "version": { "number": 7, "when": "2025-01-02T03:04:05.000Z" },
      "body": { "export_view": { "value": "<p>Hi</p>", "representation": "export_view" } }
    }))
    .unwrap();

    assert_eq!(page.title, "Runbook");
    assert_eq!(page.version.as_ref().map(|v| v.number), Some(7));
    assert_eq!(page.export_view_html(), "<p>Hi</p>");
  }

  #[test]
  fn test_sparse_page_defaults() {
    let page: Page = serde_json::from_value(json!({ "id": "1", "title": null })).unwrap();
    assert_eq!(page.title, "");
    assert_eq!(page.export_view_html(), "");

    let page: Page = serde_json::from_value(json!({ "body": {} })).unwrap();
    assert_eq!(page.title, "");
    assert_eq!(page.export_view_html(), "");
  }

  #[test]
  fn test_user_info_server_shape() {
    let user: UserInfo = serde_json::from_value(json!({
      "type": "known",
      "username": "jdoe",
      "userKey": "ff80",
      "displayName": "Jane Doe"
    }))
    .unwrap();

    assert_eq!(user.display_name, "Jane Doe");
    assert_eq!(user.username.as_deref(), Some("jdoe"));
    assert_eq!(user.account_id, None);
  }
}
