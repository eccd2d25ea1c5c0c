//! Test fixtures for Confluence API responses
//!
//! Sample `content/{id}?expand=title,version,body.export_view` payloads as
//! returned by Confluence Cloud and Server.

use serde_json::json;

/// A short Cloud page with headings and paragraphs.
pub fn sample_page_response() -> serde_json::Value {
  json!({
    "id": "123456",
    "type": "page",
    "status": "current",
    "title": "Getting Started Guide",
    "version": { "number": 3, "when": "2025-03-14T09:26:53.589Z" },
    "body": {
      "export_view": {
        "value": "<h1 id=\"GettingStartedGuide-GettingStarted\">Getting Started</h1><p>Welcome to our documentation!</p><p>This guide will help you get started with our product.</p>",
        "representation": "export_view"
      }
    },
    "_links": {
      "webui": "/spaces/DOCS/pages/123456/Getting+Started+Guide",
      "base": "https://example.atlassian.net/wiki"
    }
  })
}

/// A page exercising code blocks, lists, tables, and entities.
pub fn sample_complex_page_response() -> serde_json::Value {
  json!({
    "id": "789012",
    "type": "page",
    "status": "current",
    "title": "API Documentation",
    "version": { "number": 12 },
    "body": {
      "export_view": {
        "value": r#"<h2 id="APIDocumentation-Endpoints">Endpoints</h2>
<ul>
<li><code>/api/users</code> &ndash; user management</li>
<li><code>/api/posts</code> &ndash; content management</li>
</ul>
<h2 id="APIDocumentation-Authentication">Authentication</h2>
<p>Use <strong>API tokens</strong> for authentication.</p>
<div class="code panel pdl" style="border-width: 1px;"><div class="codeContent panelContent pdl">
<pre class="syntaxhighlighter-pre" data-syntaxhighlighter-params="brush: bash; gutter: false; theme: Confluence" data-theme="Confluence">curl -H "Authorization: Bearer TOKEN" https://api.example.com/users</pre>
</div></div>
<div class="table-wrap"><table class="confluenceTable"><colgroup><col><col></colgroup><tbody>
<tr><th class="confluenceTh"><p>Status</p></th><th class="confluenceTh"><p>Meaning</p></th></tr>
<tr><td class="confluenceTd"><p>401</p></td><td class="confluenceTd"><p>Bad token</p></td></tr>
</tbody></table></div>"#,
        "representation": "export_view"
      }
    }
  })
}

/// A Server/Data Center page whose title needs escaping in XML output.
pub fn sample_server_page_response() -> serde_json::Value {
  json!({
    "id": "65541",
    "title": "Q&A <draft>",
    "version": { "number": 1 },
    "body": {
      "export_view": {
        "value": "<p>Ask &ldquo;why&rdquo; before &ldquo;how&rdquo;.<br></p>",
        "representation": "export_view"
      }
    }
  })
}

/// A page whose rendered body is blank.
pub fn empty_page_response() -> serde_json::Value {
  json!({
    "id": "404040",
    "title": "Placeholder",
    "version": { "number": 1 },
    "body": {
      "export_view": { "value": "  \n ", "representation": "export_view" }
    }
  })
}

/// A page payload without any body expansion.
pub fn page_without_body_response() -> serde_json::Value {
  json!({
    "id": "505050",
    "title": "No Body",
    "version": { "number": 2 }
  })
}

/// `user/current` on Atlassian Cloud.
pub fn cloud_user_response() -> serde_json::Value {
  json!({
    "type": "known",
    "accountId": "5b10ac8d82e05b22cc7d4ef5",
    "accountType": "atlassian",
    "email": "jane@example.com",
    "publicName": "Jane Doe",
    "displayName": "Jane Doe"
  })
}

/// `search?cql=...` with two page hits and one space hit.
pub fn search_response() -> serde_json::Value {
  json!({
    "results": [
      {
        "content": {
          "id": "1",
          "type": "page",
          "title": "First",
          "space": { "key": "ENG", "name": "Engineering" },
          "_links": { "webui": "/spaces/ENG/pages/1/First" }
        },
        "title": "First",
        "excerpt": "release notes for @@@hl@@@1.0@@@endhl@@@"
      },
      {
        "content": {
          "id": "2",
          "type": "page",
          "title": "Second",
          "space": { "key": "DOC", "name": "Docs" },
          "_links": { "webui": "/spaces/DOC/pages/2/Second" }
        }
      },
      {
        "space": { "key": "ENG", "name": "Engineering" },
        "title": "Engineering"
      }
    ],
    "start": 0,
    "limit": 5,
    "size": 3
  })
}
