use super::{NoteStore, StoreError, StoreResult, require_non_blank};
use crate::models::{Folder, Note, NoteDraft, NoteFilter, NoteUpdate, Tag, Version};
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Serialize)]
struct FolderBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct TagBody<'a> {
    name: &'a str,
    color: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Blocking client for the notes REST API (`<base>/api/...`)
pub struct ApiBackend {
    client: Client,
    api_base: Url,
}

impl ApiBackend {
    pub fn new(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let mut api_base = Url::parse(base_url.trim())
            .map_err(|e| StoreError::validation("api_url", e.to_string()))?;
        api_base
            .path_segments_mut()
            .map_err(|_| StoreError::validation("api_url", "not a base URL"))?
            .pop_if_empty()
            .push("api");

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_base })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    /// `GET /api/`
    pub fn health(&self) -> StoreResult<Health> {
        self.fetch(self.client.get(self.url(&[""])))
    }

    fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        let response = request.send().map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        warn!("API request failed with {}: {}", status, body);
        Err(api_error(status.as_u16(), &body))
    }

    fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> StoreResult<T> {
        self.send(request)?
            .json()
            .map_err(|e| StoreError::Unexpected(format!("Failed to parse response: {}", e)))
    }
}

/// No response at all: connection refused, DNS, timeout
fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_builder() {
        StoreError::Unexpected(e.to_string())
    } else {
        StoreError::Connection(e.to_string())
    }
}

/// Build the error for a non-success status; FastAPI puts the reason in `detail`
fn api_error(status: u16, body: &str) -> StoreError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| match b.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "Server error".to_string());
    StoreError::Api { status, detail }
}

impl NoteStore for ApiBackend {
    fn folders(&self) -> StoreResult<Vec<Folder>> {
        self.fetch(self.client.get(self.url(&["folders"])))
    }

    fn create_folder(&mut self, name: &str) -> StoreResult<Folder> {
        require_non_blank("name", name)?;
        let body = FolderBody { name: name.trim() };
        self.fetch(self.client.post(self.url(&["folders"])).json(&body))
    }

    fn rename_folder(&mut self, id: &str, name: &str) -> StoreResult<Folder> {
        require_non_blank("name", name)?;
        let body = FolderBody { name: name.trim() };
        self.fetch(self.client.put(self.url(&["folders", id])).json(&body))
    }

    fn delete_folder(&mut self, id: &str) -> StoreResult<()> {
        self.send(self.client.delete(self.url(&["folders", id])))?;
        Ok(())
    }

    fn tags(&self) -> StoreResult<Vec<Tag>> {
        self.fetch(self.client.get(self.url(&["tags"])))
    }

    fn create_tag(&mut self, name: &str, color: &str) -> StoreResult<Tag> {
        require_non_blank("name", name)?;
        require_non_blank("color", color)?;
        let body = TagBody {
            name: name.trim(),
            color: color.trim(),
        };
        self.fetch(self.client.post(self.url(&["tags"])).json(&body))
    }

    fn notes(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>> {
        debug!("Fetching notes with {:?}", filter);
        self.fetch(self.client.get(self.url(&["notes"])).query(filter))
    }

    fn note(&self, id: &str) -> StoreResult<Note> {
        self.fetch(self.client.get(self.url(&["notes", id])))
    }

    fn create_note(&mut self, draft: &NoteDraft) -> StoreResult<Note> {
        require_non_blank("title", &draft.title)?;
        self.fetch(self.client.post(self.url(&["notes"])).json(draft))
    }

    fn update_note(&mut self, id: &str, update: &NoteUpdate) -> StoreResult<Note> {
        if let Some(title) = &update.title {
            require_non_blank("title", title)?;
        }
        self.fetch(self.client.put(self.url(&["notes", id])).json(update))
    }

    fn delete_note(&mut self, id: &str) -> StoreResult<()> {
        self.send(self.client.delete(self.url(&["notes", id])))?;
        Ok(())
    }

    fn history(&self, id: &str) -> StoreResult<Vec<Version>> {
        let mut history: Vec<Version> =
            self.fetch(self.client.get(self.url(&["notes", id, "history"])))?;
        history.sort_by_key(|v| v.version);
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> ApiBackend {
        ApiBackend::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn urls_live_under_api_prefix() {
        let api = backend("http://localhost:8001");
        assert_eq!(
            api.url(&["notes", "abc", "history"]).as_str(),
            "http://localhost:8001/api/notes/abc/history"
        );
        assert_eq!(api.url(&[""]).as_str(), "http://localhost:8001/api/");

        let api = backend("https://example.com/notes/");
        assert_eq!(
            api.url(&["folders"]).as_str(),
            "https://example.com/notes/api/folders"
        );
    }

    #[test]
    fn path_segments_are_escaped() {
        let api = backend("http://localhost:8001");
        assert_eq!(
            api.url(&["notes", "a b/c"]).as_str(),
            "http://localhost:8001/api/notes/a%20b%2Fc"
        );
    }

    #[test]
    fn invalid_base_url_is_a_validation_error() {
        assert!(matches!(
            ApiBackend::new("not a url", Duration::from_secs(1)),
            Err(StoreError::Validation { .. })
        ));
    }

    #[test]
    fn api_error_reads_detail() {
        match api_error(404, r#"{"detail": "Note not found"}"#) {
            StoreError::Api { status, detail } => {
                assert_eq!(status, 404);
                assert_eq!(detail, "Note not found");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_generic_message() {
        for body in ["", "<html>oops</html>", r#"{"detail": ""}"#] {
            match api_error(500, body) {
                StoreError::Api { detail, .. } => assert_eq!(detail, "Server error"),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn api_error_keeps_structured_detail() {
        let body = r#"{"detail": [{"loc": ["body", "type"], "msg": "bad"}]}"#;
        match api_error(422, body) {
            StoreError::Api { status, detail } => {
                assert_eq!(status, 422);
                assert!(detail.contains("bad"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unreachable_server_is_a_connection_error() {
        // port 9 (discard) on localhost is not expected to be listening
        let api = backend("http://127.0.0.1:9");
        match api.folders() {
            Err(StoreError::Connection(_)) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn blank_title_never_leaves_the_client() {
        let mut api = backend("http://127.0.0.1:9");
        let draft = NoteDraft::default();
        assert!(matches!(
            api.create_note(&draft),
            Err(StoreError::Validation { .. })
        ));
    }
}
