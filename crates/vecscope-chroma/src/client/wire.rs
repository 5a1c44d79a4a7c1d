//! Chroma REST payloads.

use serde::{Deserialize, Serialize};

use crate::record::{CollectionHandle, Metadata, RecordSet};

/// Collection entry of the list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct CollectionModel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl From<CollectionModel> for CollectionHandle {
    fn from(model: CollectionModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            metadata: model.metadata,
        }
    }
}

/// Body of the per-collection get endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct GetRequest {
    pub include: [&'static str; 3],
}

impl Default for GetRequest {
    fn default() -> Self {
        Self {
            include: ["embeddings", "metadatas", "documents"],
        }
    }
}

/// Answer of the per-collection get endpoint.
///
/// Any field other than `ids` may be `null` as a whole, and individual
/// entries may be `null` too.
#[derive(Debug, Deserialize)]
pub(crate) struct GetResponse {
    pub ids: Vec<String>,
    #[serde(default)]
    pub embeddings: Option<Vec<Option<Vec<f32>>>>,
    #[serde(default)]
    pub metadatas: Option<Vec<Option<Metadata>>>,
    #[serde(default)]
    pub documents: Option<Vec<Option<String>>>,
}

impl From<GetResponse> for RecordSet {
    fn from(response: GetResponse) -> Self {
        let len = response.ids.len();

        Self {
            embeddings: response.embeddings.unwrap_or_else(|| vec![None; len]),
            metadatas: response.metadatas.unwrap_or_else(|| vec![None; len]),
            documents: response.documents.unwrap_or_else(|| vec![None; len]),
            ids: response.ids,
        }
    }
}

/// Answer of the heartbeat endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct HeartbeatResponse {
    #[serde(rename = "nanosecond heartbeat")]
    pub nanosecond_heartbeat: u64,
}

/// Error body returned by Chroma on failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extracts the most descriptive message from a raw error body.
    pub fn describe(raw: &str) -> String {
        let Ok(body) = serde_json::from_str::<Self>(raw) else {
            return raw.trim().to_owned();
        };

        match (body.error, body.message) {
            (Some(error), Some(message)) => format!("{error}: {message}"),
            (None, Some(text)) | (Some(text), None) => text,
            (None, None) => raw.trim().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_fields_are_filled_per_id() {
        let response: GetResponse = serde_json::from_value(json!({
            "ids": ["a", "b"],
            "embeddings": null,
            "metadatas": [{"page": 1}, null],
            "documents": ["first", null],
        }))
        .unwrap();

        let set = RecordSet::from(response);
        assert!(set.is_aligned());
        assert_eq!(set.embeddings, vec![None, None]);
        assert_eq!(set.metadatas[0].as_ref().unwrap()["page"], json!(1));
        assert_eq!(set.documents[1], None);
    }

    #[test]
    fn short_fields_are_kept_as_returned() {
        let response: GetResponse = serde_json::from_value(json!({
            "ids": ["a", "b"],
            "documents": ["only one"],
        }))
        .unwrap();

        let set = RecordSet::from(response);
        assert_eq!(set.documents.len(), 1);
        assert!(!set.is_aligned());
    }

    #[test]
    fn get_request_includes_all_columns() {
        let body = serde_json::to_value(GetRequest::default()).unwrap();
        assert_eq!(
            body,
            json!({"include": ["embeddings", "metadatas", "documents"]})
        );
    }

    #[test]
    fn error_body_descriptions() {
        assert_eq!(
            ErrorBody::describe(r#"{"error":"NotFoundError","message":"Collection x does not exist."}"#),
            "NotFoundError: Collection x does not exist."
        );
        assert_eq!(ErrorBody::describe(r#"{"error":"boom"}"#), "boom");
        assert_eq!(ErrorBody::describe("plain text "), "plain text");
    }
}
