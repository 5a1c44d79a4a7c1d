//! Collection and record types.

use serde::{Deserialize, Serialize};

/// Key-value metadata attached to a collection or a record.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A collection reported by the store.
///
/// Records are not fetched until the handle is passed to
/// [`StoreSession::fetch_records`](crate::StoreSession::fetch_records).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionHandle {
    /// Store-assigned identifier.
    pub id: String,
    /// Collection name.
    pub name: String,
    /// Optional collection metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl CollectionHandle {
    /// Creates a handle with an identifier and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            metadata: None,
        }
    }

    /// Attaches collection metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// One record of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier.
    pub id: String,
    /// Embedding, when the store returned one.
    pub embedding: Option<Vec<f32>>,
    /// Record metadata.
    pub metadata: Option<Metadata>,
    /// Source document.
    pub document: Option<String>,
}

impl Record {
    /// Creates a record with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the embedding.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Sets the metadata.
    pub fn with_metadata(
        mut self,
        metadata: impl IntoIterator<Item = (impl Into<String>, serde_json::Value)>,
    ) -> Self {
        self.metadata = Some(metadata.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    /// Sets the document.
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }
}

/// All records of a collection as four index-aligned sequences.
///
/// `ids[i]`, `embeddings[i]`, `metadatas[i]` and `documents[i]` describe the
/// same record. A store may break this alignment; [`RecordSet::is_aligned`]
/// tells consumers whether it holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub ids: Vec<String>,
    pub embeddings: Vec<Option<Vec<f32>>>,
    pub metadatas: Vec<Option<Metadata>>,
    pub documents: Vec<Option<String>>,
}

impl RecordSet {
    /// Creates an empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records, counted by identifier.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether there are no identifiers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns whether all four sequences have the same length.
    pub fn is_aligned(&self) -> bool {
        let len = self.ids.len();
        self.embeddings.len() == len && self.metadatas.len() == len && self.documents.len() == len
    }

    /// Appends a record to every sequence.
    pub fn push(&mut self, record: Record) {
        self.ids.push(record.id);
        self.embeddings.push(record.embedding);
        self.metadatas.push(record.metadata);
        self.documents.push(record.document);
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut set = Self::new();
        iter.into_iter().for_each(|record| set.push(record));
        set
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn collected_records_stay_aligned() {
        let set: RecordSet = [
            Record::new("a").with_embedding(vec![0.1, 0.2]),
            Record::new("b").with_document("hello"),
            Record::new("c").with_metadata([("source", json!("wiki"))]),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 3);
        assert!(set.is_aligned());
        assert_eq!(set.documents[1].as_deref(), Some("hello"));
        assert_eq!(set.embeddings[2], None);
    }

    #[test]
    fn detects_misalignment() {
        let mut set = RecordSet::new();
        set.push(Record::new("a"));
        set.documents.push(Some("extra".into()));
        assert!(!set.is_aligned());
    }

    #[test]
    fn empty_set_is_aligned() {
        let set = RecordSet::new();
        assert!(set.is_empty());
        assert!(set.is_aligned());
    }
}
