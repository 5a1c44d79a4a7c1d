//! Results of user actions.

use serde::{Deserialize, Serialize};
use vecscope_chroma::ConnectionEndpoint;

use crate::present::RenderedTable;

/// Result of listing a store: one view per collection, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingReport {
    pub endpoint: ConnectionEndpoint,
    pub collections: Vec<CollectionView>,
}

impl ListingReport {
    /// Returns the number of collections that were rendered.
    pub fn rendered_count(&self) -> usize {
        self.collections
            .iter()
            .filter(|view| view.table().is_some())
            .count()
    }

    /// Returns the number of collections that failed to render.
    pub fn failed_count(&self) -> usize {
        self.collections.len() - self.rendered_count()
    }

    /// Returns the view of the named collection.
    pub fn collection(&self, name: &str) -> Option<&CollectionView> {
        self.collections.iter().find(|view| view.name == name)
    }
}

/// A collection of a [`ListingReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionView {
    pub name: String,
    pub outcome: CollectionOutcome,
}

impl CollectionView {
    /// Returns the rendered table, if the collection was rendered.
    pub fn table(&self) -> Option<&RenderedTable> {
        match &self.outcome {
            CollectionOutcome::Rendered(table) => Some(table),
            CollectionOutcome::Failed(_) => None,
        }
    }

    /// Returns the failure message, if the collection failed.
    pub fn failure(&self) -> Option<&str> {
        match &self.outcome {
            CollectionOutcome::Rendered(_) => None,
            CollectionOutcome::Failed(message) => Some(message),
        }
    }
}

/// Rendered table, or the message shown in its place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionOutcome {
    Rendered(RenderedTable),
    Failed(String),
}

/// Result of deleting every collection of a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionReport {
    pub endpoint: ConnectionEndpoint,
    pub collections: Vec<DeletionOutcome>,
}

impl DeletionReport {
    /// Returns the names of the deleted collections.
    pub fn deleted(&self) -> impl Iterator<Item = &str> {
        self.collections
            .iter()
            .filter(|outcome| outcome.status == DeletionStatus::Deleted)
            .map(|outcome| outcome.name.as_str())
    }

    /// Returns the names and failure messages of the collections left in place.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.collections
            .iter()
            .filter_map(|outcome| match &outcome.status {
                DeletionStatus::Deleted => None,
                DeletionStatus::Failed(message) => Some((outcome.name.as_str(), message.as_str())),
            })
    }

    /// Returns `true` if every collection was deleted.
    pub fn is_complete(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Deletion result of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionOutcome {
    pub name: String,
    pub status: DeletionStatus,
}

/// Whether a collection was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionStatus {
    Deleted,
    Failed(String),
}

/// Answer of a store heartbeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatReport {
    pub endpoint: ConnectionEndpoint,
    pub nanosecond_heartbeat: u64,
}
