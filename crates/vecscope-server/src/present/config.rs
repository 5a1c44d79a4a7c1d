//! Presenter configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::table::ColumnKind;

/// Style applied to emphasized cells unless configured otherwise.
pub const DEFAULT_EMPHASIS_STYLE: &str =
    "background-color: white; color: black; border-color: black";

/// Number of embedding components shown before the dimension count.
pub const DEFAULT_EMBEDDING_PREVIEW: usize = 4;

/// Ordering used to pick the maximum of a column.
///
/// A rule that has no meaning for a column's values (for instance `norm` on
/// document text) leaves that column without emphasis.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    AsRefStr
)]
#[cfg_attr(feature = "config", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmphasisRule {
    /// Lexicographic order of the text (metadata compares as compact JSON).
    Lexical,
    /// Character count for text, dimension for embeddings, key count for metadata.
    Length,
    /// Euclidean norm of an embedding. Non-finite norms never win.
    Norm,
    /// No emphasis.
    #[default]
    Off,
}

/// Display options of the [`TablePresenter`].
///
/// Passed explicitly at construction; there is no process-wide display state.
///
/// [`TablePresenter`]: super::TablePresenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct PresenterConfig {
    /// Number of embedding components shown in a cell.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "EMBEDDING_PREVIEW", default_value_t = DEFAULT_EMBEDDING_PREVIEW)
    )]
    pub embedding_preview: usize,

    /// Emphasis rule of the `ids` column.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "IDS_EMPHASIS", value_enum, default_value_t = EmphasisRule::Lexical)
    )]
    pub ids_emphasis: EmphasisRule,

    /// Emphasis rule of the `embeddings` column.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "EMBEDDINGS_EMPHASIS", value_enum, default_value_t = EmphasisRule::Norm)
    )]
    pub embeddings_emphasis: EmphasisRule,

    /// Emphasis rule of the `metadata` column.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "METADATA_EMPHASIS", value_enum, default_value_t = EmphasisRule::Off)
    )]
    pub metadata_emphasis: EmphasisRule,

    /// Emphasis rule of the `documents` column.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "DOCUMENTS_EMPHASIS", value_enum, default_value_t = EmphasisRule::Length)
    )]
    pub documents_emphasis: EmphasisRule,

    /// Inline CSS applied to emphasized cells.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "EMPHASIS_STYLE", default_value = DEFAULT_EMPHASIS_STYLE)
    )]
    pub emphasis_style: String,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            embedding_preview: DEFAULT_EMBEDDING_PREVIEW,
            ids_emphasis: EmphasisRule::Lexical,
            embeddings_emphasis: EmphasisRule::Norm,
            metadata_emphasis: EmphasisRule::Off,
            documents_emphasis: EmphasisRule::Length,
            emphasis_style: DEFAULT_EMPHASIS_STYLE.to_owned(),
        }
    }
}

impl PresenterConfig {
    /// Returns the emphasis rule of a column.
    pub fn rule(&self, column: ColumnKind) -> EmphasisRule {
        match column {
            ColumnKind::Ids => self.ids_emphasis,
            ColumnKind::Embeddings => self.embeddings_emphasis,
            ColumnKind::Metadata => self.metadata_emphasis,
            ColumnKind::Documents => self.documents_emphasis,
        }
    }

    /// Sets the emphasis rule of a column.
    pub fn with_rule(mut self, column: ColumnKind, rule: EmphasisRule) -> Self {
        match column {
            ColumnKind::Ids => self.ids_emphasis = rule,
            ColumnKind::Embeddings => self.embeddings_emphasis = rule,
            ColumnKind::Metadata => self.metadata_emphasis = rule,
            ColumnKind::Documents => self.documents_emphasis = rule,
        }
        self
    }

    /// Sets the number of embedding components shown in a cell.
    pub fn with_embedding_preview(mut self, components: usize) -> Self {
        self.embedding_preview = components;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules() {
        let config = PresenterConfig::default();
        assert_eq!(config.rule(ColumnKind::Ids), EmphasisRule::Lexical);
        assert_eq!(config.rule(ColumnKind::Embeddings), EmphasisRule::Norm);
        assert_eq!(config.rule(ColumnKind::Metadata), EmphasisRule::Off);
        assert_eq!(config.rule(ColumnKind::Documents), EmphasisRule::Length);
        assert_eq!(config.emphasis_style, DEFAULT_EMPHASIS_STYLE);
    }

    #[test]
    fn rules_parse_from_lowercase() {
        assert_eq!("norm".parse::<EmphasisRule>().unwrap(), EmphasisRule::Norm);
        assert_eq!(EmphasisRule::Length.to_string(), "length");
    }
}
