//! Rendered tables and the presenter that builds them.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use vecscope_chroma::{Metadata, RecordSet};

use super::config::PresenterConfig;
use super::emphasis;

/// Tracing target for table rendering.
const TRACING_TARGET: &str = "vecscope_server::present";

/// Column of a rendered table, in display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColumnKind {
    Ids,
    Embeddings,
    Metadata,
    Documents,
}

impl ColumnKind {
    /// All columns in display order.
    pub const ALL: [Self; 4] = [Self::Ids, Self::Embeddings, Self::Metadata, Self::Documents];
}

/// Reason a record set could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresentError {
    /// A column does not hold one entry per identifier.
    #[error("column '{column}' holds {actual} entries but there are {expected} ids")]
    Misaligned {
        column: ColumnKind,
        expected: usize,
        actual: usize,
    },
}

/// One cell of a rendered table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub text: String,
    pub emphasized: bool,
}

/// One row of a rendered table, cells in [`ColumnKind::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: [TableCell; 4],
}

impl TableRow {
    /// Returns the cell of the given column.
    pub fn cell(&self, column: ColumnKind) -> &TableCell {
        &self.cells[column as usize]
    }
}

/// A record set rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTable {
    pub columns: [ColumnKind; 4],
    pub rows: Vec<TableRow>,
}

impl RenderedTable {
    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row indexes emphasized in a column.
    pub fn emphasized_rows(&self, column: ColumnKind) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.cell(column).emphasized)
            .map(|(index, _)| index)
            .collect()
    }
}

/// Turns record sets into [`RenderedTable`]s.
#[derive(Debug, Clone, Default)]
pub struct TablePresenter {
    config: PresenterConfig,
}

impl TablePresenter {
    /// Creates a presenter with the given display options.
    pub fn new(config: PresenterConfig) -> Self {
        Self { config }
    }

    /// Returns the display options.
    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    /// Renders a record set, one row per identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PresentError::Misaligned`] when a column length differs from
    /// the number of identifiers.
    pub fn present(&self, records: &RecordSet) -> Result<RenderedTable, PresentError> {
        let expected = records.ids.len();
        let lengths = [
            (ColumnKind::Embeddings, records.embeddings.len()),
            (ColumnKind::Metadata, records.metadatas.len()),
            (ColumnKind::Documents, records.documents.len()),
        ];
        if let Some(&(column, actual)) = lengths.iter().find(|(_, len)| *len != expected) {
            return Err(PresentError::Misaligned {
                column,
                expected,
                actual,
            });
        }

        let ids: Vec<Option<&str>> = records.ids.iter().map(|id| Some(id.as_str())).collect();
        let emphasis = [
            emphasis::text(&ids, self.config.rule(ColumnKind::Ids)),
            emphasis::embeddings(
                &records.embeddings,
                self.config.rule(ColumnKind::Embeddings),
            ),
            emphasis::metadata(&records.metadatas, self.config.rule(ColumnKind::Metadata)),
            emphasis::text(&records.documents, self.config.rule(ColumnKind::Documents)),
        ];

        let rows = (0..expected)
            .map(|index| TableRow {
                cells: [
                    cell(records.ids[index].clone(), emphasis[0][index]),
                    cell(
                        records.embeddings[index]
                            .as_deref()
                            .map(|e| self.embedding_text(e))
                            .unwrap_or_default(),
                        emphasis[1][index],
                    ),
                    cell(
                        records.metadatas[index]
                            .as_ref()
                            .map(compact_json)
                            .unwrap_or_default(),
                        emphasis[2][index],
                    ),
                    cell(
                        records.documents[index].clone().unwrap_or_default(),
                        emphasis[3][index],
                    ),
                ],
            })
            .collect::<Vec<_>>();

        tracing::trace!(target: TRACING_TARGET, rows = rows.len(), "Record set rendered");

        Ok(RenderedTable {
            columns: ColumnKind::ALL,
            rows,
        })
    }

    /// Formats the leading components of an embedding and its dimension.
    fn embedding_text(&self, embedding: &[f32]) -> String {
        let shown = embedding.len().min(self.config.embedding_preview);
        let mut text = String::from("[");
        for (index, component) in embedding[..shown].iter().enumerate() {
            if index > 0 {
                text.push_str(", ");
            }
            let _ = write!(text, "{component}");
        }
        if shown < embedding.len() {
            text.push_str(if shown == 0 { "…" } else { ", …" });
        }
        let _ = write!(text, "] ({} dims)", embedding.len());
        text
    }
}

fn cell(text: String, emphasized: bool) -> TableCell {
    TableCell { text, emphasized }
}

/// Serializes metadata without whitespace.
pub(crate) fn compact_json(metadata: &Metadata) -> String {
    serde_json::to_string(metadata).unwrap_or_default()
}
