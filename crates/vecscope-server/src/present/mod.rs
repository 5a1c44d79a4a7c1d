//! Tabular rendering of record sets with per-column maximum emphasis.

mod config;
mod emphasis;
mod table;

pub use self::config::{
    DEFAULT_EMBEDDING_PREVIEW, DEFAULT_EMPHASIS_STYLE, EmphasisRule, PresenterConfig,
};
pub use self::table::{
    ColumnKind, PresentError, RenderedTable, TableCell, TablePresenter, TableRow,
};
