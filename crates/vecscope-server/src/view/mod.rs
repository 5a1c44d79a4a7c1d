//! Server-rendered HTML of the inspector page.
//!
//! Markup lives in `templates/` and is rendered with [`minijinja`], which
//! escapes every interpolated value.

mod page;
mod templates;

pub use self::page::{Page, PageContent};
