//! Request types for HTTP handlers.

mod database;

pub use database::{DatabaseRequest, PageAction, PageForm};
