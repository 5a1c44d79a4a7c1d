//! [`Error`], [`ErrorKind`] and [`Result`].

mod action_error;
mod http_error;
mod render_error;

pub use http_error::{Error, ErrorKind, Result};
