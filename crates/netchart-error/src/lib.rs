//! # netchart-error
//!
//! Unified error handling for netchart.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what went wrong (e.g., PositionNotFound, ColumnNotFound)
//! - **Error Context**: Assist in locating the cause (which node, which column)
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use netchart_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::PositionNotFound, "no position for node")
//!         .with_operation("collect::node_table")
//!         .with_context("node", "A"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All library functions return `Result<T, netchart_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using netchart Error
pub type Result<T> = std::result::Result<T, Error>;
