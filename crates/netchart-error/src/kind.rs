//! Error kinds for netchart operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Every failure in the pipeline is fatal to the call, so kinds only
/// categorize; there is no retry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid configuration or parameters
    ConfigInvalid,

    /// Invalid argument passed to function
    InvalidArgument,

    // =========================================================================
    // Graph errors
    // =========================================================================
    /// Layout function failed to produce positions
    LayoutFailed,

    /// A node has no entry in the position mapping
    PositionNotFound,

    // =========================================================================
    // Table errors
    // =========================================================================
    /// Column not present in the table
    ColumnNotFound,

    /// Column already present in the table
    DuplicateColumn,

    /// Attribute key collides with a column the builder owns
    ReservedColumn,

    /// Column length does not match the table's row count
    LengthMismatch,

    /// Edge endpoint does not resolve to a node row
    DanglingEndpoint,

    // =========================================================================
    // Chart errors
    // =========================================================================
    /// Dataset larger than the configured row limit
    MaxRowsExceeded,

    // =========================================================================
    // Serialization / IO errors
    // =========================================================================
    /// Serialization failed
    SerializationFailed,

    /// Invalid input format
    InvalidFormat,

    /// File not found
    FileNotFound,

    /// IO operation failed
    IoFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
