//! The main Error type for netchart.

use crate::ErrorKind;
use std::fmt;

/// Unified error type for all netchart operations.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the operation that caused this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Look up a single context value by key.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get the source error (if any).
    pub fn source_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_ref().map(|e| e.as_ref())
    }

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.kind, self.operation)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::new(ErrorKind::Unexpected, msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::new(ErrorKind::Unexpected, msg)
    }
}

impl Error {
    /// Create an Unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Create an InvalidFormat error
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }

    /// Create a PositionNotFound error
    pub fn position_not_found(node: impl Into<String>) -> Self {
        let node = node.into();
        Self::new(
            ErrorKind::PositionNotFound,
            format!("no position for node '{}'", node),
        )
        .with_context("node", node)
    }

    /// Create a ColumnNotFound error
    pub fn column_not_found(column: impl Into<String>) -> Self {
        let column = column.into();
        Self::new(
            ErrorKind::ColumnNotFound,
            format!("column '{}' not found", column),
        )
        .with_context("column", column)
    }

    /// Create a DuplicateColumn error
    pub fn duplicate_column(column: impl Into<String>) -> Self {
        let column = column.into();
        Self::new(
            ErrorKind::DuplicateColumn,
            format!("column '{}' already exists", column),
        )
        .with_context("column", column)
    }

    /// Create a ReservedColumn error
    pub fn reserved_column(column: impl Into<String>) -> Self {
        let column = column.into();
        Self::new(
            ErrorKind::ReservedColumn,
            format!("attribute '{}' collides with a reserved column", column),
        )
        .with_context("column", column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::ColumnNotFound, "missing");
        assert_eq!(err.kind(), ErrorKind::ColumnNotFound);
        assert_eq!(err.message(), "missing");
        assert_eq!(err.operation(), "");
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::new(ErrorKind::PositionNotFound, "not found")
            .with_operation("collect::node_table")
            .with_context("node", "A")
            .with_context("positions", "2");

        assert_eq!(err.operation(), "collect::node_table");
        assert_eq!(err.context().len(), 2);
        assert_eq!(err.context()[0], ("node", "A".to_string()));
        assert_eq!(err.context_value("positions"), Some("2"));
        assert_eq!(err.context_value("missing"), None);
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::new(ErrorKind::LayoutFailed, "failed")
            .with_operation("layout::resolve")
            .with_operation("collect::network_data");

        assert_eq!(err.operation(), "collect::network_data");
        assert_eq!(err.context().len(), 1);
        assert_eq!(err.context()[0], ("called", "layout::resolve".to_string()));
    }

    #[test]
    fn test_display() {
        let err = Error::new(ErrorKind::MaxRowsExceeded, "too many rows")
            .with_operation("chart::to_vega_lite")
            .with_context("rows", "6000");

        let display = format!("{}", err);
        assert!(display.contains("MaxRowsExceeded"));
        assert!(display.contains("chart::to_vega_lite"));
        assert!(display.contains("rows: 6000"));
        assert!(display.ends_with("=> too many rows"));
    }

    #[test]
    fn test_convenience_constructors() {
        let err = Error::position_not_found("B");
        assert_eq!(err.kind(), ErrorKind::PositionNotFound);
        assert!(err.message().contains("'B'"));
        assert_eq!(err.context_value("node"), Some("B"));

        let err = Error::reserved_column("node_id");
        assert_eq!(err.kind(), ErrorKind::ReservedColumn);

        let err = Error::column_not_found("weight");
        assert_eq!(err.kind(), ErrorKind::ColumnNotFound);
    }

    #[test]
    fn test_set_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::invalid_format("bad graph document").set_source(json_err);

        assert!(err.source_ref().is_some());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "graph.json");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.operation(), "io");
    }
}
