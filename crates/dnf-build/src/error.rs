//! Error types for dnf-build

/// Result type for dnf-build operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dnf-build operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The source is not a well-formed BUILD or WORKSPACE file
    #[error("Failed to parse {path}:{line}:{column}: {message}")]
    ParseError {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },
}

impl Error {
    pub fn parse(
        path: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::ParseError {
            path: path.into(),
            line,
            column,
            message: message.into(),
        }
    }
}
