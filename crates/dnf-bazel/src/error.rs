//! Error types for dnf-bazel

/// Result type for dnf-bazel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when loading or writing build files.
///
/// Rule synchronization itself never fails; only the surrounding file
/// handling does.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file is not a well-formed BUILD or WORKSPACE file
    #[error(transparent)]
    Parse(#[from] dnf_build::Error),

    /// Reading, writing or manifest loading failed
    #[error(transparent)]
    Fs(#[from] dnf_fs::Error),

    /// Writing the dry-run preview failed
    #[error("Failed to write preview: {0}")]
    Preview(#[from] std::io::Error),
}
