use thiserror::Error;

/// Unified error type for relkit operations
#[derive(Error, Debug)]
pub enum RelkitError {
    #[error("Invalid version string: {0}")]
    InvalidVersionString(String),

    #[error("Invalid release branch: {0}")]
    InvalidReleaseBranch(String),

    #[error("Invalid sdk release tag: {0}")]
    InvalidSdkReleaseTag(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in relkit
pub type Result<T> = std::result::Result<T, RelkitError>;

impl RelkitError {
    /// Create an invalid-version error naming the offending string
    pub fn invalid_version(version: impl Into<String>) -> Self {
        RelkitError::InvalidVersionString(version.into())
    }

    /// Create an invalid-release-branch error naming the offending branch
    pub fn invalid_branch(branch: impl Into<String>) -> Self {
        RelkitError::InvalidReleaseBranch(branch.into())
    }

    /// Create an invalid-sdk-tag error naming the offending tag
    pub fn invalid_sdk_tag(tag: impl Into<String>) -> Self {
        RelkitError::InvalidSdkReleaseTag(tag.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        RelkitError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        RelkitError::Remote(msg.into())
    }
}
