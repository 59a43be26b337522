use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::content::frontmatter_format::FrontmatterFormat;

/// Failure to turn frontmatter text into a post.
///
/// Callers tell the kinds apart by message, e.g. `Frontmatter not found.`,
/// `'title' key is missing.`, `Error in TOML Frontmatter: ...` or `Content not found.`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PostDecodeError {
    message: String,
}

impl PostDecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        PostDecodeError { message: message.into() }
    }

    pub fn frontmatter_not_found() -> Self {
        Self::new("Frontmatter not found.")
    }

    pub fn content_not_found() -> Self {
        Self::new("Content not found.")
    }

    pub fn missing_key(key: &str) -> Self {
        Self::new(format!("'{}' key is missing.", key))
    }

    pub fn invalid_key(key: &str, expected: &str) -> Self {
        Self::new(format!("'{}' key is invalid: expected {}.", key, expected))
    }

    pub fn empty_key(key: &str) -> Self {
        Self::new(format!("'{}' key is empty.", key))
    }

    pub fn parser(format: FrontmatterFormat, detail: impl std::fmt::Display) -> Self {
        Self::new(format!("Error in {} Frontmatter: {}", format, detail))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
pub enum PostError {
    #[error("No such file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Is a directory: {}", .0.display())]
    IsADirectory(PathBuf),

    #[error(transparent)]
    Decode(#[from] PostDecodeError),

    #[error("Error encoding {format} Frontmatter: {message}")]
    Encode { format: FrontmatterFormat, message: String },

    #[error("Error accessing {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl PostError {
    pub fn io(path: &std::path::Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => PostError::NotFound(path.to_path_buf()),
            io::ErrorKind::IsADirectory => PostError::IsADirectory(path.to_path_buf()),
            _ => PostError::Io { path: path.to_path_buf(), source },
        }
    }

    /// Returns the decode error when this is one.
    pub fn as_decode(&self) -> Option<&PostDecodeError> {
        match self {
            PostError::Decode(e) => Some(e),
            _ => None,
        }
    }
}
