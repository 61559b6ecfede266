//! Error types for tag resolution
//!
//! Data that does not match its declared shape is never an error here; it
//! is a `false` from a predicate and an entry in a failure report. The only
//! error is a declaration naming a tag outside the vocabulary.
//!
//! Copyright (c) 2025 Shapetag Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Configuration error: a declaration references a tag that does not exist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The tag is not part of the registered vocabulary
    #[error("Unknown data type for check '{tag}'")]
    UnknownTag {
        /// The offending tag name
        tag: String,
    },
}

impl ConfigError {
    /// Create an unknown tag error
    pub fn unknown_tag(tag: impl Into<String>) -> Self {
        Self::UnknownTag { tag: tag.into() }
    }
}

/// Result type for tag resolution
pub type ConfigResult<T> = Result<T, ConfigError>;
