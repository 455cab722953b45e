// src/types.rs
//! Domain-specific newtypes for type safety and validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid tag name: {name} - {reason}")]
    InvalidTagName { name: String, reason: String },
}

/// A cell tag used to select which outputs survive the export.
///
/// Tags live in `metadata.tags` on disk and are compared verbatim, so the
/// newtype only rules out values that could never appear there: empty
/// strings and names with embedded whitespace or control characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagName(String);

impl TagName {
    /// Create a new tag name with validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ValidationError::InvalidTagName {
                name,
                reason: "tag name cannot be empty".to_string(),
            });
        }

        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::InvalidTagName {
                name,
                reason: "tag name cannot contain whitespace or control characters".to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Get the tag name as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
