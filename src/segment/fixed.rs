use std::fmt;

use crate::error::MappingError;
use crate::pattern::{self, SEPARATOR};

use super::Bindings;

/// Segment that matches one exact literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSegment {
    literal: String,
}

impl FixedSegment {
    /// Create a fixed segment. The literal must be non-empty and separator-free.
    pub fn new(literal: &str) -> Result<Self, MappingError> {
        if literal.is_empty() {
            return Err(MappingError::invalid_template(literal, "empty literal segment"));
        }
        if literal.contains(SEPARATOR) {
            return Err(MappingError::invalid_template(
                literal,
                "literal segment contains a path separator",
            ));
        }
        Ok(Self {
            literal: literal.to_string(),
        })
    }

    #[inline]
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// `1` on exact equality, `0` otherwise.
    #[inline]
    #[must_use]
    pub fn score(&self, actual: &str) -> u32 {
        u32::from(actual == self.literal)
    }

    /// Literals consume text without binding anything.
    #[inline]
    pub fn bind(&self, _bindings: &mut Bindings, _actual: &str) {}

    #[must_use]
    pub fn pattern(&self) -> String {
        pattern::literal(&self.literal)
    }
}

impl fmt::Display for FixedSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}
