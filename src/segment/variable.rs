use std::fmt;

use crate::error::MappingError;
use crate::pattern::{self, SEPARATOR};

use super::Bindings;

/// Segment that accepts any single value and binds it under a placeholder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSegment {
    name: String,
}

impl VariableSegment {
    /// Create a variable segment from a `{name}` token.
    pub fn new(token: &str) -> Result<Self, MappingError> {
        if let Some(reason) = pattern::brace_error(token) {
            return Err(MappingError::invalid_template(token, reason));
        }
        match pattern::single_placeholder(token) {
            Some(name) => Self::named(name).map_err(|_| {
                MappingError::invalid_template(token, "invalid placeholder name")
            }),
            None => Err(MappingError::invalid_template(
                token,
                "expected a single '{name}' placeholder",
            )),
        }
    }

    /// Create a variable segment from a bare placeholder name.
    pub fn named(name: &str) -> Result<Self, MappingError> {
        if name.is_empty() {
            return Err(MappingError::invalid_template(name, "empty placeholder name"));
        }
        if !pattern::is_identifier(name) {
            return Err(MappingError::invalid_template(
                name,
                "placeholder name is not an identifier",
            ));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `1` for any non-empty value without a separator, `0` otherwise.
    #[inline]
    #[must_use]
    pub fn score(&self, actual: &str) -> u32 {
        u32::from(!actual.is_empty() && !actual.contains(SEPARATOR))
    }

    /// Insert `name -> actual`, replacing any previous value for the name.
    pub fn bind(&self, bindings: &mut Bindings, actual: &str) {
        bindings.insert(self.name.clone(), actual.to_string());
    }

    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &'static str {
        pattern::value()
    }
}

impl fmt::Display for VariableSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.name)
    }
}
