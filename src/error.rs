use std::fmt;

use http::{Method, StatusCode};

use crate::convert::ConversionError;

/// Errors produced while registering URL templates or dispatching requests.
///
/// `InvalidTemplate`, `DuplicateMapping` and `UnknownHandler` are raised at
/// registration time and should stop startup. The remaining variants are
/// per-request outcomes the host turns into a response via [`MappingError::status`].
#[derive(Debug)]
pub enum MappingError {
    /// A template contains malformed placeholder syntax or an empty literal.
    InvalidTemplate {
        /// The offending template text
        template: String,
        /// Human readable reason
        reason: String,
    },
    /// No registered mapping matches the verb and path.
    NotFound {
        /// Request verb
        verb: Method,
        /// Request path
        path: String,
    },
    /// A bound or external value could not be parsed into the declared type.
    Conversion {
        /// Declared parameter name
        param: String,
        /// Underlying conversion failure (carries the raw text)
        source: ConversionError,
    },
    /// A required parameter has no value to bind.
    MissingParameter {
        /// Declared parameter name
        param: String,
    },
    /// The request body could not be decoded for a body-sourced parameter.
    Body {
        /// Declared parameter name
        param: String,
        /// Decoder failure
        source: anyhow::Error,
    },
    /// The caller holds none of the roles the mapping requires.
    Forbidden {
        /// Handler that refused the invocation
        handler: String,
    },
    /// A mapping refers to a handler that was never supplied.
    UnknownHandler {
        /// Handler name from the route definition
        handler: String,
    },
    /// Strict registration refused to replace an existing mapping.
    DuplicateMapping {
        /// Verb of the colliding key
        verb: Method,
        /// Segment count of the colliding key
        arity: usize,
        /// Template already registered under the key
        existing: String,
    },
    /// The resolved handler failed or panicked.
    Invocation {
        /// Handler name
        handler: String,
        /// Original cause
        source: anyhow::Error,
    },
}

impl MappingError {
    pub(crate) fn invalid_template(template: &str, reason: impl Into<String>) -> Self {
        MappingError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP status the host should answer with for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            MappingError::NotFound { .. } => StatusCode::NOT_FOUND,
            MappingError::Conversion { .. }
            | MappingError::MissingParameter { .. }
            | MappingError::Body { .. } => StatusCode::BAD_REQUEST,
            MappingError::Forbidden { .. } => StatusCode::FORBIDDEN,
            MappingError::InvalidTemplate { .. }
            | MappingError::UnknownHandler { .. }
            | MappingError::DuplicateMapping { .. }
            | MappingError::Invocation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for failures that happen while building the registry.
    #[must_use]
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            MappingError::InvalidTemplate { .. }
                | MappingError::UnknownHandler { .. }
                | MappingError::DuplicateMapping { .. }
        )
    }
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingError::InvalidTemplate { template, reason } => {
                write!(f, "invalid URL template '{}': {}", template, reason)
            }
            MappingError::NotFound { verb, path } => {
                write!(f, "no mapping found for {} {}", verb, path)
            }
            MappingError::Conversion { param, source } => {
                write!(f, "parameter '{}': {}", param, source)
            }
            MappingError::MissingParameter { param } => {
                write!(f, "missing value for required parameter '{}'", param)
            }
            MappingError::Body { param, source } => {
                write!(f, "cannot read request body into parameter '{}': {}", param, source)
            }
            MappingError::Forbidden { handler } => {
                write!(f, "invocation of '{}' is not authorized", handler)
            }
            MappingError::UnknownHandler { handler } => {
                write!(f, "no handler registered under the name '{}'", handler)
            }
            MappingError::DuplicateMapping {
                verb,
                arity,
                existing,
            } => write!(
                f,
                "a {} mapping with {} segment(s) is already registered: '{}'",
                verb, arity, existing
            ),
            MappingError::Invocation { handler, source } => {
                write!(f, "error invoking handler '{}': {}", handler, source)
            }
        }
    }
}

impl std::error::Error for MappingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MappingError::Conversion { source, .. } => Some(source),
            MappingError::Body { source, .. } | MappingError::Invocation { source, .. } => {
                Some(source.as_ref())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::PrimitiveKind;
    use std::error::Error;

    #[test]
    fn test_status_mapping() {
        let not_found = MappingError::NotFound {
            verb: Method::GET,
            path: "/nope".into(),
        };
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            MappingError::Forbidden {
                handler: "admin".into()
            }
            .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            MappingError::invalid_template("/{", "unclosed placeholder").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conversion_message_names_param_and_raw_text() {
        let err = MappingError::Conversion {
            param: "id".into(),
            source: ConversionError::new("abc", PrimitiveKind::Int, "invalid digit found in string"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'id'"), "{msg}");
        assert!(msg.contains("abc"), "{msg}");
        assert!(err.source().is_some());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invocation_preserves_cause() {
        let err = MappingError::Invocation {
            handler: "boom".into(),
            source: anyhow::anyhow!("database offline"),
        };
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("database offline".to_string())
        );
        assert!(!err.is_registration_error());
    }
}
