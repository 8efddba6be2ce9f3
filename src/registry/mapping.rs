use std::sync::Arc;

use http::Method;

use crate::error::MappingError;
use crate::segment::{Bindings, Segment};

use super::template::UrlTemplate;

/// Opaque identity of the handler a mapping resolves to.
///
/// `Arc<str>` keeps clones O(1); names are fixed once registration is done.
pub type HandlerId = Arc<str>;

/// Registry key: a mapping is unique per segment count and verb.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingKey {
    pub arity: usize,
    pub verb: Method,
}

/// A URL template bound to a verb and a handler.
#[derive(Debug, Clone)]
pub struct UrlMapping {
    verb: Method,
    template: UrlTemplate,
    handler: HandlerId,
}

impl UrlMapping {
    /// Parse `template` and bind it to `verb` and `handler`.
    pub fn new(
        template: &str,
        verb: Method,
        handler: impl Into<HandlerId>,
    ) -> Result<Self, MappingError> {
        Ok(Self {
            verb,
            template: UrlTemplate::parse(template)?,
            handler: handler.into(),
        })
    }

    #[must_use]
    pub fn key(&self) -> MappingKey {
        MappingKey {
            arity: self.arity(),
            verb: self.verb.clone(),
        }
    }

    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.template.arity()
    }

    #[inline]
    #[must_use]
    pub fn verb(&self) -> &Method {
        &self.verb
    }

    #[inline]
    #[must_use]
    pub fn handler(&self) -> &HandlerId {
        &self.handler
    }

    #[inline]
    #[must_use]
    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        self.template.segments()
    }

    /// Total score of `actual` against this mapping.
    ///
    /// `None` unless the segment counts agree and every segment scores non-zero;
    /// the segments are combined with a logical AND, not a weighted sum.
    #[must_use]
    pub fn score(&self, actual: &[&str]) -> Option<u32> {
        if actual.len() != self.arity() {
            return None;
        }
        self.template
            .segments()
            .iter()
            .zip(actual)
            .try_fold(0u32, |total, (segment, value)| match segment.score(value) {
                0 => None,
                s => Some(total + s),
            })
    }

    #[inline]
    #[must_use]
    pub fn matches(&self, actual: &[&str]) -> bool {
        self.score(actual).is_some()
    }

    /// Bind every segment against `actual`, left to right.
    ///
    /// Only meaningful after [`matches`](Self::matches) returned `true`.
    #[must_use]
    pub fn bind(&self, actual: &[&str]) -> Bindings {
        let mut bindings = Bindings::new();
        for (segment, value) in self.template.segments().iter().zip(actual) {
            segment.bind(&mut bindings, value);
        }
        bindings
    }

    /// Placeholder names in template order.
    #[must_use]
    pub fn variable_names(&self) -> Vec<&str> {
        self.template.variable_names()
    }
}
