use std::borrow::Cow;
use std::fmt;

use crate::error::MappingError;
use crate::pattern;

use super::{Bindings, FixedSegment, MultiSegment, VariableSegment};

/// One `/`-delimited component of a URL template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Exact literal text
    Fixed(FixedSegment),
    /// A whole-segment `{name}` placeholder
    Variable(VariableSegment),
    /// Literal text and placeholders sharing one segment
    Multi(MultiSegment),
}

impl Segment {
    /// Classify a template token.
    ///
    /// A token that is entirely one placeholder becomes [`Segment::Variable`], a token
    /// containing placeholders among other text becomes [`Segment::Multi`], and
    /// anything else is [`Segment::Fixed`].
    pub fn parse(token: &str) -> Result<Segment, MappingError> {
        if let Some(reason) = pattern::brace_error(token) {
            return Err(MappingError::invalid_template(token, reason));
        }
        if pattern::single_placeholder(token).is_some() {
            return VariableSegment::new(token).map(Segment::Variable);
        }
        if pattern::placeholders(token).next().is_some() {
            return MultiSegment::new(token).map(Segment::Multi);
        }
        FixedSegment::new(token).map(Segment::Fixed)
    }

    /// Match weight of `actual` against this segment: `1` or `0`.
    #[must_use]
    pub fn score(&self, actual: &str) -> u32 {
        match self {
            Segment::Fixed(s) => s.score(actual),
            Segment::Variable(s) => s.score(actual),
            Segment::Multi(s) => s.score(actual),
        }
    }

    /// Record the variable values `actual` carries for this segment.
    pub fn bind(&self, bindings: &mut Bindings, actual: &str) {
        match self {
            Segment::Fixed(s) => s.bind(bindings, actual),
            Segment::Variable(s) => s.bind(bindings, actual),
            Segment::Multi(s) => s.bind(bindings, actual),
        }
    }

    /// Regex fragment recognising this segment.
    #[must_use]
    pub fn pattern(&self) -> Cow<'_, str> {
        match self {
            Segment::Fixed(s) => Cow::Owned(s.pattern()),
            Segment::Variable(s) => Cow::Borrowed(s.pattern()),
            Segment::Multi(s) => Cow::Borrowed(s.pattern()),
        }
    }

    /// Placeholder names in template order.
    pub fn variable_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Segment::Fixed(_) => Box::new(std::iter::empty()),
            Segment::Variable(s) => Box::new(std::iter::once(s.name())),
            Segment::Multi(s) => Box::new(s.variable_names()),
        }
    }

    /// Variant name: `fixed`, `variable` or `multi`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Segment::Fixed(_) => "fixed",
            Segment::Variable(_) => "variable",
            Segment::Multi(_) => "multi",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Segment::Fixed(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Fixed(s) => s.fmt(f),
            Segment::Variable(s) => s.fmt(f),
            Segment::Multi(s) => s.fmt(f),
        }
    }
}
