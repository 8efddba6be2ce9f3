use std::fmt;

use smallvec::SmallVec;

use crate::error::MappingError;
use crate::pattern::SEPARATOR;
use crate::segment::Segment;

/// Path segments kept inline before spilling to the heap.
pub const MAX_INLINE_SEGMENTS: usize = 8;

/// Borrowed, non-empty path segments of a request path.
pub type PathSegments<'a> = SmallVec<[&'a str; MAX_INLINE_SEGMENTS]>;

/// Split a request path into its non-empty segments.
///
/// Leading, trailing and doubled separators produce no segments, and anything
/// from the first `?` on is ignored.
#[must_use]
pub fn split_path(path: &str) -> PathSegments<'_> {
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// A parsed URL template.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Parse `template` into its ordered segments.
    pub fn parse(template: &str) -> Result<Self, MappingError> {
        let segments = template
            .split(SEPARATOR)
            .filter(|token| !token.is_empty())
            .map(|token| {
                Segment::parse(token).map_err(|err| match err {
                    MappingError::InvalidTemplate { reason, .. } => MappingError::invalid_template(
                        template,
                        format!("segment '{}': {}", token, reason),
                    ),
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    /// Number of segments.
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All placeholder names, in template order.
    #[must_use]
    pub fn variable_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .flat_map(|s| s.variable_names())
            .collect()
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
