use std::fmt;

use regex::Regex;
use tracing::trace;

use crate::error::MappingError;
use crate::pattern::{self, SEPARATOR};

use super::{Bindings, FixedSegment, Segment, VariableSegment};

/// One path segment made of literal runs and placeholders, e.g. `{year}-{month}-{day}`.
///
/// The sub-segment list and the combined regex are derived once, in [`MultiSegment::new`],
/// and never change afterwards.
#[derive(Debug, Clone)]
pub struct MultiSegment {
    text: String,
    sub_segments: Vec<Segment>,
    pattern: Regex,
}

impl MultiSegment {
    /// Lex `text` into alternating fixed and variable sub-segments.
    pub fn new(text: &str) -> Result<Self, MappingError> {
        if text.is_empty() {
            return Err(MappingError::invalid_template(text, "empty segment"));
        }
        if text.contains(SEPARATOR) {
            return Err(MappingError::invalid_template(
                text,
                "segment contains a path separator",
            ));
        }
        if let Some(reason) = pattern::brace_error(text) {
            return Err(MappingError::invalid_template(text, reason));
        }

        let mut sub_segments = Vec::new();
        let mut literal_start = 0;

        for placeholder in pattern::placeholders(text) {
            if placeholder.start > literal_start {
                let literal = &text[literal_start..placeholder.start];
                sub_segments.push(Segment::Fixed(FixedSegment::new(literal)?));
            }
            sub_segments.push(Segment::Variable(VariableSegment::named(placeholder.name)?));
            literal_start = placeholder.end;
        }

        if literal_start < text.len() {
            sub_segments.push(Segment::Fixed(FixedSegment::new(&text[literal_start..])?));
        }

        let pattern = pattern::anchored(sub_segments.iter().map(Segment::pattern))
            .map_err(|e| MappingError::invalid_template(text, e.to_string()))?;

        trace!(
            segment = %text,
            sub_segments = sub_segments.len(),
            pattern = %pattern.as_str(),
            "Multi segment compiled"
        );

        Ok(Self {
            text: text.to_string(),
            sub_segments,
            pattern,
        })
    }

    #[must_use]
    pub fn sub_segments(&self) -> &[Segment] {
        &self.sub_segments
    }

    /// The combined, anchored expression.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// `1` when the combined pattern matches the whole of `actual`.
    #[must_use]
    pub fn score(&self, actual: &str) -> u32 {
        u32::from(self.pattern.is_match(actual))
    }

    /// Walk the sub-segments in order, each consuming the next piece of `actual`.
    ///
    /// Does nothing when `actual` does not match; callers gate on [`score`](Self::score).
    pub fn bind(&self, bindings: &mut Bindings, actual: &str) {
        let Some(captures) = self.pattern.captures(actual) else {
            return;
        };

        let mut consumed = 0;
        for (index, sub_segment) in self.sub_segments.iter().enumerate() {
            if let Some(piece) = captures.get(index + 1) {
                sub_segment.bind(bindings, &actual[consumed..piece.end()]);
                consumed = piece.end();
            }
        }
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sub_segments.iter().filter_map(|s| match s {
            Segment::Variable(v) => Some(v.name()),
            _ => None,
        })
    }
}

impl PartialEq for MultiSegment {
    fn eq(&self, other: &Self) -> bool {
        self.sub_segments == other.sub_segments
    }
}

impl fmt::Display for MultiSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
