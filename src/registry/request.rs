use std::borrow::Cow;

use smallvec::SmallVec;

use super::template::{split_path, PathSegments, MAX_INLINE_SEGMENTS};

/// Separator between a path segment and its matrix parameters.
const MATRIX_SEPARATOR: char = ';';

/// A `;name=value` parameter carried by one request path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixParam {
    /// Zero-based index of the segment the parameter was attached to
    pub segment: usize,
    pub name: String,
    /// Empty when the parameter has no `=value` part
    pub value: String,
}

/// Matrix parameters of a request path, in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixParams {
    params: Vec<MatrixParam>,
}

impl MatrixParams {
    /// First value named `name` on segment `segment`.
    #[must_use]
    pub fn get(&self, segment: usize, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.segment == segment && p.name == name)
            .map(|p| p.value.as_str())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatrixParam> {
        self.params.iter()
    }

    fn extend_from_segment(&mut self, segment: usize, params: &str, decode: bool) {
        for pair in params.split(MATRIX_SEPARATOR).filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            self.params.push(MatrixParam {
                segment,
                name: decode_text(name, decode).into_owned(),
                value: decode_text(value, decode).into_owned(),
            });
        }
    }
}

/// A request path prepared for matching.
///
/// Each segment produced by [`split_path`] loses its matrix suffix (`;name=value`)
/// first and is then percent-decoded when `decode` is set. Decoding happens per
/// segment, so an encoded `%2F` or `%3B` stays inside its segment.
#[derive(Debug, Clone)]
pub struct RequestPath<'a> {
    segments: SmallVec<[Cow<'a, str>; MAX_INLINE_SEGMENTS]>,
    matrix: MatrixParams,
}

impl<'a> RequestPath<'a> {
    #[must_use]
    pub fn parse(path: &'a str, decode: bool) -> Self {
        let mut segments: SmallVec<[Cow<'a, str>; MAX_INLINE_SEGMENTS]> = SmallVec::new();
        let mut matrix = MatrixParams::default();
        for raw in split_path(path) {
            let token = match raw.split_once(MATRIX_SEPARATOR) {
                Some((token, params)) => {
                    matrix.extend_from_segment(segments.len(), params, decode);
                    token
                }
                None => raw,
            };
            segments.push(decode_text(token, decode));
        }
        Self { segments, matrix }
    }

    /// Number of segments, matrix-only segments included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment text to score and bind against.
    #[must_use]
    pub fn segments(&self) -> PathSegments<'_> {
        self.segments.iter().map(AsRef::as_ref).collect()
    }

    #[inline]
    #[must_use]
    pub fn matrix(&self) -> &MatrixParams {
        &self.matrix
    }

    #[must_use]
    pub fn into_matrix(self) -> MatrixParams {
        self.matrix
    }
}

/// Text that is not valid UTF-8 once decoded is kept as sent.
fn decode_text(text: &str, decode: bool) -> Cow<'_, str> {
    if !decode {
        return Cow::Borrowed(text);
    }
    urlencoding::decode(text).unwrap_or(Cow::Borrowed(text))
}
