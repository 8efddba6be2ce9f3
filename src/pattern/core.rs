use once_cell::sync::Lazy;
use regex::Regex;

/// Path separator used to split templates and request paths.
pub const SEPARATOR: char = '/';

/// Lazy so that, when two variables share a segment, the earlier one consumes
/// as little as possible and the last one takes the remainder.
const VALUE: &str = "[^/]+?";

#[allow(clippy::expect_used)]
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid"));

/// A `{name}` placeholder found in template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// Placeholder name without braces
    pub name: &'t str,
    /// Byte offset of the opening brace
    pub start: usize,
    /// Byte offset one past the closing brace
    pub end: usize,
}

/// Regex fragment for a variable value: one or more non-separator characters.
#[inline]
#[must_use]
pub fn value() -> &'static str {
    VALUE
}

/// Regex fragment matching `text` verbatim.
#[must_use]
pub fn literal(text: &str) -> String {
    regex::escape(text)
}

/// Iterate the placeholders of `text` from left to right.
pub fn placeholders(text: &str) -> impl Iterator<Item = Placeholder<'_>> + '_ {
    PLACEHOLDER.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let name = caps.get(1)?;
        Some(Placeholder {
            name: name.as_str(),
            start: whole.start(),
            end: whole.end(),
        })
    })
}

/// Returns the placeholder name when `token` is exactly one placeholder.
#[must_use]
pub fn single_placeholder(token: &str) -> Option<&str> {
    let mut found = placeholders(token);
    match (found.next(), found.next()) {
        (Some(p), None) if p.start == 0 && p.end == token.len() => Some(p.name),
        _ => None,
    }
}

/// True when `name` is a valid placeholder name: an ASCII letter or `_`
/// followed by ASCII letters, digits or `_`.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Checks the brace structure of a template token.
///
/// Returns the reason the token is malformed, or `None` when every `{` is closed
/// by a `}` around an identifier and no placeholder nests inside another.
#[must_use]
pub fn brace_error(token: &str) -> Option<&'static str> {
    let mut name_start: Option<usize> = None;
    for (i, c) in token.char_indices() {
        match (c, name_start) {
            ('{', Some(_)) => return Some("nested braces in placeholder"),
            ('{', None) => name_start = Some(i + 1),
            ('}', None) => return Some("closing brace without a matching '{'"),
            ('}', Some(start)) => {
                let name = &token[start..i];
                if name.is_empty() {
                    return Some("empty placeholder name");
                }
                if !is_identifier(name) {
                    return Some("placeholder name is not an identifier");
                }
                name_start = None;
            }
            _ => {}
        }
    }
    name_start.map(|_| "unclosed placeholder")
}

/// Compile `fragments` into one expression matching a whole segment.
///
/// Every fragment becomes capture group `i + 1`, in order.
pub fn anchored<I, S>(fragments: I) -> Result<Regex, regex::Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pattern = String::from("^");
    for fragment in fragments {
        pattern.push('(');
        pattern.push_str(fragment.as_ref());
        pattern.push(')');
    }
    pattern.push('$');
    Regex::new(&pattern)
}
