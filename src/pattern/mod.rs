//! # Pattern Module
//!
//! Lexical building blocks shared by every segment type.
//!
//! A URL template segment is compiled into a regular expression assembled from a
//! small set of atoms:
//!
//! - [`value()`] - one or more characters that are not the path separator
//! - [`literal()`] - an exact, escaped run of template text
//! - [`placeholders()`] - the lexer that finds `{name}` placeholders in template text;
//!   a name is an identifier (`[A-Za-z_][A-Za-z0-9_]*`)
//!
//! [`anchored()`] concatenates atoms into a single expression anchored at both ends,
//! wrapping every atom in its own capture group so callers can recover the span each
//! atom consumed. Patterns are compiled once, when a template is registered, and are
//! shared read-only afterwards.

mod core;

pub use self::core::{
    anchored, brace_error, is_identifier, literal, placeholders, single_placeholder, value,
    Placeholder, SEPARATOR,
};
