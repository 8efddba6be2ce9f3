//! # Segment Module
//!
//! A URL template is a sequence of segments, one per `/`-delimited component.
//! Each segment is one of three variants:
//!
//! | Variant | Template | Matches | Binds |
//! |---|---|---|---|
//! | [`Segment::Fixed`] | `users` | exactly `users` | nothing |
//! | [`Segment::Variable`] | `{id}` | any non-empty value | `id` |
//! | [`Segment::Multi`] | `{name}-{id}.json` | `bob-5.json` | `name`, `id` |
//!
//! Every segment can:
//!
//! 1. produce the regex fragment that recognises it ([`Segment::pattern`]),
//! 2. score an actual path segment against itself ([`Segment::score`], `1` or `0`),
//! 3. bind extracted values into a [`Bindings`] map ([`Segment::bind`]).
//!
//! Scoring is deliberately permissive for variables: any non-empty,
//! separator-free value is accepted. Type checking happens later, when bound
//! values are converted into handler arguments.
//!
//! ## Multi segments
//!
//! A multi segment mixes literal text and placeholders inside one path segment.
//! Its sub-segments are lexed from the template once, at construction, and their
//! fragments are compiled into a single anchored regex. When two variables are
//! adjacent with no literal between them, the earlier variable consumes the
//! shortest possible value:
//!
//! ```rust
//! use restmapper::segment::{Bindings, Segment};
//!
//! let seg = Segment::parse("{a}{b}").unwrap();
//! let mut bindings = Bindings::new();
//! seg.bind(&mut bindings, "xyz");
//! assert_eq!(bindings["a"], "x");
//! assert_eq!(bindings["b"], "yz");
//! ```

mod core;
mod fixed;
mod multi;
#[cfg(test)]
mod tests;
mod variable;

use std::collections::HashMap;

pub use self::core::Segment;
pub use fixed::FixedSegment;
pub use multi::MultiSegment;
pub use variable::VariableSegment;

/// Placeholder name to raw extracted value, built fresh for every request.
///
/// Binding the same name twice keeps the last value.
pub type Bindings = HashMap<String, String>;
