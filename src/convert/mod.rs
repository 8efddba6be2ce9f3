//! # Convert Module
//!
//! Turns raw textual values (bound path variables, query/header/cookie values) into
//! typed handler arguments.
//!
//! Handlers declare each parameter with a closed [`PrimitiveKind`]; a single
//! [`convert`] function dispatches on that kind and parses the text with the
//! standard library's `FromStr` implementations. Failures carry the raw text and the
//! target kind so the dispatcher can report them as a 400-equivalent outcome.
//!
//! ```rust
//! use restmapper::convert::{convert, ArgValue, PrimitiveKind};
//!
//! assert_eq!(convert("42", PrimitiveKind::Int).unwrap(), ArgValue::Int(42));
//! assert_eq!(convert("TRUE", PrimitiveKind::Boolean).unwrap(), ArgValue::Bool(true));
//! assert!(convert("abc", PrimitiveKind::Int).is_err());
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use self::core::{convert, ArgValue, ConversionError, PrimitiveKind};
