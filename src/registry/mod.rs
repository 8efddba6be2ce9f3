//! # Registry Module
//!
//! Parses URL templates into segment sequences and stores one [`UrlMapping`] per
//! `(segment count, verb)` key.
//!
//! ## Overview
//!
//! The registry is built once, at startup, and is read-only afterwards:
//!
//! 1. **Registration**: a template such as `/books/{id}` is split on `/`, empty
//!    tokens are dropped and each remaining token is classified as a fixed,
//!    variable or multi segment. The mapping is stored under its arity and verb.
//! 2. **Lookup**: an incoming path is split the same way. Each segment loses its
//!    `;name=value` matrix parameters and is percent-decoded, so `/menu/caf%C3%A9`
//!    matches the template `/menu/café`. The segment count and the request verb
//!    select at most one candidate mapping.
//! 3. **Match**: every positional segment of the candidate must score non-zero
//!    against the corresponding path segment.
//! 4. **Bind**: the matched mapping extracts placeholder values into a fresh
//!    [`Bindings`](crate::segment::Bindings) map.
//!
//! ## Key collisions
//!
//! Because the key is only `(arity, verb)`, `/books/{id}` and `/users/{id}` collide
//! for `GET`. [`Registry::register`] replaces the earlier mapping and logs a warning;
//! [`Registry::try_register`] refuses with
//! [`MappingError::DuplicateMapping`](crate::MappingError::DuplicateMapping).
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use restmapper::registry::Registry;
//!
//! let mut registry = Registry::new();
//! registry.register("/archive/{year}-{month}-{day}", Method::GET, "archive_day").unwrap();
//!
//! let matched = registry.find(&Method::GET, "/archive/2024-06-01").unwrap();
//! assert_eq!(matched.mapping.handler().as_ref(), "archive_day");
//! assert_eq!(matched.bindings["month"], "06");
//! ```

mod core;
mod mapping;
mod request;
mod template;

pub use self::core::{Registry, RouteMatch};
pub use mapping::{HandlerId, MappingKey, UrlMapping};
pub use request::{MatrixParam, MatrixParams, RequestPath};
pub use template::{split_path, PathSegments, UrlTemplate, MAX_INLINE_SEGMENTS};
