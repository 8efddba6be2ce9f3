//! # Dispatcher Module
//!
//! Turns an incoming `(verb, path)` pair into a handler invocation.
//!
//! ## Flow
//!
//! 1. **Resolve**: the [`Registry`](crate::registry::Registry) strips matrix
//!    parameters from the path, percent-decodes each segment (unless disabled),
//!    selects the mapping for the segment count and verb and checks every segment.
//!    No mapping is [`MappingError::NotFound`](crate::MappingError::NotFound).
//! 2. **Authorize**: if the handler requires roles, the host's
//!    [`RequestContext::has_any_role`] must accept one of them.
//! 3. **Arguments**: each declared [`ParamDescriptor`] is filled in declaration
//!    order. Path parameters take the next placeholder binding in template order
//!    and are converted with [`convert`](crate::convert::convert). Matrix
//!    parameters are looked up by segment index on the matched path. Body
//!    parameters go through the [`BodyDecoder`]; query, header and cookie
//!    parameters come from the host through [`RequestContext::external`].
//! 4. **Invoke**: the handler runs under `catch_unwind`; errors and panics become
//!    [`MappingError::Invocation`](crate::MappingError::Invocation).
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use restmapper::convert::{ArgValue, PrimitiveKind};
//! use restmapper::dispatcher::{Dispatcher, EmptyContext, HandlerEntry, ParamDescriptor};
//! use serde_json::json;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher
//!     .register(
//!         "/books/{id}",
//!         Method::GET,
//!         HandlerEntry::new("get_book", |args: &[ArgValue]| {
//!             Ok(Some(json!({ "id": args[0].as_i64() })))
//!         })
//!         .param(ParamDescriptor::path("id", PrimitiveKind::Long)),
//!     )
//!     .unwrap();
//!
//! let done = dispatcher.dispatch(&Method::GET, "/books/42", &EmptyContext).unwrap();
//! assert_eq!(done.arguments[0], ArgValue::Long(42));
//! assert_eq!(done.result, Some(json!({ "id": 42 })));
//! ```

mod context;
mod core;
mod handler;
mod shared;

pub use self::core::{ArgVec, Dispatched, Dispatcher, MatchResult, MAX_INLINE_ARGS};
pub use context::{
    BodyDecoder, EmptyContext, JsonBodyDecoder, ParamDescriptor, ParamSource, RequestContext,
    StaticContext,
};
pub use handler::{Handler, HandlerEntry};
pub use shared::SharedDispatcher;
