//! # restmapper
//!
//! **restmapper** maps REST requests onto handlers through URL templates such as
//! `/books/{id}` or `/archive/{year}-{month}-{day}`, extracts the placeholder
//! values from the request path and converts them into typed handler arguments.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - regex atoms for placeholder values and literal text
//! - **[`segment`]** - the `Fixed` / `Variable` / `Multi` segment model, with
//!   scoring and binding
//! - **[`registry`]** - template parsing and the `(segment count, verb)` mapping table
//! - **[`convert`]** - raw text to typed [`ArgValue`](convert::ArgValue) conversion
//! - **[`dispatcher`]** - resolve, authorize, build arguments, invoke
//! - **[`manifest`]** - YAML/JSON route manifests in place of annotation scanning
//! - **[`runtime_config`]** / **[`telemetry`]** - environment configuration and logging
//! - **[`cli`]** - the `restmapper` operator binary
//!
//! ## Request Flow
//!
//! ```text
//! (verb, path) ──split──▶ [segments] ──(len, verb)──▶ UrlMapping
//!                                                        │ every segment scores 1
//!                                                        ▼
//!                                                    Bindings ──convert──▶ ArgVec ──▶ Handler
//! ```
//!
//! Registration happens once, single-threaded; afterwards every structure is
//! immutable and shared by concurrent readers without locking. Each request builds
//! its own bindings and argument list.
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use restmapper::convert::{ArgValue, PrimitiveKind};
//! use restmapper::dispatcher::{Dispatcher, EmptyContext, HandlerEntry, ParamDescriptor};
//! use serde_json::json;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register(
//!     "/files/{name}.{ext}",
//!     Method::GET,
//!     HandlerEntry::new("file", |args: &[ArgValue]| {
//!         Ok(Some(json!({ "name": args[0].as_str(), "ext": args[1].as_str() })))
//!     })
//!     .param(ParamDescriptor::path("name", PrimitiveKind::String))
//!     .param(ParamDescriptor::path("ext", PrimitiveKind::String)),
//! )?;
//!
//! let done = dispatcher.dispatch(&Method::GET, "/files/report.pdf", &EmptyContext)?;
//! assert_eq!(done.result, Some(json!({ "name": "report", "ext": "pdf" })));
//! # Ok::<(), restmapper::MappingError>(())
//! ```

pub mod cli;
pub mod convert;
pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod manifest;
pub mod pattern;
pub mod registry;
pub mod runtime_config;
pub mod segment;
pub mod telemetry;

pub use convert::{convert, ArgValue, ConversionError, PrimitiveKind};
pub use dispatcher::{Dispatched, Dispatcher, HandlerEntry, MatchResult, SharedDispatcher};
pub use error::MappingError;
pub use registry::{Registry, UrlMapping};
pub use segment::{Bindings, Segment};
