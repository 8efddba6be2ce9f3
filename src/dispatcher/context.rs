use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::convert::{convert, ArgValue, PrimitiveKind};

/// Where a handler parameter takes its value from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSource {
    /// Next placeholder binding in template order
    #[default]
    Path,
    /// Decoded request body
    Body,
    Query,
    Header,
    Cookie,
    /// Matrix parameter on the zero-based request path segment `segment_index`:
    /// in `/person/5;height=1.8`, `height` sits on segment 1.
    Matrix { segment_index: usize },
}

impl ParamSource {
    /// True for the sources the host resolves through [`RequestContext::external`].
    #[inline]
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            ParamSource::Query | ParamSource::Header | ParamSource::Cookie
        )
    }
}

fn default_required() -> bool {
    true
}

/// One declared handler parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    pub kind: PrimitiveKind,
    #[serde(default)]
    pub source: ParamSource,
    /// Absent optional values become [`ArgValue::Null`]
    #[serde(default = "default_required")]
    pub required: bool,
}

impl ParamDescriptor {
    pub fn path(name: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self::new(name, kind, ParamSource::Path)
    }

    /// Body parameter decoded as JSON.
    pub fn body(name: impl Into<String>) -> Self {
        Self::new(name, PrimitiveKind::Json, ParamSource::Body)
    }

    pub fn new(name: impl Into<String>, kind: PrimitiveKind, source: ParamSource) -> Self {
        Self {
            name: name.into(),
            kind,
            source,
            required: true,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Host side of a request, queried while building handler arguments.
///
/// Every method has a permissive default so hosts only implement what they carry.
pub trait RequestContext {
    /// Raw request body, if any.
    fn body(&self) -> Option<&[u8]> {
        None
    }

    /// Correlation id supplied by the caller, e.g. an `X-Request-Id` header.
    /// A value that is not a ULID is ignored and a fresh id is generated.
    fn dispatch_id(&self) -> Option<&str> {
        None
    }

    /// Raw value of a query, header or cookie parameter.
    fn external(&self, source: &ParamSource, name: &str) -> Option<String> {
        let _ = (source, name);
        None
    }

    /// Whether the caller holds at least one of `roles`.
    fn has_any_role(&self, roles: &[String]) -> bool {
        let _ = roles;
        true
    }
}

/// Context for requests with no body, no external parameters and no identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl RequestContext for EmptyContext {}

/// In-memory [`RequestContext`] for hosts that pre-extract request data, and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    body: Option<Vec<u8>>,
    values: HashMap<(ParamSource, String), String>,
    roles: Option<Vec<String>>,
    dispatch_id: Option<String>,
}

impl StaticContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_value(
        mut self,
        source: ParamSource,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.values.insert((source, name.into()), value.into());
        self
    }

    #[must_use]
    pub fn with_query(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_value(ParamSource::Query, name, value)
    }

    #[must_use]
    pub fn with_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_value(ParamSource::Header, name, value)
    }

    #[must_use]
    pub fn with_dispatch_id(mut self, id: impl Into<String>) -> Self {
        self.dispatch_id = Some(id.into());
        self
    }

    /// Caller identity; without this call every role check passes.
    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }
}

impl RequestContext for StaticContext {
    fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    fn dispatch_id(&self) -> Option<&str> {
        self.dispatch_id.as_deref()
    }

    fn external(&self, source: &ParamSource, name: &str) -> Option<String> {
        self.values.get(&(source.clone(), name.to_string())).cloned()
    }

    fn has_any_role(&self, roles: &[String]) -> bool {
        match &self.roles {
            None => true,
            Some(held) => roles.iter().any(|r| held.contains(r)),
        }
    }
}

/// Turns a raw request body into the argument for a body-sourced parameter.
pub trait BodyDecoder: Send + Sync {
    fn decode(&self, body: &[u8], kind: PrimitiveKind) -> anyhow::Result<ArgValue>;
}

/// Default [`BodyDecoder`]: JSON documents for `json`, UTF-8 text for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBodyDecoder;

impl BodyDecoder for JsonBodyDecoder {
    fn decode(&self, body: &[u8], kind: PrimitiveKind) -> anyhow::Result<ArgValue> {
        if kind == PrimitiveKind::Json {
            return Ok(ArgValue::Json(serde_json::from_slice(body)?));
        }
        let text = std::str::from_utf8(body)?;
        Ok(convert(text, kind)?)
    }
}
