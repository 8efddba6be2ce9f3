use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::convert::ArgValue;
use crate::registry::HandlerId;

use super::context::ParamDescriptor;

/// A callable resolved by the dispatcher.
///
/// Returns `Ok(None)` when the handler produces no body.
pub trait Handler: Send + Sync {
    fn call(&self, args: &[ArgValue]) -> anyhow::Result<Option<Value>>;
}

impl<F> Handler for F
where
    F: Fn(&[ArgValue]) -> anyhow::Result<Option<Value>> + Send + Sync,
{
    fn call(&self, args: &[ArgValue]) -> anyhow::Result<Option<Value>> {
        self(args)
    }
}

/// A named handler with its declared parameters and required roles.
#[derive(Clone)]
pub struct HandlerEntry {
    name: HandlerId,
    params: Vec<ParamDescriptor>,
    roles: Vec<String>,
    handler: Arc<dyn Handler>,
}

impl HandlerEntry {
    /// Wrap a closure; the `Fn` bound lets the closure's signature be inferred.
    pub fn new<F>(name: impl Into<HandlerId>, handler: F) -> Self
    where
        F: Fn(&[ArgValue]) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        Self::from_arc(name, Arc::new(handler))
    }

    pub fn from_arc(name: impl Into<HandlerId>, handler: Arc<dyn Handler>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            roles: Vec::new(),
            handler,
        }
    }

    #[must_use]
    pub fn param(mut self, param: ParamDescriptor) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn params(mut self, params: impl IntoIterator<Item = ParamDescriptor>) -> Self {
        self.params.extend(params);
        self
    }

    /// Invocation requires at least one of `roles`; empty means unrestricted.
    #[must_use]
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &HandlerId {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn declared_params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    #[inline]
    #[must_use]
    pub fn required_roles(&self) -> &[String] {
        &self.roles
    }

    #[inline]
    pub(crate) fn callable(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}
