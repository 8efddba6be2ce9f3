use std::sync::Arc;

use arc_swap::ArcSwap;
use http::Method;

use crate::error::MappingError;

use super::context::RequestContext;
use super::core::{Dispatched, Dispatcher};

/// Publish-once, read-many handle over a [`Dispatcher`].
///
/// Readers take a lock-free snapshot with [`load`](Self::load); a rebuilt
/// dispatcher can be swapped in atomically with [`publish`](Self::publish) while
/// in-flight requests finish on the snapshot they loaded.
#[derive(Debug)]
pub struct SharedDispatcher {
    inner: ArcSwap<Dispatcher>,
}

impl SharedDispatcher {
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            inner: ArcSwap::from_pointee(dispatcher),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn load(&self) -> Arc<Dispatcher> {
        self.inner.load_full()
    }

    /// Atomically replace the dispatcher seen by subsequent requests.
    pub fn publish(&self, dispatcher: Dispatcher) {
        let mappings = dispatcher.registry().len();
        self.inner.store(Arc::new(dispatcher));
        tracing::info!(mappings = mappings, "Dispatcher published");
    }

    /// Dispatch against the current snapshot.
    pub fn dispatch(
        &self,
        verb: &Method,
        path: &str,
        ctx: &dyn RequestContext,
    ) -> Result<Dispatched, MappingError> {
        self.inner.load().dispatch(verb, path, ctx)
    }
}

impl From<Dispatcher> for SharedDispatcher {
    fn from(dispatcher: Dispatcher) -> Self {
        Self::new(dispatcher)
    }
}
