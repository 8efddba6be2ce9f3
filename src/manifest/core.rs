use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use http::Method;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::info;

use crate::convert::ArgValue;
use crate::dispatcher::{Dispatcher, Handler, HandlerEntry, ParamDescriptor};
use crate::error::MappingError;
use crate::registry::Registry;
use crate::runtime_config::DispatchConfig;

/// Serialization format of a manifest file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// `.yaml`/`.yml` is YAML; everything else is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ManifestFormat::Yaml
            }
            _ => ManifestFormat::Json,
        }
    }
}

fn deserialize_method<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Method, D::Error> {
    let s = String::deserialize(deserializer)?;
    Method::from_bytes(s.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| serde::de::Error::custom(format!("invalid HTTP method '{s}'")))
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}

/// One route: template, verb, handler name and declared parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDef {
    pub template: String,
    #[serde(
        deserialize_with = "deserialize_method",
        serialize_with = "serialize_method"
    )]
    pub method: Method,
    pub handler: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
}

impl fmt::Display for RouteDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.method, self.template, self.handler)
    }
}

/// A parsed route manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub routes: Vec<RouteDef>,
}

/// Handler callables keyed by the names routes refer to.
#[derive(Clone, Default)]
pub struct HandlerSet {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[ArgValue]) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.insert_arc(name, Arc::new(handler));
    }

    pub fn insert_arc(&mut self, name: impl Into<String>, handler: Arc<dyn Handler>) {
        self.handlers.insert(name.into(), handler);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[ArgValue]) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.insert(name, handler);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Handler>> {
        self.handlers.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("HandlerSet").field("handlers", &names).finish()
    }
}

/// Parse manifest text.
pub fn parse_manifest(text: &str, format: ManifestFormat) -> anyhow::Result<Manifest> {
    let manifest: Manifest = match format {
        ManifestFormat::Yaml => serde_yaml::from_str(text).context("invalid YAML manifest")?,
        ManifestFormat::Json => serde_json::from_str(text).context("invalid JSON manifest")?,
    };
    Ok(manifest)
}

/// Read and parse a manifest file, picking the format from its extension.
pub fn load_manifest(path: impl AsRef<Path>) -> anyhow::Result<Manifest> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let manifest = parse_manifest(&text, ManifestFormat::from_path(path))
        .with_context(|| format!("failed to parse manifest {}", path.display()))?;
    info!(
        manifest = %path.display(),
        routes = manifest.routes.len(),
        "Manifest loaded"
    );
    Ok(manifest)
}

impl Manifest {
    /// Distinct handler names referenced by the routes.
    #[must_use]
    pub fn handler_names(&self) -> BTreeSet<&str> {
        self.routes.iter().map(|r| r.handler.as_str()).collect()
    }

    /// Registry with every route's template, for matching without invocation.
    pub fn build_registry(&self) -> Result<Registry, MappingError> {
        let mut registry = Registry::new();
        for route in &self.routes {
            registry.register(&route.template, route.method.clone(), route.handler.as_str())?;
        }
        Ok(registry)
    }

    /// Dispatcher with every route bound to its named handler from `handlers`.
    ///
    /// All handler names are checked before any template is registered.
    pub fn build_dispatcher(
        &self,
        handlers: &HandlerSet,
        config: DispatchConfig,
    ) -> Result<Dispatcher, MappingError> {
        if let Some(missing) = self
            .routes
            .iter()
            .find(|r| handlers.get(&r.handler).is_none())
        {
            return Err(MappingError::UnknownHandler {
                handler: missing.handler.clone(),
            });
        }

        let mut dispatcher = Dispatcher::with_config(config);
        for route in &self.routes {
            let handler = handlers
                .get(&route.handler)
                .ok_or_else(|| MappingError::UnknownHandler {
                    handler: route.handler.clone(),
                })?;
            let entry = HandlerEntry::from_arc(route.handler.as_str(), Arc::clone(handler))
                .params(route.params.iter().cloned())
                .roles(route.roles.iter().cloned());
            dispatcher.register(&route.template, route.method.clone(), entry)?;
        }
        Ok(dispatcher)
    }
}
