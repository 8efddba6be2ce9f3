//! Dispatcher core: resolve, authorize, build arguments, invoke.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use http::Method;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use tracing::{debug, error, info, warn};

use crate::convert::{convert, ArgValue};
use crate::error::MappingError;
use crate::ids::DispatchId;
use crate::registry::{HandlerId, MappingKey, MatrixParams, Registry, UrlMapping};
use crate::runtime_config::DispatchConfig;
use crate::segment::Bindings;

use super::context::{BodyDecoder, JsonBodyDecoder, ParamDescriptor, ParamSource, RequestContext};
use super::handler::HandlerEntry;

/// Maximum inline arguments before heap allocation
pub const MAX_INLINE_ARGS: usize = 8;

/// Ordered handler arguments
pub type ArgVec = SmallVec<[ArgValue; MAX_INLINE_ARGS]>;

/// A resolved `(verb, path)` pair: the winning mapping, its bindings and the
/// matrix parameters the path carried.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub mapping: Arc<UrlMapping>,
    pub handler: HandlerId,
    pub bindings: Bindings,
    pub matrix: MatrixParams,
}

/// Outcome of a successful invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Dispatched {
    pub id: DispatchId,
    #[serde(serialize_with = "serialize_handler")]
    pub handler: HandlerId,
    pub bindings: Bindings,
    pub arguments: ArgVec,
    /// `None` when the handler writes no body
    pub result: Option<Value>,
}

fn serialize_handler<S: serde::Serializer>(handler: &HandlerId, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(handler)
}

impl Dispatched {
    /// Content type of [`to_json_bytes`](Self::to_json_bytes) output
    pub const CONTENT_TYPE: &'static str = "application/json";

    /// Serialize the handler result as JSON; `None` when there is nothing to write.
    pub fn to_json_bytes(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        self.result.as_ref().map(serde_json::to_vec).transpose()
    }
}

/// Maps `(verb, path)` to handlers and builds their typed argument lists.
///
/// Built single-threaded; publish through
/// [`SharedDispatcher`](super::SharedDispatcher) for concurrent readers.
pub struct Dispatcher {
    registry: Registry,
    entries: HashMap<MappingKey, Arc<HandlerEntry>>,
    decoder: Arc<dyn BodyDecoder>,
    config: DispatchConfig,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("entries", &self.entries.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            registry: Registry::new()
                .with_slow_match_threshold(config.slow_match)
                .with_path_decoding(config.decode_path_values),
            entries: HashMap::new(),
            decoder: Arc::new(JsonBodyDecoder),
            config,
        }
    }

    /// Replace the decoder used for body-sourced parameters.
    #[must_use]
    pub fn with_body_decoder(mut self, decoder: impl BodyDecoder + 'static) -> Self {
        self.decoder = Arc::new(decoder);
        self
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Any registered entry named `name`.
    #[must_use]
    pub fn handler(&self, name: &str) -> Option<&Arc<HandlerEntry>> {
        self.entries
            .values()
            .find(|entry| entry.name().as_ref() == name)
    }

    /// Map `template` and `verb` to `entry`.
    ///
    /// Honours `strict_registration`: when set, a same-key mapping is an error.
    /// Otherwise the earlier mapping and its entry are replaced.
    pub fn register(
        &mut self,
        template: &str,
        verb: Method,
        entry: HandlerEntry,
    ) -> Result<Arc<UrlMapping>, MappingError> {
        let name = Arc::clone(entry.name());
        let mapping = if self.config.strict_registration {
            self.registry.try_register(template, verb, Arc::clone(&name))?
        } else {
            self.registry.register(template, verb, Arc::clone(&name))?
        };

        let path_params = entry
            .declared_params()
            .iter()
            .filter(|p| p.source == ParamSource::Path)
            .count();
        if path_params > mapping.variable_names().len() {
            warn!(
                handler = %name,
                template = %template,
                path_params = path_params,
                variables = mapping.variable_names().len(),
                "Handler declares more path parameters than the template binds"
            );
        }

        self.entries.insert(mapping.key(), Arc::new(entry));
        Ok(mapping)
    }

    /// Find the mapping for `verb` and `path` and extract its bindings.
    pub fn resolve(&self, verb: &Method, path: &str) -> Result<MatchResult, MappingError> {
        self.registry
            .find(verb, path)
            .map(|m| MatchResult {
                handler: Arc::clone(m.handler()),
                mapping: m.mapping,
                bindings: m.bindings,
                matrix: m.matrix,
            })
            .ok_or_else(|| MappingError::NotFound {
                verb: verb.clone(),
                path: path.to_string(),
            })
    }

    fn entry(&self, matched: &MatchResult) -> Result<&Arc<HandlerEntry>, MappingError> {
        self.entries
            .get(&matched.mapping.key())
            .ok_or_else(|| MappingError::UnknownHandler {
                handler: matched.handler.to_string(),
            })
    }

    /// Build the ordered argument list for a resolved request.
    ///
    /// Path parameters consume placeholder bindings in template order and matrix
    /// parameters are read from the matched path. Body and external parameters
    /// are fetched from `ctx`.
    pub fn arguments(
        &self,
        matched: &MatchResult,
        ctx: &dyn RequestContext,
    ) -> Result<ArgVec, MappingError> {
        let entry = self.entry(matched)?;
        let variables = matched.mapping.variable_names();
        let mut next_variable = variables.into_iter();
        let mut args = ArgVec::new();

        for param in entry.declared_params() {
            let value = match &param.source {
                ParamSource::Path => {
                    let raw = next_variable
                        .next()
                        .and_then(|name| matched.bindings.get(name))
                        .ok_or_else(|| MappingError::MissingParameter {
                            param: param.name.clone(),
                        })?;
                    self.convert_param(param, raw)?
                }
                ParamSource::Matrix { segment_index } => {
                    match matched.matrix.get(*segment_index, &param.name) {
                        Some(raw) => self.convert_param(param, raw)?,
                        None => absent(param)?,
                    }
                }
                ParamSource::Body => match ctx.body() {
                    Some(body) => self.decoder.decode(body, param.kind).map_err(|source| {
                        warn!(
                            handler = %matched.handler,
                            param = %param.name,
                            error = %source,
                            "Request body decoding failed"
                        );
                        MappingError::Body {
                            param: param.name.clone(),
                            source,
                        }
                    })?,
                    None => absent(param)?,
                },
                external => match ctx.external(external, &param.name) {
                    Some(raw) => self.convert_param(param, &raw)?,
                    None => absent(param)?,
                },
            };
            args.push(value);
        }

        Ok(args)
    }

    fn convert_param(&self, param: &ParamDescriptor, raw: &str) -> Result<ArgValue, MappingError> {
        convert(raw, param.kind).map_err(|source| {
            warn!(
                param = %param.name,
                kind = %param.kind,
                raw = %raw,
                "Parameter conversion failed"
            );
            MappingError::Conversion {
                param: param.name.clone(),
                source,
            }
        })
    }

    /// Resolve, authorize, convert and invoke.
    ///
    /// Handler errors and panics both surface as [`MappingError::Invocation`].
    pub fn dispatch(
        &self,
        verb: &Method,
        path: &str,
        ctx: &dyn RequestContext,
    ) -> Result<Dispatched, MappingError> {
        let id = DispatchId::from_header_or_new(ctx.dispatch_id());
        debug!(dispatch_id = %id, verb = %verb, path = %path, "Dispatch start");

        let matched = self.resolve(verb, path)?;
        let entry = self.entry(&matched)?;

        if !entry.required_roles().is_empty() && !ctx.has_any_role(entry.required_roles()) {
            warn!(
                dispatch_id = %id,
                handler = %matched.handler,
                required_roles = ?entry.required_roles(),
                "Invocation not authorized"
            );
            return Err(MappingError::Forbidden {
                handler: matched.handler.to_string(),
            });
        }

        let arguments = self.arguments(&matched, ctx)?;

        info!(
            dispatch_id = %id,
            handler = %matched.handler,
            arg_count = arguments.len(),
            "Handler execution start"
        );
        let execution_start = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| entry.callable().call(&arguments)));
        let execution_time_us = execution_start.elapsed().as_micros();

        let result = match outcome {
            Ok(Ok(result)) => {
                info!(
                    dispatch_id = %id,
                    handler = %matched.handler,
                    execution_time_us = execution_time_us,
                    has_result = result.is_some(),
                    "Handler execution complete"
                );
                result
            }
            Ok(Err(source)) => {
                error!(
                    dispatch_id = %id,
                    handler = %matched.handler,
                    error = %source,
                    execution_time_us = execution_time_us,
                    "Handler failed"
                );
                return Err(MappingError::Invocation {
                    handler: matched.handler.to_string(),
                    source,
                });
            }
            Err(panic) => {
                let panic_message = panic_message(&*panic);
                error!(
                    dispatch_id = %id,
                    handler = %matched.handler,
                    panic_message = %panic_message,
                    "Handler panicked - CRITICAL"
                );
                return Err(MappingError::Invocation {
                    handler: matched.handler.to_string(),
                    source: anyhow::anyhow!("handler panicked: {panic_message}"),
                });
            }
        };

        Ok(Dispatched {
            id,
            handler: matched.handler,
            bindings: matched.bindings,
            arguments,
            result,
        })
    }
}

fn absent(param: &ParamDescriptor) -> Result<ArgValue, MappingError> {
    if param.required {
        Err(MappingError::MissingParameter {
            param: param.name.clone(),
        })
    } else {
        Ok(ArgValue::Null)
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
