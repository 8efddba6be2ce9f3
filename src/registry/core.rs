use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use http::Method;
use tracing::{debug, info, warn};

use crate::error::MappingError;
use crate::segment::Bindings;

use super::mapping::{HandlerId, MappingKey, UrlMapping};
use super::request::{MatrixParams, RequestPath};

/// Default duration above which a match is logged as slow.
const DEFAULT_SLOW_MATCH: Duration = Duration::from_millis(1);

/// Result of matching a request path against the registry.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The winning mapping
    pub mapping: Arc<UrlMapping>,
    /// Placeholder values extracted from the path segments
    pub bindings: Bindings,
    /// `;name=value` parameters stripped from the path before matching
    pub matrix: MatrixParams,
}

impl RouteMatch {
    #[inline]
    #[must_use]
    pub fn handler(&self) -> &HandlerId {
        self.mapping.handler()
    }

    /// Get a bound value by placeholder name.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }
}

/// Table of URL mappings keyed by `(segment count, verb)`.
///
/// Built single-threaded at startup, then shared read-only (it is `Send + Sync`).
#[derive(Debug, Clone)]
pub struct Registry {
    mappings: HashMap<MappingKey, Arc<UrlMapping>>,
    slow_match: Duration,
    decode_path: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
            slow_match: DEFAULT_SLOW_MATCH,
            decode_path: true,
        }
    }

    /// Matches slower than `threshold` are logged at `warn`.
    #[must_use]
    pub fn with_slow_match_threshold(mut self, threshold: Duration) -> Self {
        self.slow_match = threshold;
        self
    }

    /// Whether request path segments are percent-decoded before matching (default `true`).
    #[must_use]
    pub fn with_path_decoding(mut self, decode: bool) -> Self {
        self.decode_path = decode;
        self
    }

    /// Parse `template` and store it under its `(arity, verb)` key.
    ///
    /// A mapping already stored under the same key is replaced.
    pub fn register(
        &mut self,
        template: &str,
        verb: Method,
        handler: impl Into<HandlerId>,
    ) -> Result<Arc<UrlMapping>, MappingError> {
        let mapping = Arc::new(UrlMapping::new(template, verb, handler)?);
        self.insert(Arc::clone(&mapping));
        Ok(mapping)
    }

    /// Like [`register`](Self::register) but fails instead of replacing.
    pub fn try_register(
        &mut self,
        template: &str,
        verb: Method,
        handler: impl Into<HandlerId>,
    ) -> Result<Arc<UrlMapping>, MappingError> {
        let mapping = UrlMapping::new(template, verb, handler)?;
        if let Some(existing) = self.mappings.get(&mapping.key()) {
            return Err(MappingError::DuplicateMapping {
                verb: mapping.verb().clone(),
                arity: mapping.arity(),
                existing: existing.template().to_string(),
            });
        }
        let mapping = Arc::new(mapping);
        self.insert(Arc::clone(&mapping));
        Ok(mapping)
    }

    /// Store an already parsed mapping, returning the one it replaced.
    pub fn insert(&mut self, mapping: Arc<UrlMapping>) -> Option<Arc<UrlMapping>> {
        let key = mapping.key();
        let replaced = self.mappings.insert(key, Arc::clone(&mapping));

        match &replaced {
            Some(old) => warn!(
                verb = %mapping.verb(),
                arity = mapping.arity(),
                template = %mapping.template(),
                handler = %mapping.handler(),
                replaced_template = %old.template(),
                replaced_handler = %old.handler(),
                "Mapping key collision - earlier mapping replaced"
            ),
            None => info!(
                verb = %mapping.verb(),
                arity = mapping.arity(),
                template = %mapping.template(),
                handler = %mapping.handler(),
                total_mappings = self.mappings.len(),
                "Mapping registered"
            ),
        }

        replaced
    }

    /// The mapping stored for `verb` with `arity` segments, if any.
    #[must_use]
    pub fn lookup(&self, verb: &Method, arity: usize) -> Option<&Arc<UrlMapping>> {
        self.mappings.get(&MappingKey {
            arity,
            verb: verb.clone(),
        })
    }

    /// Select the mapping for `verb` and `path` and extract its bindings.
    ///
    /// The path is prepared by [`RequestPath::parse`]: matrix parameters are
    /// stripped and, unless disabled, each segment is percent-decoded, so both
    /// matching and binding see decoded text.
    ///
    /// Returns `None` when no mapping has the key or when the candidate does not
    /// match every segment.
    #[must_use]
    pub fn find(&self, verb: &Method, path: &str) -> Option<RouteMatch> {
        debug!(verb = %verb, path = %path, "Route match attempt");

        let match_start = Instant::now();
        let request = RequestPath::parse(path, self.decode_path);
        let arity = request.len();
        let found = {
            let actual = request.segments();
            let found = self
                .lookup(verb, arity)
                .filter(|mapping| mapping.matches(&actual))
                .map(|mapping| (Arc::clone(mapping), mapping.bind(&actual)));
            found
        };
        let result = found.map(|(mapping, bindings)| RouteMatch {
            mapping,
            bindings,
            matrix: request.into_matrix(),
        });
        let duration = match_start.elapsed();

        match &result {
            Some(m) if duration > self.slow_match => warn!(
                verb = %verb,
                path = %path,
                handler = %m.handler(),
                template = %m.mapping.template(),
                duration_us = duration.as_micros(),
                "Slow route matching detected"
            ),
            Some(m) => info!(
                verb = %verb,
                path = %path,
                handler = %m.handler(),
                template = %m.mapping.template(),
                bindings = ?m.bindings,
                duration_us = duration.as_micros(),
                "Route matched"
            ),
            None => warn!(
                verb = %verb,
                path = %path,
                arity = arity,
                duration_us = duration.as_micros(),
                "No route matched"
            ),
        }

        result
    }

    /// All mappings, ordered by template then verb.
    #[must_use]
    pub fn mappings(&self) -> Vec<Arc<UrlMapping>> {
        let mut all: Vec<_> = self.mappings.values().cloned().collect();
        all.sort_by(|a, b| {
            a.template()
                .as_str()
                .cmp(b.template().as_str())
                .then_with(|| a.verb().as_str().cmp(b.verb().as_str()))
        });
        all
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Write every mapping, one per line, in [`mappings`](Self::mappings) order.
    ///
    /// With `segments` set, each mapping is followed by one line per segment
    /// showing its kind and compiled pattern.
    pub fn dump_routes(&self, out: &mut dyn Write, segments: bool) -> io::Result<()> {
        writeln!(out, "[mappings] count={}", self.mappings.len())?;
        for mapping in self.mappings() {
            writeln!(
                out,
                "[mapping] {} {} (arity {}) -> {}",
                mapping.verb(),
                mapping.template(),
                mapping.arity(),
                mapping.handler()
            )?;
            if segments {
                for segment in mapping.segments() {
                    writeln!(
                        out,
                        "    {:<8} {:<24} {}",
                        segment.kind(),
                        segment.to_string(),
                        segment.pattern()
                    )?;
                }
            }
        }
        Ok(())
    }
}
