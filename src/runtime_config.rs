//! # Runtime Configuration Module
//!
//! Environment variable based configuration for dispatch behaviour.
//!
//! ## Environment Variables
//!
//! ### `RESTMAPPER_DECODE_PATH_VALUES`
//!
//! Percent-decode each request path segment before matching and binding, so
//! `/people/bob%20smith` binds `bob smith` and `/menu/caf%C3%A9` matches the
//! template `/menu/café`. Default: `true`.
//!
//! ### `RESTMAPPER_SLOW_MATCH_US`
//!
//! Route matches slower than this many microseconds are logged at `warn`.
//! Default: `1000`.
//!
//! ### `RESTMAPPER_STRICT_REGISTRATION`
//!
//! When `true`, registering a second mapping with the same segment count and verb
//! fails with `DuplicateMapping` instead of replacing the first. Default: `false`.
//!
//! ## Usage
//!
//! ```rust
//! use restmapper::runtime_config::DispatchConfig;
//!
//! let config = DispatchConfig::from_env();
//! println!("slow match threshold: {:?}", config.slow_match);
//! ```

use std::env;
use std::time::Duration;

/// Default slow-match threshold in microseconds
pub const DEFAULT_SLOW_MATCH_US: u64 = 1_000;

/// Dispatch configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Percent-decode path segments before matching
    pub decode_path_values: bool,
    /// Threshold above which a match is logged as slow
    pub slow_match: Duration,
    /// Reject same-key registrations instead of replacing
    pub strict_registration: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            decode_path_values: true,
            slow_match: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
            strict_registration: false,
        }
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

impl DispatchConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let slow_match = env::var("RESTMAPPER_SLOW_MATCH_US")
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
            .map_or(defaults.slow_match, Duration::from_micros);

        DispatchConfig {
            decode_path_values: env_bool(
                "RESTMAPPER_DECODE_PATH_VALUES",
                defaults.decode_path_values,
            ),
            slow_match,
            strict_registration: env_bool(
                "RESTMAPPER_STRICT_REGISTRATION",
                defaults.strict_registration,
            ),
        }
    }
}
