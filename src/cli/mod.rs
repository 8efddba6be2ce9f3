//! # CLI Module
//!
//! Operator tooling for route manifests.
//!
//! ## Commands
//!
//! ### `inspect`
//!
//! Load a manifest, register every route and list the resulting mappings:
//!
//! ```bash
//! restmapper inspect --manifest routes.yaml --segments
//! ```
//!
//! Same-key routes are reported by the registry's replacement warning, so running
//! with `--log-level warn` (the default) surfaces collisions.
//!
//! ### `match`
//!
//! Try one request against a manifest:
//!
//! ```bash
//! restmapper match --manifest routes.yaml --method GET --path /archive/2024-06-01
//! ```
//!
//! Exits with status 1 when nothing matches. `--json` prints a machine-readable
//! report (or `null`).
//!
//! ## Usage from Code
//!
//! ```rust,no_run
//! use clap::Parser;
//! use restmapper::cli::{execute, Cli};
//!
//! let cli = Cli::parse_from(["restmapper", "inspect", "--manifest", "routes.yaml"]);
//! execute(&cli, &mut std::io::stdout()).unwrap();
//! ```

mod commands;


pub use commands::{execute, run_cli, Cli, Commands, Outcome};
