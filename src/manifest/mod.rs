//! # Manifest Module
//!
//! Static route configuration. A manifest lists every URL template with its verb,
//! the name of the handler it maps to, the handler's declared parameters and any
//! roles required to invoke it:
//!
//! ```yaml
//! routes:
//!   - template: /products/{id}
//!     method: GET
//!     handler: get_product
//!     roles: [ROLE_ADMIN]
//!     params:
//!       - { name: id, kind: int }
//!       - { name: currency, kind: string, source: query, required: false }
//!       - { name: product, kind: json, source: body }
//! ```
//!
//! Files ending in `.yaml`/`.yml` are read as YAML, anything else as JSON.
//! [`Manifest::build_dispatcher`] binds each route to a callable from a
//! [`HandlerSet`] by name; [`Manifest::build_registry`] builds matching only.

mod core;
#[cfg(test)]
mod tests;

pub use self::core::{
    load_manifest, parse_manifest, HandlerSet, Manifest, ManifestFormat, RouteDef,
};
