//! # CLI Module
//!
//! Command-line front end for resolving spec identifiers and the per-spec
//! configuration overlay a code generator merges.
//!
//! ## Commands
//!
//! ### `sanitize`
//!
//! ```bash
//! specgen sanitize petstore.json "Pet Store"
//! # petstore_json
//! # Pet_Store
//! ```
//!
//! ### `keys`
//!
//! Print the identifier and derived configuration keys for one spec:
//!
//! ```bash
//! specgen keys --spec api/petstore.json
//! specgen --use-title-as-id keys --spec api/petstore.json
//! ```
//!
//! ### `resolve`
//!
//! Build the input model for each spec and print its overlay:
//!
//! ```bash
//! specgen resolve --spec api/petstore.json --spec api/users.yaml \
//!     --base-package org.acme.petstore \
//!     --skip-form-model \
//!     --config specgen.toml \
//!     --format json
//! ```
//!
//! Options:
//! - `--spec <FILE>` - Path to an OpenAPI specification (repeatable, required)
//! - `--base-package <PKG>` - Base package recorded for every spec (required)
//! - `--skip-form-model [true|false]` - Also record the skip-form-model flag
//! - `--config <FILE>` - User TOML config; its settings win over the overlay
//! - `--format <properties|json>` - Output format (default: properties)
//!
//! Global flags: `--use-title-as-id`, `--verbose`, `--config-root`, each with
//! an environment fallback (`SPECGEN_USE_TITLE_AS_ID`, `SPECGEN_VERBOSE`,
//! `SPECGEN_CONFIG_ROOT`).

mod commands;


pub use commands::{execute, run_cli, Cli, Commands, OutputFormat, ENV_PREFIX};
