//! # specgen
//!
//! **specgen** resolves, for every OpenAPI document handed to a build-time code
//! generator, a stable configuration identifier and the small set of derived
//! configuration entries (base package, skip-form-model) that steer generation.
//!
//! ## Overview
//!
//! Specs are identified by their file name (`petstore.json` becomes
//! `petstore_json`) or, optionally, by the `info.title` declared inside the
//! document (`Pet Store` becomes `Pet_Store`). The identifier becomes a key
//! fragment under the generator's configuration root:
//!
//! ```text
//! quarkus.openapi-generator.codegen.spec.petstore_json.base-package = org.acme
//! quarkus.openapi-generator.codegen.spec.petstore_json.skip-form-model = true
//! ```
//!
//! ## Architecture
//!
//! - **[`ids`]** - [`SpecIdentifier`] and the sanitization rule
//! - **[`spec`]** - owned spec content, title extraction and [`SpecInputModel`]
//! - **[`resolver`]** - [`IdentifierResolver`] and configuration key derivation
//! - **[`settings`]** - [`CodegenSettings`], the explicit per-build context
//! - **[`overlay`]** - [`ConfigOverlay`] layers and the [`LayeredConfig`] merge
//! - **[`logging`]** - `tracing-subscriber` setup for binaries
//! - **[`cli`]** - the `specgen` command line
//!
//! ### Resolution Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Driver as Build driver / CLI
//!     participant Model as SpecInputModel
//!     participant Title as spec::extract_title
//!     participant Overlay as ConfigOverlay
//!     participant Config as LayeredConfig
//!
//!     Driver->>Model: builder().filename().content().base_package()
//!     alt use_title_as_id
//!         Model->>Title: extract_title(bytes)
//!         Title-->>Model: "Pet Store" | TitleError
//!         Note over Model: on TitleError log + keep file name
//!     end
//!     Model-->>Driver: identifier + properties
//!     Driver->>Overlay: from_model(&model) (ordinal 0)
//!     Driver->>Config: with_layer(user).with_layer(overlay)
//!     Config-->>Driver: SpecCodegenOptions (user settings win)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use specgen::{CodegenSettings, ConfigOverlay, LayeredConfig, SpecInputModel};
//!
//! let settings = CodegenSettings::default().with_title_as_id(true);
//! let doc = "openapi: 3.1.0\ninfo:\n  title: My API\n  version: '1'\npaths: {}\n";
//! let model = SpecInputModel::with_base_package("spec.yaml", doc, "org.acme.spec", &settings)?;
//! assert_eq!(model.filename(), "My_API");
//!
//! let overlay = ConfigOverlay::from_model(&model);
//! assert_eq!(
//!     overlay.get("quarkus.openapi-generator.codegen.spec.My_API.base-package"),
//!     Some("org.acme.My_API")
//! );
//! # Ok::<(), specgen::SpecError>(())
//! ```

pub mod cli;
pub mod error;
pub mod ids;
pub mod logging;
pub mod overlay;
pub mod resolver;
pub mod settings;
pub mod spec;

pub use error::{SpecError, TitleError};
pub use ids::SpecIdentifier;
pub use overlay::{ordinals, ConfigEntry, ConfigOverlay, LayeredConfig, SpecCodegenOptions};
pub use resolver::{
    api_package, model_package, IdentifierResolver, IdentifierSource, PropertyKeys, Resolution,
};
pub use settings::CodegenSettings;
pub use spec::{extract_title, SpecContent, SpecInputModel, SpecInputModelBuilder, SpecReference};
