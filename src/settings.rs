//! # Codegen Settings
//!
//! Build-wide flags that steer identifier resolution. They are carried as an
//! explicit value and handed to every resolver and input model, so two builds
//! in one process (or two tests running in parallel) never see each other's
//! flags.
//!
//! ## Environment Variables
//!
//! ### `SPECGEN_USE_TITLE_AS_ID`
//!
//! Use the document's `info.title` instead of the file name as the spec
//! identifier. Truthy values: `1`, `true`, `yes`, `on` (case-insensitive).
//!
//! Default: `false`
//!
//! ### `SPECGEN_VERBOSE`
//!
//! Log each resolution step at `info` level.
//!
//! Default: `false`
//!
//! ### `SPECGEN_CONFIG_ROOT`
//!
//! Namespace root of every generated key.
//!
//! Default: `quarkus.openapi-generator.codegen`
//!
//! ## Usage
//!
//! ```rust
//! use specgen::settings::CodegenSettings;
//!
//! let settings = CodegenSettings::default().with_title_as_id(true);
//! assert!(settings.use_title_as_id);
//! ```

use std::env;

use crate::error::SpecError;
use crate::overlay::LayeredConfig;

/// Fixed namespace root for codegen keys.
pub const DEFAULT_CONFIG_ROOT: &str = "quarkus.openapi-generator.codegen";

/// Key suffix (under the root) of the verbose flag.
pub const VERBOSE_PROPERTY: &str = "verbose";

/// Key suffix (under the root) of the title-as-id flag.
pub const USE_TITLE_AS_ID_PROPERTY: &str = "useTitleAsId";

/// Explicit configuration context for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenSettings {
    /// Namespace root, e.g. `quarkus.openapi-generator.codegen`
    pub config_root: String,
    /// Identify specs by `info.title` rather than by file name
    pub use_title_as_id: bool,
    /// Log internal resolution steps
    pub verbose: bool,
}

impl Default for CodegenSettings {
    fn default() -> Self {
        Self {
            config_root: DEFAULT_CONFIG_ROOT.to_string(),
            use_title_as_id: false,
            verbose: false,
        }
    }
}

impl CodegenSettings {
    /// Load settings from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            config_root: env::var("SPECGEN_CONFIG_ROOT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONFIG_ROOT.to_string()),
            use_title_as_id: env::var("SPECGEN_USE_TITLE_AS_ID")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            verbose: env::var("SPECGEN_VERBOSE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Read `<root>.verbose` and `<root>.useTitleAsId` from merged configuration.
    ///
    /// Missing keys keep their defaults; values that are not booleans are rejected.
    pub fn from_layers(config: &LayeredConfig, config_root: &str) -> Result<Self, SpecError> {
        let key = |suffix: &str| format!("{config_root}.{suffix}");
        Ok(Self {
            config_root: config_root.to_string(),
            use_title_as_id: config
                .get_bool(&key(USE_TITLE_AS_ID_PROPERTY))?
                .unwrap_or(false),
            verbose: config.get_bool(&key(VERBOSE_PROPERTY))?.unwrap_or(false),
        })
    }

    #[must_use]
    pub fn with_title_as_id(mut self, enabled: bool) -> Self {
        self.use_title_as_id = enabled;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    #[must_use]
    pub fn with_config_root(mut self, root: impl Into<String>) -> Self {
        self.config_root = root.into();
        self
    }

    /// Full key of the verbose flag, e.g. `quarkus.openapi-generator.codegen.verbose`.
    #[must_use]
    pub fn verbose_property_name(&self) -> String {
        format!("{}.{}", self.config_root, VERBOSE_PROPERTY)
    }

    /// Full key of the title-as-id flag.
    #[must_use]
    pub fn use_title_as_id_property_name(&self) -> String {
        format!("{}.{}", self.config_root, USE_TITLE_AS_ID_PROPERTY)
    }
}

/// Lenient boolean parse used for environment flags.
#[must_use]
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
