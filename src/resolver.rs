//! # Identifier Resolver
//!
//! Turns a spec reference into its canonical [`SpecIdentifier`] and the
//! configuration keys derived from it.
//!
//! ## Naming modes
//!
//! - **Filename** (default) - `petstore.json` becomes `petstore_json`.
//! - **Title** (`use_title_as_id`) - the document's `info.title` is extracted
//!   and sanitized, so `Pet Store` becomes `Pet_Store`. When the title cannot be
//!   read (missing file, unparseable document, no title) the resolver logs the
//!   failure and falls back to the filename. Title naming never fails a build.
//!
//! ## Derived keys
//!
//! Given the configured root `<root>`:
//!
//! | Key | Format |
//! |-----|--------|
//! | spec prefix | `<root>.spec.<identifier>` |
//! | base package | `<root>.spec.<identifier>.base-package` |
//! | skip form model | `<root>.spec.<identifier>.skip-form-model` |
//!
//! The generator places API code under `<base-package>.api` and models under
//! `<base-package>.model`; see [`api_package`] and [`model_package`].

use serde::Serialize;
use tracing::{error, info};

use crate::error::{SpecError, TitleError};
use crate::ids::SpecIdentifier;
use crate::settings::CodegenSettings;
use crate::spec::{extract_title, SpecReference};

const SPEC_SEGMENT: &str = "spec";
const BASE_PACKAGE_SUFFIX: &str = "base-package";
const SKIP_FORM_MODEL_SUFFIX: &str = "skip-form-model";

pub const API_PKG_SUFFIX: &str = ".api";
pub const MODEL_PKG_SUFFIX: &str = ".model";

/// How an identifier was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierSource {
    Filename,
    Title,
    /// Title mode was on but the title could not be read.
    FilenameFallback,
}

impl IdentifierSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierSource::Filename => "filename",
            IdentifierSource::Title => "title",
            IdentifierSource::FilenameFallback => "filename-fallback",
        }
    }
}

/// Configuration keys for one spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyKeys {
    prefix: String,
}

impl PropertyKeys {
    #[must_use]
    pub fn new(config_root: &str, identifier: &SpecIdentifier) -> Self {
        Self {
            prefix: format!("{config_root}.{SPEC_SEGMENT}.{identifier}"),
        }
    }

    /// `<root>.spec.<identifier>`
    #[must_use]
    pub fn spec_prefix(&self) -> &str {
        &self.prefix
    }

    /// `<root>.spec.<identifier>.base-package`
    #[must_use]
    pub fn base_package(&self) -> String {
        format!("{}.{BASE_PACKAGE_SUFFIX}", self.prefix)
    }

    /// `<root>.spec.<identifier>.skip-form-model`
    #[must_use]
    pub fn skip_form_model(&self) -> String {
        format!("{}.{SKIP_FORM_MODEL_SUFFIX}", self.prefix)
    }
}

/// Result of resolving one reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub identifier: SpecIdentifier,
    pub source: IdentifierSource,
    pub keys: PropertyKeys,
}

/// Stateless resolver bound to one build's settings.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierResolver<'a> {
    settings: &'a CodegenSettings,
}

impl<'a> IdentifierResolver<'a> {
    #[must_use]
    pub fn new(settings: &'a CodegenSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &CodegenSettings {
        self.settings
    }

    /// Resolve the canonical identifier for `reference`.
    ///
    /// Only an unusable filename is an error. Title failures degrade to the
    /// filename and are logged.
    pub fn resolve(&self, reference: &SpecReference) -> Result<Resolution, SpecError> {
        let filename = reference.filename()?;

        let (identifier, source) = if self.settings.use_title_as_id {
            match self.title_lookup(reference) {
                Ok(title) => (SpecIdentifier::sanitize(&title)?, IdentifierSource::Title),
                Err(err) => {
                    error!(spec = %filename, error = %err, "failed to read spec title, using file name");
                    (
                        SpecIdentifier::sanitize(&filename)?,
                        IdentifierSource::FilenameFallback,
                    )
                }
            }
        } else {
            (SpecIdentifier::sanitize(&filename)?, IdentifierSource::Filename)
        };

        if self.settings.verbose {
            info!(spec = %filename, identifier = %identifier, source = ?source, "resolved spec identifier");
        }

        Ok(Resolution {
            keys: self.keys_for(&identifier),
            identifier,
            source,
        })
    }

    /// Read and extract the declared title. The caller decides what a failure means.
    pub fn title_lookup(&self, reference: &SpecReference) -> Result<String, TitleError> {
        let content = reference.content()?;
        extract_title(content.as_bytes())
    }

    #[must_use]
    pub fn keys_for(&self, identifier: &SpecIdentifier) -> PropertyKeys {
        PropertyKeys::new(&self.settings.config_root, identifier)
    }

    /// `<root>.spec.<sanitized filename>`
    pub fn spec_property_prefix(&self, filename: &str) -> Result<String, SpecError> {
        let id = SpecIdentifier::sanitize(filename)?;
        Ok(self.keys_for(&id).spec_prefix().to_string())
    }

    /// Base-package key for a filename, e.g. `petstore.json` gives
    /// `<root>.spec.petstore_json.base-package`.
    pub fn base_package_property_name(&self, filename: &str) -> Result<String, SpecError> {
        let id = SpecIdentifier::sanitize(filename)?;
        Ok(self.keys_for(&id).base_package())
    }

    /// Skip-form-model key for a filename.
    pub fn skip_form_model_property_name(&self, filename: &str) -> Result<String, SpecError> {
        let id = SpecIdentifier::sanitize(filename)?;
        Ok(self.keys_for(&id).skip_form_model())
    }
}

/// `<base>.api`
pub fn api_package(base_package: &str) -> Result<String, SpecError> {
    if base_package.is_empty() {
        return Err(SpecError::invalid_name(base_package));
    }
    Ok(format!("{base_package}{API_PKG_SUFFIX}"))
}

/// `<base>.model`
pub fn model_package(base_package: &str) -> Result<String, SpecError> {
    if base_package.is_empty() {
        return Err(SpecError::invalid_name(base_package));
    }
    Ok(format!("{base_package}{MODEL_PKG_SUFFIX}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "quarkus.openapi-generator.codegen";

    #[test]
    fn test_base_package_property_name() {
        let settings = CodegenSettings::default();
        let resolver = IdentifierResolver::new(&settings);
        assert_eq!(
            resolver.base_package_property_name("petstore.json").unwrap(),
            format!("{ROOT}.spec.petstore_json.base-package")
        );
        assert_eq!(
            resolver.skip_form_model_property_name("petstore.json").unwrap(),
            format!("{ROOT}.spec.petstore_json.skip-form-model")
        );
        assert_eq!(
            resolver.spec_property_prefix("petstore.json").unwrap(),
            format!("{ROOT}.spec.petstore_json")
        );
    }

    #[test]
    fn test_resolve_filename_mode() {
        let settings = CodegenSettings::default();
        let resolver = IdentifierResolver::new(&settings);
        let r = resolver
            .resolve(&SpecReference::path("/home/luke/projects/petstore.json"))
            .unwrap();
        assert_eq!(r.identifier.as_str(), "petstore_json");
        assert_eq!(r.source, IdentifierSource::Filename);
    }

    #[test]
    fn test_resolve_title_mode_inline() {
        let settings = CodegenSettings::default().with_title_as_id(true);
        let resolver = IdentifierResolver::new(&settings);
        let doc = "openapi: 3.1.0\ninfo:\n  title: Pet Store\n  version: \"1\"\npaths: {}\n";
        let r = resolver
            .resolve(&SpecReference::inline("spec.yaml", doc))
            .unwrap();
        assert_eq!(r.identifier.as_str(), "Pet_Store");
        assert_eq!(r.source, IdentifierSource::Title);
        assert_eq!(r.keys.base_package(), format!("{ROOT}.spec.Pet_Store.base-package"));
    }

    #[test]
    fn test_resolve_title_mode_falls_back_on_garbage() {
        let settings = CodegenSettings::default().with_title_as_id(true);
        let resolver = IdentifierResolver::new(&settings);
        let r = resolver
            .resolve(&SpecReference::inline("broken.yaml", "{{{"))
            .unwrap();
        assert_eq!(r.identifier.as_str(), "broken_yaml");
        assert_eq!(r.source, IdentifierSource::FilenameFallback);
    }

    #[test]
    fn test_resolve_rejects_empty_inline_filename() {
        let settings = CodegenSettings::default();
        let resolver = IdentifierResolver::new(&settings);
        assert!(matches!(
            resolver.resolve(&SpecReference::inline("", "openapi: 3.1.0")),
            Err(SpecError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_custom_root() {
        let settings = CodegenSettings::default().with_config_root("acme.gen");
        let resolver = IdentifierResolver::new(&settings);
        assert_eq!(
            resolver.base_package_property_name("a-b").unwrap(),
            "acme.gen.spec.a_b.base-package"
        );
    }

    #[test]
    fn test_sub_packages() {
        assert_eq!(api_package("org.acme").unwrap(), "org.acme.api");
        assert_eq!(model_package("org.acme").unwrap(), "org.acme.model");
        assert!(api_package("").is_err());
        assert!(model_package("").is_err());
    }
}
