use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::io::Cursor;

use bytes::Bytes;
use tracing::{error, info};

use super::content::SpecContent;
use super::title::extract_title;
use super::types::SpecReference;
use crate::error::SpecError;
use crate::ids::SpecIdentifier;
use crate::resolver::PropertyKeys;
use crate::settings::CodegenSettings;

/// One spec document as seen by the generator's configuration phase.
///
/// Built once per spec per build and read-only afterwards. Content is an owned
/// immutable buffer, so the generator can read it after title extraction has.
#[derive(Debug, Clone)]
pub struct SpecInputModel {
    filename: String,
    identifier: SpecIdentifier,
    content: SpecContent,
    properties: BTreeMap<String, String>,
}

impl SpecInputModel {
    /// Store `filename` and `content` as given. No properties are computed.
    pub fn new(filename: impl Into<String>, content: impl Into<SpecContent>) -> Result<Self, SpecError> {
        Self::builder()
            .filename(filename)
            .content(content)
            .build(&CodegenSettings::default())
    }

    /// Build a model and record its base-package property.
    ///
    /// In title mode the filename is replaced by the sanitized `info.title` and
    /// the package's last segment by that identifier (`org.acme.spec` with title
    /// `My API` becomes `org.acme.My_API`). Otherwise the property is keyed by the
    /// sanitized filename and `base_package` is used verbatim.
    pub fn with_base_package(
        filename: impl Into<String>,
        content: impl Into<SpecContent>,
        base_package: impl Into<String>,
        settings: &CodegenSettings,
    ) -> Result<Self, SpecError> {
        Self::builder()
            .filename(filename)
            .content(content)
            .base_package(base_package)
            .build(settings)
    }

    /// Read a reference into memory and build from it.
    pub fn from_reference(
        reference: &SpecReference,
        base_package: impl Into<String>,
        settings: &CodegenSettings,
    ) -> Result<Self, SpecError> {
        let content = match reference {
            SpecReference::Path(path) => SpecContent::from_path(path)?,
            SpecReference::Inline { content, .. } => content.clone(),
        };
        Self::with_base_package(reference.filename()?, content, base_package, settings)
    }

    #[must_use]
    pub fn builder() -> SpecInputModelBuilder {
        SpecInputModelBuilder::default()
    }

    /// Display name: the original filename, or the sanitized title in title mode.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub fn identifier(&self) -> &SpecIdentifier {
        &self.identifier
    }

    #[must_use]
    pub fn content(&self) -> &SpecContent {
        &self.content
    }

    /// A fresh reader over the document, independent of earlier reads.
    #[must_use]
    pub fn reader(&self) -> Cursor<Bytes> {
        self.content.reader()
    }

    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// The `(key, value)` base-package entry, if one was recorded.
    #[must_use]
    pub fn base_package_property(&self) -> Option<(&str, &str)> {
        self.properties
            .iter()
            .find(|(k, _)| k.ends_with(".base-package"))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PartialEq for SpecInputModel {
    fn eq(&self, other: &Self) -> bool {
        self.filename == other.filename && self.content == other.content
    }
}

impl Eq for SpecInputModel {}

impl Hash for SpecInputModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.filename.hash(state);
        self.content.hash(state);
    }
}

impl Display for SpecInputModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "spec '{}'", self.filename)
    }
}

/// Builder for [`SpecInputModel`].
///
/// `filename` and `content` are required; a missing or empty one is an
/// [`SpecError::InvariantViolation`].
#[derive(Debug, Default)]
pub struct SpecInputModelBuilder {
    filename: Option<String>,
    content: Option<SpecContent>,
    base_package: Option<String>,
    skip_form_model: Option<bool>,
}

impl SpecInputModelBuilder {
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<SpecContent>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn base_package(mut self, base_package: impl Into<String>) -> Self {
        self.base_package = Some(base_package.into());
        self
    }

    /// Also record `<prefix>.skip-form-model`. Needs a base package.
    #[must_use]
    pub fn skip_form_model(mut self, skip: bool) -> Self {
        self.skip_form_model = Some(skip);
        self
    }

    pub fn build(self, settings: &CodegenSettings) -> Result<SpecInputModel, SpecError> {
        let filename = match self.filename {
            Some(f) if !f.is_empty() => f,
            Some(_) => return Err(SpecError::invariant("<unnamed>", "file name is empty")),
            None => return Err(SpecError::invariant("<unnamed>", "file name is required")),
        };
        let content = match self.content {
            Some(c) if !c.is_empty() => c,
            Some(_) => return Err(SpecError::invariant(&filename, "content is empty")),
            None => return Err(SpecError::invariant(&filename, "content is required")),
        };

        let Some(base_package) = self.base_package else {
            if self.skip_form_model.is_some() {
                return Err(SpecError::invariant(
                    &filename,
                    "skip-form-model needs a base package",
                ));
            }
            return Ok(SpecInputModel {
                identifier: SpecIdentifier::sanitize(&filename)?,
                filename,
                content,
                properties: BTreeMap::new(),
            });
        };
        if base_package.is_empty() {
            return Err(SpecError::invariant(&filename, "base package is empty"));
        }

        let title_id = if settings.use_title_as_id {
            match extract_title(content.as_bytes()) {
                Ok(title) => Some(SpecIdentifier::sanitize(&title)?),
                Err(err) => {
                    error!(spec = %filename, error = %err, "failed to read spec title, using file name");
                    None
                }
            }
        } else {
            None
        };

        let (filename, identifier, package) = match title_id {
            Some(id) => {
                let package = format!("{}{}", namespace_prefix(&base_package), id);
                (id.to_string(), id, package)
            }
            None => {
                let id = SpecIdentifier::sanitize(&filename)?;
                (filename, id, base_package)
            }
        };

        let keys = PropertyKeys::new(&settings.config_root, &identifier);
        let mut properties = BTreeMap::new();
        properties.insert(keys.base_package(), package);
        if let Some(skip) = self.skip_form_model {
            properties.insert(keys.skip_form_model(), skip.to_string());
        }

        if settings.verbose {
            info!(spec = %filename, identifier = %identifier, properties = properties.len(), "built spec input model");
        }

        Ok(SpecInputModel {
            filename,
            identifier,
            content,
            properties,
        })
    }
}

/// Everything up to and including the last `.`; empty for a single segment.
fn namespace_prefix(package: &str) -> &str {
    package.rfind('.').map_or("", |i| &package[..=i])
}
