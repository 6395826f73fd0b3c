//! # Configuration Overlays
//!
//! Key/value configuration layers and the merge the generator reads from.
//!
//! Every layer carries an ordinal. When several layers define the same key the
//! highest ordinal wins; on a tie the layer added last wins. Spec overlays
//! synthesized from a [`SpecInputModel`] sit at [`ordinals::SPEC_OVERLAY`], below
//! every other source, so an explicit user setting for the same key always
//! takes precedence.
//!
//! ```text
//!  COMMAND_LINE (400)   --set style overrides
//!  ENVIRONMENT  (300)   SPECGEN_* variables
//!  APPLICATION  (250)   user TOML file
//!  DEFAULTS     (100)   built-in defaults
//!  SPEC_OVERLAY   (0)   derived per-spec entries
//! ```
//!
//! ## TOML layers
//!
//! Nested tables are flattened into dotted keys, so
//!
//! ```toml
//! [quarkus.openapi-generator.codegen.spec.petstore_json]
//! base-package = "org.acme"
//! ```
//!
//! yields `quarkus.openapi-generator.codegen.spec.petstore_json.base-package = org.acme`.
//!
//! ## Environment layers
//!
//! Environment variables are matched the way MicroProfile config matches them:
//! a key is looked up by replacing every non-alphanumeric character with `_`
//! and upper-casing, under a fixed prefix. With prefix `SPECGEN_`,
//! `SPECGEN_QUARKUS_OPENAPI_GENERATOR_CODEGEN_VERBOSE=true` answers
//! `quarkus.openapi-generator.codegen.verbose`.

use std::path::Path;

use serde::Serialize;

use crate::error::SpecError;
use crate::resolver::{api_package, model_package, PropertyKeys};
use crate::spec::SpecInputModel;

/// Standard layer ordinals. Lower loses.
pub mod ordinals {
    pub const SPEC_OVERLAY: i32 = 0;
    pub const DEFAULTS: i32 = 100;
    pub const APPLICATION: i32 = 250;
    pub const ENVIRONMENT: i32 = 300;
    pub const COMMAND_LINE: i32 = 400;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum KeyStyle {
    #[default]
    Exact,
    /// Stored names are env-style (`FOO_BAR`); lookups are normalized.
    Environment,
}

/// Ordered key/value layer with a merge priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigOverlay {
    name: String,
    ordinal: i32,
    entries: Vec<ConfigEntry>,
    #[serde(skip)]
    style: KeyStyle,
}

impl ConfigOverlay {
    #[must_use]
    pub fn new(name: impl Into<String>, ordinal: i32) -> Self {
        Self {
            name: name.into(),
            ordinal,
            entries: Vec::new(),
            style: KeyStyle::Exact,
        }
    }

    /// Wrap a model's computed properties as the lowest-priority layer.
    #[must_use]
    pub fn from_model(model: &SpecInputModel) -> Self {
        let mut overlay = Self::new(format!("spec:{}", model.filename()), ordinals::SPEC_OVERLAY);
        for (key, value) in model.properties() {
            overlay.insert(key.clone(), value.clone());
        }
        overlay
    }

    /// Parse TOML and flatten it into dotted keys.
    pub fn from_toml_str(name: impl Into<String>, content: &str, ordinal: i32) -> Result<Self, SpecError> {
        let name = name.into();
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| SpecError::config(name.clone(), e.to_string()))?;
        let mut overlay = Self::new(name, ordinal);
        flatten_table("", &table, &mut overlay);
        Ok(overlay)
    }

    /// Load a TOML file as a layer named after its path.
    pub fn from_toml_file(path: &Path, ordinal: i32) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpecError::config(path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(path.display().to_string(), &content, ordinal)
    }

    /// Snapshot environment variables starting with `prefix` (e.g. `SPECGEN_`).
    #[must_use]
    pub fn from_env(prefix: &str, ordinal: i32) -> Self {
        Self::from_env_vars(
            prefix,
            std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
            ordinal,
        )
    }

    /// Same as [`ConfigOverlay::from_env`] over an explicit variable list.
    #[must_use]
    pub fn from_env_vars<I>(prefix: &str, vars: I, ordinal: i32) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut overlay = Self::new(format!("env:{prefix}"), ordinal);
        overlay.style = KeyStyle::Environment;
        for (name, value) in vars {
            if let Some(rest) = name.strip_prefix(prefix) {
                if !rest.is_empty() {
                    overlay.insert(rest.to_string(), value);
                }
            }
        }
        overlay
    }

    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.value = value,
            None => self.entries.push(ConfigEntry { key, value }),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let found = match self.style {
            KeyStyle::Exact => self.entries.iter().find(|e| e.key == key),
            KeyStyle::Environment => {
                let wanted = env_name(key);
                self.entries.iter().find(|e| e.key == wanted)
            }
        };
        found.map(|e| e.value.as_str())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ordinal(&self) -> i32 {
        self.ordinal
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.iter()
    }

    /// `key=value` lines, in entry order.
    #[must_use]
    pub fn to_properties(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}={}\n", e.key, e.value))
            .collect()
    }
}

fn flatten_table(prefix: &str, table: &toml::Table, out: &mut ConfigOverlay) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        flatten_value(full, value, out);
    }
}

/// Tables, and arrays holding tables, expand into indexed dotted keys.
fn flatten_value(key: String, value: &toml::Value, out: &mut ConfigOverlay) {
    match value {
        toml::Value::Table(inner) => flatten_table(&key, inner, out),
        other => match scalar_string(other) {
            Some(text) => out.insert(key, text),
            None => {
                if let toml::Value::Array(items) = other {
                    for (idx, item) in items.iter().enumerate() {
                        flatten_value(format!("{key}.{idx}"), item, out);
                    }
                }
            }
        },
    }
}

/// Render a value as one string. `None` when a table is nested inside.
fn scalar_string(value: &toml::Value) -> Option<String> {
    let text = match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(d) => d.to_string(),
        toml::Value::Array(items) => items
            .iter()
            .map(scalar_string)
            .collect::<Option<Vec<_>>>()?
            .join(","),
        toml::Value::Table(_) => return None,
    };
    Some(text)
}

/// `quarkus.openapi-generator.codegen.verbose` -> `QUARKUS_OPENAPI_GENERATOR_CODEGEN_VERBOSE`
fn env_name(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

/// What the generator needs for one spec, read from merged configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecCodegenOptions {
    pub base_package: String,
    pub api_package: String,
    pub model_package: String,
    pub skip_form_model: bool,
}

/// All layers merged for one build.
#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    layers: Vec<ConfigOverlay>,
}

impl LayeredConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_layer(mut self, layer: ConfigOverlay) -> Self {
        self.push(layer);
        self
    }

    pub fn push(&mut self, layer: ConfigOverlay) {
        self.layers.push(layer);
    }

    #[must_use]
    pub fn layers(&self) -> &[ConfigOverlay] {
        &self.layers
    }

    /// Value from the highest-ordinal layer defining `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .enumerate()
            .filter_map(|(idx, layer)| layer.get(key).map(|v| (layer.ordinal(), idx, v)))
            .max_by_key(|(ordinal, idx, _)| (*ordinal, *idx))
            .map(|(_, _, v)| v)
    }

    /// Boolean lookup; anything other than `true`/`false` is rejected.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, SpecError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(SpecError::config(key, format!("expected true or false, got {raw:?}"))),
            },
        }
    }

    /// Resolve generator options for one spec. `None` when no base package is set.
    pub fn codegen_options(&self, keys: &PropertyKeys) -> Result<Option<SpecCodegenOptions>, SpecError> {
        let Some(base_package) = self.get(&keys.base_package()) else {
            return Ok(None);
        };
        Ok(Some(SpecCodegenOptions {
            api_package: api_package(base_package)?,
            model_package: model_package(base_package)?,
            base_package: base_package.to_string(),
            skip_form_model: self.get_bool(&keys.skip_form_model())?.unwrap_or(false),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SpecIdentifier;
    use crate::settings::CodegenSettings;

    const ROOT: &str = "quarkus.openapi-generator.codegen";

    fn keys(id: &str) -> PropertyKeys {
        PropertyKeys::new(ROOT, &SpecIdentifier::sanitize(id).unwrap())
    }

    #[test]
    fn test_from_model_is_lowest_priority() {
        let model = SpecInputModel::with_base_package(
            "petstore.json",
            "{}",
            "org.acme",
            &CodegenSettings::default(),
        )
        .unwrap();
        let overlay = ConfigOverlay::from_model(&model);
        assert_eq!(overlay.ordinal(), ordinals::SPEC_OVERLAY);
        assert!(overlay.ordinal() < ordinals::DEFAULTS);
        assert_eq!(overlay.name(), "spec:petstore.json");
        assert_eq!(overlay.get(&keys("petstore.json").base_package()), Some("org.acme"));
    }

    #[test]
    fn test_higher_ordinal_wins_and_ties_go_to_last() {
        let low = ConfigOverlay::new("low", 10).with_entry("k", "low");
        let high = ConfigOverlay::new("high", 20).with_entry("k", "high");
        let config = LayeredConfig::new().with_layer(high).with_layer(low);
        assert_eq!(config.get("k"), Some("high"));

        let a = ConfigOverlay::new("a", 5).with_entry("k", "a");
        let b = ConfigOverlay::new("b", 5).with_entry("k", "b");
        let config = LayeredConfig::new().with_layer(a).with_layer(b);
        assert_eq!(config.get("k"), Some("b"));
        assert_eq!(config.get("missing"), None);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut overlay = ConfigOverlay::new("x", 0).with_entry("a", "1").with_entry("b", "2");
        overlay.insert("a", "3");
        assert_eq!(overlay.len(), 2);
        assert_eq!(overlay.to_properties(), "a=3\nb=2\n");
    }

    #[test]
    fn test_toml_flattening() {
        let toml = r#"
[quarkus.openapi-generator.codegen]
useTitleAsId = true

[quarkus.openapi-generator.codegen.spec.petstore_json]
base-package = "org.acme"
tags = ["a", "b"]
retries = 3
"#;
        let overlay = ConfigOverlay::from_toml_str("app", toml, ordinals::APPLICATION).unwrap();
        assert_eq!(overlay.get(&format!("{ROOT}.useTitleAsId")), Some("true"));
        assert_eq!(overlay.get(&keys("petstore.json").base_package()), Some("org.acme"));
        assert_eq!(overlay.get(&format!("{ROOT}.spec.petstore_json.tags")), Some("a,b"));
        assert_eq!(overlay.get(&format!("{ROOT}.spec.petstore_json.retries")), Some("3"));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        assert!(matches!(
            ConfigOverlay::from_toml_str("app", "= nope", ordinals::APPLICATION),
            Err(SpecError::Config { .. })
        ));
    }

    #[test]
    fn test_toml_array_of_tables_gets_indexed_keys() {
        let toml = r#"
[[servers]]
url = "https://a.example"

[[servers]]
url = "https://b.example"
ports = [80, 443]
"#;
        let overlay = ConfigOverlay::from_toml_str("app", toml, ordinals::APPLICATION).unwrap();
        assert_eq!(overlay.get("servers.0.url"), Some("https://a.example"));
        assert_eq!(overlay.get("servers.1.url"), Some("https://b.example"));
        assert_eq!(overlay.get("servers.1.ports"), Some("80,443"));
        assert_eq!(overlay.len(), 3);
    }

    #[test]
    fn test_unreadable_toml_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("application.toml");
        match ConfigOverlay::from_toml_file(&missing, ordinals::APPLICATION) {
            Err(SpecError::Config { key, .. }) => assert!(key.ends_with("application.toml")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_env_overlay_lookup() {
        let vars = vec![
            ("SPECGEN_QUARKUS_OPENAPI_GENERATOR_CODEGEN_VERBOSE".to_string(), "true".to_string()),
            ("OTHER_THING".to_string(), "x".to_string()),
        ];
        let overlay = ConfigOverlay::from_env_vars("SPECGEN_", vars, ordinals::ENVIRONMENT);
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.get(&format!("{ROOT}.verbose")), Some("true"));
    }

    #[test]
    fn test_codegen_options() {
        let k = keys("petstore.json");
        let overlay = ConfigOverlay::new("spec", ordinals::SPEC_OVERLAY)
            .with_entry(k.base_package(), "org.acme")
            .with_entry(k.skip_form_model(), "true");
        let config = LayeredConfig::new().with_layer(overlay);
        let options = config.codegen_options(&k).unwrap().unwrap();
        assert_eq!(options.api_package, "org.acme.api");
        assert_eq!(options.model_package, "org.acme.model");
        assert!(options.skip_form_model);

        assert_eq!(config.codegen_options(&keys("other.yaml")).unwrap(), None);
    }
}
