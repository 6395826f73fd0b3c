use oas3::OpenApiV3Spec;
use serde_json::Value;
use tracing::warn;

use crate::error::TitleError;

/// Which top-level version marker the document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFlavor {
    /// `openapi: 3.x`
    OpenApi3,
    /// `swagger: "2.0"`
    Swagger2,
}

/// Return the document-level `info.title` of an OpenAPI or Swagger document.
///
/// The whole document is parsed in memory. Content starting with `{` is tried
/// as JSON first and then as YAML flow style; anything else goes through the
/// YAML parser. OpenAPI 3 documents are also checked against
/// [`OpenApiV3Spec`], which models 3.1: a mismatch is logged at `warn` and the
/// title is still returned. Swagger 2.0 documents only need a well-formed
/// header.
///
/// The title comes back verbatim. Callers sanitize it.
pub fn extract_title(content: &[u8]) -> Result<String, TitleError> {
    let value = parse_document(content)?;
    let flavor = document_flavor(&value)?;

    let title = value
        .get("info")
        .and_then(|info| info.get("title"))
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_owned)
        .ok_or(TitleError::MissingTitle)?;

    if flavor == DocumentFlavor::OpenApi3 {
        if let Err(reason) = check_openapi3(value) {
            warn!(title = %title, error = %reason, "spec does not match the OpenAPI 3.1 model");
        }
    }

    Ok(title)
}

fn parse_document(content: &[u8]) -> Result<Value, TitleError> {
    let first = content.iter().find(|b| !b.is_ascii_whitespace());
    match first {
        None => Err(TitleError::Malformed("document is empty".to_string())),
        Some(b'{') => serde_json::from_slice(content).or_else(|_| parse_yaml(content)),
        Some(_) => parse_yaml(content),
    }
}

fn parse_yaml(content: &[u8]) -> Result<Value, TitleError> {
    let text = std::str::from_utf8(content).map_err(|e| TitleError::Malformed(e.to_string()))?;
    serde_yaml::from_str(text).map_err(|e| TitleError::Malformed(e.to_string()))
}

/// Classify the root mapping by its version marker.
pub fn document_flavor(value: &Value) -> Result<DocumentFlavor, TitleError> {
    let root = value
        .as_object()
        .ok_or_else(|| TitleError::Malformed("document root is not a mapping".to_string()))?;
    if root.contains_key("openapi") {
        Ok(DocumentFlavor::OpenApi3)
    } else if root.contains_key("swagger") {
        Ok(DocumentFlavor::Swagger2)
    } else {
        Err(TitleError::Malformed(
            "neither an `openapi` nor a `swagger` version field is present".to_string(),
        ))
    }
}

fn check_openapi3(mut value: Value) -> Result<(), serde_json::Error> {
    strip_unknown_verbs(&mut value);
    serde_json::from_value::<OpenApiV3Spec>(value).map(|_| ())
}

fn strip_unknown_verbs(val: &mut Value) {
    const METHODS: [&str; 8] = ["get", "post", "put", "delete", "patch", "options", "head", "trace"];

    if let Some(Value::Object(paths_map)) = val.get_mut("paths") {
        for item in paths_map.values_mut() {
            if let Value::Object(obj) = item {
                obj.retain(|k, _| {
                    let lk = k.to_ascii_lowercase();
                    match lk.as_str() {
                        "summary" | "description" | "servers" | "parameters" | "$ref" => true,
                        m if METHODS.contains(&m) => true,
                        _ => k.starts_with("x-"),
                    }
                });
            }
        }
    }
}
