//! Error types for spec identifier resolution.
//!
//! Two families live here:
//!
//! - [`SpecError`] - everything a caller can see. `InvalidName` and
//!   `InvariantViolation` are programming errors and are never recovered.
//! - [`TitleError`] - the recoverable result of title extraction. The resolver
//!   and the input model branch on it and fall back to filename identity.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the identifier resolver, the input model and the config layers.
#[derive(Error, Debug)]
pub enum SpecError {
    /// Sanitization received empty input, or a package name was empty.
    #[error("invalid spec name: {raw:?} cannot be turned into a configuration key")]
    InvalidName {
        /// The offending raw value.
        raw: String,
    },

    /// The document could not be parsed as an OpenAPI/Swagger document.
    #[error("malformed OpenAPI document: {reason}")]
    MalformedDocument {
        /// Parser message.
        reason: String,
    },

    /// The document parsed but declares no `info.title`.
    #[error("OpenAPI document has no info.title")]
    MissingTitle,

    /// A spec input model was built without a required field.
    #[error("invalid spec input for {spec}: {reason}")]
    InvariantViolation {
        /// Filename (or placeholder) of the offending spec.
        spec: String,
        /// What was missing.
        reason: String,
    },

    /// Failed to read a spec file.
    #[error("failed to read spec file: {path}")]
    Io {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration layer held something unusable.
    #[error("invalid configuration value for {key}: {reason}")]
    Config {
        /// The key (or file) involved.
        key: String,
        /// Explanation.
        reason: String,
    },
}

impl SpecError {
    /// Create a new invalid name error.
    #[must_use]
    pub fn invalid_name(raw: impl Into<String>) -> Self {
        Self::InvalidName { raw: raw.into() }
    }

    /// Create a new invariant violation naming the spec.
    #[must_use]
    pub fn invariant(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Create a new read error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration error.
    #[must_use]
    pub fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Recoverable failure of title extraction.
#[derive(Error, Debug)]
pub enum TitleError {
    /// The spec source could not be read.
    #[error("failed to read spec content from {path}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Content is not a parseable OpenAPI/Swagger document.
    #[error("malformed OpenAPI document: {0}")]
    Malformed(String),

    /// No usable `info.title`.
    #[error("OpenAPI document has no info.title")]
    MissingTitle,
}

impl From<TitleError> for SpecError {
    fn from(err: TitleError) -> Self {
        match err {
            TitleError::Io { path, source } => SpecError::Io { path, source },
            TitleError::Malformed(reason) => SpecError::MalformedDocument { reason },
            TitleError::MissingTitle => SpecError::MissingTitle,
        }
    }
}
