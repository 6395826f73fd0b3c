use crate::error::SpecError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Configuration-key-safe spec identifier.
///
/// Only ASCII alphanumerics and `_`. The sole way in is [`SpecIdentifier::sanitize`],
/// so every value upholds that invariant.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SpecIdentifier(String);

impl SpecIdentifier {
    /// Replace every character outside `[A-Za-z0-9]` with `_`.
    ///
    /// Non-ASCII characters count as one character each. Empty input is
    /// rejected with [`SpecError::InvalidName`].
    ///
    /// ```
    /// use specgen::SpecIdentifier;
    ///
    /// let id = SpecIdentifier::sanitize("petstore.json").unwrap();
    /// assert_eq!(id.as_str(), "petstore_json");
    /// ```
    pub fn sanitize(raw: &str) -> Result<Self, SpecError> {
        if raw.is_empty() {
            return Err(SpecError::invalid_name(raw));
        }
        let token = raw
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        Ok(Self(token))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SpecIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for SpecIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SpecIdentifier {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::sanitize(s)
    }
}

impl Serialize for SpecIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SpecIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<SpecIdentifier>()
            .map_err(|_| serde::de::Error::custom("invalid spec identifier"))
    }
}
