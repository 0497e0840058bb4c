use std::fmt;

use serde::{Deserialize, Serialize};

/// A layer version ARN such as
/// `arn:aws:lambda:us-east-1:123456789012:layer:optimized-aws-sdk:8`.
///
/// The value is kept verbatim. No format validation is performed; see
/// [`LayerReference::identity`] for how malformed input is split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerReference(String);

/// Family and version halves of a [`LayerReference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerIdentity<'a> {
    pub family: &'a str,
    pub version: &'a str,
}

impl LayerReference {
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn identity(&self) -> LayerIdentity<'_> {
        parse(&self.0)
    }

    pub fn family(&self) -> &str {
        self.identity().family
    }

    pub fn version(&self) -> &str {
        self.identity().version
    }

    pub fn same_family(&self, other: &LayerReference) -> bool {
        self.family() == other.family()
    }
}

impl fmt::Display for LayerReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LayerReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for LayerReference {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Splits a layer reference at its last colon.
///
/// A reference without any colon is returned whole as the family with an empty
/// version.
pub fn parse(arn: &str) -> LayerIdentity<'_> {
    match arn.rsplit_once(':') {
        Some((family, version)) => LayerIdentity { family, version },
        None => LayerIdentity {
            family: arn,
            version: "",
        },
    }
}
