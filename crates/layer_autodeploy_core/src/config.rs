use crate::eligibility::EligibilityPolicy;
use crate::error::AutodeployError;
use crate::layer_ref::LayerReference;

pub const LAYER_ARN_VAR: &str = "LAYER_ARN";
pub const INCLUDE_TAG_VAR: &str = "INCLUDE_TAG";
pub const EXCLUDE_TAG_VAR: &str = "EXCLUDE_TAG";

/// Settings resolved once when the process starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutodeployConfig {
    pub target_layer: LayerReference,
    pub policy: EligibilityPolicy,
}

impl AutodeployConfig {
    pub fn new(target_layer: impl Into<LayerReference>, policy: EligibilityPolicy) -> Self {
        Self {
            target_layer: target_layer.into(),
            policy,
        }
    }

    pub fn from_env() -> Result<Self, AutodeployError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AutodeployError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let target_layer = read(LAYER_ARN_VAR).ok_or_else(|| {
            AutodeployError::Configuration(format!("{LAYER_ARN_VAR} must be configured"))
        })?;

        Ok(Self {
            target_layer: LayerReference::new(target_layer),
            policy: EligibilityPolicy::new(read(INCLUDE_TAG_VAR), read(EXCLUDE_TAG_VAR)),
        })
    }
}
