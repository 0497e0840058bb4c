#![allow(dead_code)]

pub mod registry;

use layer_autodeploy_core::{AutodeployConfig, EligibilityPolicy};

pub use registry::{FakeFunction, RecordedCall, RecordingRegistry};

pub const TARGET_LAYER: &str = "arn:aws:lambda:us-east-1:374852340823:layer:optimized-aws-sdk:8";
pub const PREVIOUS_LAYER: &str = "arn:aws:lambda:us-east-1:374852340823:layer:optimized-aws-sdk:7";
pub const INCLUDE_TAG: &str = "optimize-aws-sdk";
pub const EXCLUDE_TAG: &str = "no-optimize-aws-sdk";

/// Config targeting [`TARGET_LAYER`] with the given tag rules.
pub fn config(include_tag: bool, exclude_tag: bool) -> AutodeployConfig {
    AutodeployConfig::new(
        TARGET_LAYER,
        EligibilityPolicy::new(
            include_tag.then(|| INCLUDE_TAG.to_string()),
            exclude_tag.then(|| EXCLUDE_TAG.to_string()),
        ),
    )
}

pub fn function_arn(function_name: &str) -> String {
    format!("arn:aws:lambda:us-east-1:1234567890:function:{function_name}")
}
