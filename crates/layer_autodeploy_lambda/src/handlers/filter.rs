use layer_autodeploy_core::{EligibilityPolicy, FunctionDescriptor, Ineligibility};

use crate::adapters::registry::FunctionRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    Eligible,
    Ineligible(Ineligibility),
    /// Tags could not be read; the function is left alone this run.
    TagLookupFailed(String),
}

/// Fetches the function's current tags and applies the policy.
pub fn evaluate_function(
    function: &FunctionDescriptor,
    policy: &EligibilityPolicy,
    registry: &dyn FunctionRegistry,
) -> FilterDecision {
    let tags = match registry.list_tags(&function.function_arn) {
        Ok(tags) => tags,
        Err(error) => {
            tracing::warn!(
                component = "filter",
                function_name = %function.function_name,
                function_arn = %function.function_arn,
                error = %error,
                "failed to list tags, leaving function untouched"
            );
            return FilterDecision::TagLookupFailed(error);
        }
    };

    match policy.evaluate(&tags) {
        Ok(()) => FilterDecision::Eligible,
        Err(reason) => {
            match &reason {
                Ineligibility::HasExcludeTag(tag) => tracing::info!(
                    component = "filter",
                    function_name = %function.function_name,
                    exclude_tag = %tag,
                    "ignored function because it has the exclude tag"
                ),
                Ineligibility::MissingIncludeTag(tag) => tracing::info!(
                    component = "filter",
                    function_name = %function.function_name,
                    include_tag = %tag,
                    "ignored function because it does not have the include tag"
                ),
            }
            FilterDecision::Ineligible(reason)
        }
    }
}
