use layer_autodeploy_core::contract::NewFunctionEvent;
use layer_autodeploy_core::{
    AutodeployConfig, AutodeployError, FailedOperation, FunctionOutcome, FunctionReport,
};
use serde_json::Value;

use crate::adapters::registry::FunctionRegistry;
use crate::handlers::deploy::deploy;
use crate::handlers::filter::{evaluate_function, FilterDecision};

/// Reacts to a single `CreateFunction` event.
///
/// Only a malformed payload is an error; every per-function result, failures
/// included, comes back as a [`FunctionReport`].
pub fn handle_new_function_event(
    event: Value,
    config: &AutodeployConfig,
    registry: &dyn FunctionRegistry,
) -> Result<FunctionReport, AutodeployError> {
    let event: NewFunctionEvent = serde_json::from_value(event)
        .map_err(|error| AutodeployError::InvalidEvent(error.to_string()))?;
    let function = event.into_descriptor()?;

    tracing::info!(
        component = "new_function",
        function_name = %function.function_name,
        function_arn = %function.function_arn,
        "received new function event"
    );

    let outcome: FunctionOutcome = match evaluate_function(&function, &config.policy, registry) {
        FilterDecision::Eligible => deploy(&function, &config.target_layer, registry).into(),
        FilterDecision::TagLookupFailed(message) => FunctionOutcome::Failed {
            operation: FailedOperation::ListTags,
            message,
        },
        FilterDecision::Ineligible(reason) => FunctionOutcome::Ineligible {
            reason: reason.to_string(),
        },
    };

    Ok(FunctionReport {
        function_name: function.function_name,
        outcome,
    })
}
