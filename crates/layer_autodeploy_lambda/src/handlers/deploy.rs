use layer_autodeploy_core::{
    reconcile, DeployFailure, DeployOutcome, FailedOperation, FunctionDescriptor, LayerReference,
};

use crate::adapters::registry::FunctionRegistry;

/// Ensures `target` is attached to one function.
///
/// Reads the current layers, reconciles them, and issues at most one update.
/// Failures are returned as [`DeployOutcome::Failed`] so callers can carry on
/// with other functions.
pub fn deploy(
    function: &FunctionDescriptor,
    target: &LayerReference,
    registry: &dyn FunctionRegistry,
) -> DeployOutcome {
    let function_name = function.function_name.as_str();

    let current_layers = match registry.get_layers(function_name) {
        Ok(layers) => layers,
        Err(error) => {
            tracing::error!(
                component = "deployer",
                function_name,
                layer_arn = %target,
                error = %error,
                "failed to read function configuration"
            );
            return DeployOutcome::Failed(DeployFailure::new(
                FailedOperation::GetConfiguration,
                error,
            ));
        }
    };

    let reconciliation = reconcile(&current_layers, target);
    if !reconciliation.changed {
        tracing::info!(
            component = "deployer",
            function_name,
            layer_arn = %target,
            "function already has the layer, skipped"
        );
        return DeployOutcome::Skipped;
    }

    for previous in &reconciliation.replaced {
        tracing::info!(
            component = "deployer",
            function_name,
            previous_version = previous.version(),
            new_version = target.version(),
            "function has previous version of layer, replacing"
        );
    }

    match registry.update_layers(function_name, &reconciliation.new_layers) {
        Ok(()) => {
            tracing::info!(
                component = "deployer",
                function_name,
                layer_arn = %target,
                "layer has been deployed to function"
            );
            DeployOutcome::Updated {
                layers: reconciliation.new_layers,
            }
        }
        Err(error) => {
            tracing::error!(
                component = "deployer",
                function_name,
                layer_arn = %target,
                error = %error,
                "failed to deploy layer to function"
            );
            DeployOutcome::Failed(DeployFailure::new(
                FailedOperation::UpdateConfiguration,
                error,
            ))
        }
    }
}
