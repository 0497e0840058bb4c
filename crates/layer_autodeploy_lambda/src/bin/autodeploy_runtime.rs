use std::sync::Mutex;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use layer_autodeploy_core::AutodeployConfig;
use layer_autodeploy_lambda::adapters::aws_lambda::AwsFunctionRegistry;
use layer_autodeploy_lambda::handlers::dispatch::{dispatch_event, DispatchResponse};
use layer_autodeploy_lambda::handlers::existing_functions::FleetDriver;
use layer_autodeploy_lambda::telemetry::init_tracing;
use serde_json::Value;

struct RuntimeDependencies {
    config: AutodeployConfig,
    registry: AwsFunctionRegistry,
    driver: Mutex<FleetDriver>,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<DispatchResponse, Error> {
    Ok(dispatch_event(
        event.payload,
        &deps.config,
        &deps.registry,
        &deps.driver,
    )?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let deps = RuntimeDependencies {
        config: AutodeployConfig::from_env()?,
        registry: AwsFunctionRegistry::from_env().await,
        driver: Mutex::new(FleetDriver::new()),
    };
    tracing::info!(
        component = "runtime",
        layer_arn = %deps.config.target_layer,
        include_tag = ?deps.config.policy.include_tag,
        exclude_tag = ?deps.config.policy.exclude_tag,
        "layer auto-deploy runtime started"
    );

    let deps = &deps;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}
