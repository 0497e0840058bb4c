use std::sync::{Mutex, PoisonError};

use layer_autodeploy_core::{AutodeployConfig, AutodeployError, FunctionReport, RunSummary};
use serde::Serialize;
use serde_json::Value;

use crate::adapters::registry::FunctionRegistry;
use crate::handlers::existing_functions::FleetDriver;
use crate::handlers::new_function::handle_new_function_event;

pub const CLOUDTRAIL_DETAIL_TYPE: &str = "AWS API Call via CloudTrail";
pub const LAMBDA_EVENT_SOURCE: &str = "aws.lambda";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRoute {
    NewFunction,
    ExistingFunctions,
}

/// Picks the path from the EventBridge envelope alone.
///
/// Anything from Lambda's CloudTrail feed is reactive, even when the body is
/// unusable; the reactive handler rejects it instead of it starting a fleet
/// run. Every other payload is the bulk trigger.
pub fn route_event(event: &Value) -> EventRoute {
    let field = |name: &str| event.get(name).and_then(Value::as_str);
    if field("detail-type") == Some(CLOUDTRAIL_DETAIL_TYPE)
        || field("source") == Some(LAMBDA_EVENT_SOURCE)
    {
        EventRoute::NewFunction
    } else {
        EventRoute::ExistingFunctions
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DispatchResponse {
    NewFunction(FunctionReport),
    ExistingFunctions(RunSummary),
}

pub fn dispatch_event(
    event: Value,
    config: &AutodeployConfig,
    registry: &dyn FunctionRegistry,
    driver: &Mutex<FleetDriver>,
) -> Result<DispatchResponse, AutodeployError> {
    match route_event(&event) {
        EventRoute::NewFunction => {
            handle_new_function_event(event, config, registry).map(DispatchResponse::NewFunction)
        }
        EventRoute::ExistingFunctions => {
            run_shared_driver(driver, config, registry).map(DispatchResponse::ExistingFunctions)
        }
    }
}

/// Runs the process-wide driver.
///
/// A panic mid-run poisons the lock but leaves the pending set intact, so the
/// lock is recovered and the next run resumes from the remaining entries.
pub fn run_shared_driver(
    driver: &Mutex<FleetDriver>,
    config: &AutodeployConfig,
    registry: &dyn FunctionRegistry,
) -> Result<RunSummary, AutodeployError> {
    let mut driver = driver.lock().unwrap_or_else(|poisoned| {
        tracing::warn!(
            component = "fleet",
            "previous run panicked, recovering fleet driver state"
        );
        PoisonError::into_inner(poisoned)
    });
    driver.run(config, registry)
}
