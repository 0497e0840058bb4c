mod support;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Mutex;

use layer_autodeploy_core::{AutodeployError, FunctionOutcome};
use layer_autodeploy_lambda::handlers::dispatch::{
    dispatch_event, run_shared_driver, DispatchResponse,
};
use layer_autodeploy_lambda::handlers::existing_functions::FleetDriver;
use serde_json::json;
use support::{config, function_arn, FakeFunction, RecordingRegistry};

#[test]
fn failed_create_function_record_never_starts_a_fleet_run() {
    let registry = RecordingRegistry::new(vec![
        FakeFunction::new("existing-1"),
        FakeFunction::new("existing-2"),
    ]);
    let driver = Mutex::new(FleetDriver::new());
    let event = json!({
        "source": "aws.lambda",
        "detail-type": "AWS API Call via CloudTrail",
        "detail": {
            "eventName": "CreateFunction20150331",
            "errorCode": "InvalidParameterValueException",
            "responseElements": null
        }
    });

    let error = dispatch_event(event, &config(false, false), &registry, &driver)
        .expect_err("failed call record should be rejected");

    assert!(matches!(error, AutodeployError::InvalidEvent(_)));
    assert_eq!(registry.list_functions_calls(), 0);
    assert!(registry.calls().is_empty());
    assert!(driver
        .lock()
        .expect("driver lock should be healthy")
        .pending()
        .is_empty());
}

#[test]
fn cloudtrail_event_without_response_elements_is_rejected() {
    let registry = RecordingRegistry::new(vec![FakeFunction::new("existing")]);
    let driver = Mutex::new(FleetDriver::new());
    let event = json!({
        "detail-type": "AWS API Call via CloudTrail",
        "detail": {"eventName": "CreateFunction20150331"}
    });

    let error = dispatch_event(event, &config(false, false), &registry, &driver)
        .expect_err("event without a function should be rejected");

    assert!(matches!(error, AutodeployError::InvalidEvent(_)));
    assert!(registry.calls().is_empty());
}

#[test]
fn create_function_event_deploys_only_that_function() {
    let registry = RecordingRegistry::new(vec![
        FakeFunction::new("existing"),
        FakeFunction::new("created"),
    ]);
    let driver = Mutex::new(FleetDriver::new());
    let event = json!({
        "source": "aws.lambda",
        "detail-type": "AWS API Call via CloudTrail",
        "detail": {
            "responseElements": {
                "functionName": "created",
                "functionArn": function_arn("created")
            }
        }
    });

    let response = dispatch_event(event, &config(false, false), &registry, &driver)
        .expect("event should be handled");

    match response {
        DispatchResponse::NewFunction(report) => {
            assert_eq!(report.function_name, "created");
            assert!(matches!(report.outcome, FunctionOutcome::Updated { .. }));
        }
        other => panic!("expected a function report, got {other:?}"),
    }
    assert_eq!(registry.list_functions_calls(), 0);
    assert_eq!(registry.updated_names(), vec!["created".to_string()]);
}

#[test]
fn scheduled_event_runs_the_fleet() {
    let registry = RecordingRegistry::new(vec![FakeFunction::new("a"), FakeFunction::new("b")]);
    let driver = Mutex::new(FleetDriver::new());
    let event = json!({"source": "aws.events", "detail-type": "Scheduled Event", "detail": {}});

    let response = dispatch_event(event, &config(false, false), &registry, &driver)
        .expect("fleet run should complete");

    match response {
        DispatchResponse::ExistingFunctions(summary) => assert_eq!(summary.updated, 2),
        other => panic!("expected a run summary, got {other:?}"),
    }
    assert_eq!(registry.list_functions_calls(), 1);
}

#[test]
fn run_after_panic_resumes_from_remaining_functions() {
    let registry = RecordingRegistry::new(vec![
        FakeFunction::new("f1"),
        FakeFunction::new("f2"),
        FakeFunction::new("f3"),
    ]);
    registry.panic_once_on_get("f2");
    let driver = Mutex::new(FleetDriver::new());
    let config = config(false, false);

    let crashed = catch_unwind(AssertUnwindSafe(|| {
        run_shared_driver(&driver, &config, &registry)
    }));
    assert!(crashed.is_err());
    assert!(driver.is_poisoned());
    assert_eq!(registry.updated_names(), vec!["f1".to_string()]);

    let summary = run_shared_driver(&driver, &config, &registry)
        .expect("run after a panic should complete");

    assert!(summary.resumed);
    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.updated, 2);
    assert_eq!(registry.list_functions_calls(), 1);
    assert_eq!(
        registry.updated_names(),
        vec!["f1".to_string(), "f2".to_string(), "f3".to_string()]
    );
    assert!(driver
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .pending()
        .is_empty());
}
