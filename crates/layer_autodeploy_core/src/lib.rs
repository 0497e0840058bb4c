//! Shared layer auto-deploy domain primitives.
//!
//! This crate owns the reconciliation rules (layer identity, tag eligibility,
//! layer list replacement) and the request/response contracts of the Lambda
//! entry points. It intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod config;
pub mod contract;
pub mod eligibility;
pub mod error;
pub mod layer_ref;
pub mod pending;
pub mod reconcile;

pub use config::AutodeployConfig;
pub use contract::{
    DeployFailure, DeployOutcome, FailedOperation, FunctionDescriptor, FunctionOutcome,
    FunctionReport, RunSummary,
};
pub use eligibility::{is_eligible, EligibilityPolicy, Ineligibility};
pub use error::AutodeployError;
pub use layer_ref::{LayerIdentity, LayerReference};
pub use pending::PendingWorkSet;
pub use reconcile::{reconcile, Reconciliation};
