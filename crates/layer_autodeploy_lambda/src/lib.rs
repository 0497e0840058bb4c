//! AWS-oriented adapters and handlers for layer auto-deploy.
//!
//! This crate owns runtime integration details (Lambda handlers, the AWS Lambda
//! control-plane adapter, fleet discovery, and log setup). Reconciliation rules
//! live in `layer_autodeploy_core`.

pub mod adapters;
pub mod handlers;
pub mod telemetry;
