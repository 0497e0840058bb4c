use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AutodeployError;
use crate::layer_ref::LayerReference;

/// Identity of one function in the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDescriptor {
    pub function_name: String,
    pub function_arn: String,
}

impl FunctionDescriptor {
    pub fn new(function_name: impl Into<String>, function_arn: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            function_arn: function_arn.into(),
        }
    }
}

/// CloudTrail `CreateFunction` record delivered through EventBridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFunctionEvent {
    pub detail: NewFunctionDetail,
}

/// A failed API call is still recorded by CloudTrail, with `errorCode` set
/// and `responseElements` null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFunctionDetail {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub response_elements: Option<FunctionDescriptor>,
}

impl NewFunctionEvent {
    pub fn into_descriptor(self) -> Result<FunctionDescriptor, AutodeployError> {
        if let Some(code) = self.detail.error_code {
            return Err(AutodeployError::InvalidEvent(format!(
                "CreateFunction call failed with {code}"
            )));
        }
        self.detail.response_elements.ok_or_else(|| {
            AutodeployError::InvalidEvent("event has no responseElements".to_string())
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedOperation {
    ListTags,
    GetConfiguration,
    UpdateConfiguration,
}

impl FailedOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListTags => "list_tags",
            Self::GetConfiguration => "get_configuration",
            Self::UpdateConfiguration => "update_configuration",
        }
    }
}

impl fmt::Display for FailedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployFailure {
    pub operation: FailedOperation,
    pub message: String,
}

impl DeployFailure {
    pub fn new(operation: FailedOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Result of running the deployer against one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Skipped,
    Updated { layers: Vec<LayerReference> },
    Failed(DeployFailure),
}

impl DeployOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Skipped | Self::Updated { .. })
    }
}

/// What happened to a function once eligibility is taken into account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FunctionOutcome {
    Ineligible {
        reason: String,
    },
    Skipped,
    Updated {
        layers: Vec<LayerReference>,
    },
    Failed {
        operation: FailedOperation,
        message: String,
    },
}

impl From<DeployOutcome> for FunctionOutcome {
    fn from(outcome: DeployOutcome) -> Self {
        match outcome {
            DeployOutcome::Skipped => Self::Skipped,
            DeployOutcome::Updated { layers } => Self::Updated { layers },
            DeployOutcome::Failed(failure) => Self::Failed {
                operation: failure.operation,
                message: failure.message,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionReport {
    pub function_name: String,
    #[serde(flatten)]
    pub outcome: FunctionOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub function_name: String,
    pub operation: FailedOperation,
    pub message: String,
}

/// Outcome counts for one fleet run.
///
/// `updated + skipped + failed == eligible`. Tag lookup failures are counted
/// separately because those functions never reach the deployer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: String,
    pub completed_at: String,
    pub resumed: bool,
    pub discovered: usize,
    pub eligible: usize,
    pub ineligible: usize,
    pub tag_lookup_failures: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<FailureRecord>,
}

impl RunSummary {
    pub fn new(started_at: impl Into<String>, discovered: usize, resumed: bool) -> Self {
        Self {
            started_at: started_at.into(),
            discovered,
            resumed,
            ..Self::default()
        }
    }

    pub fn record_ineligible(&mut self) {
        self.ineligible += 1;
    }

    pub fn record_tag_lookup_failure(&mut self, function_name: &str, message: impl Into<String>) {
        self.tag_lookup_failures += 1;
        self.failures.push(FailureRecord {
            function_name: function_name.to_string(),
            operation: FailedOperation::ListTags,
            message: message.into(),
        });
    }

    pub fn record_deploy(&mut self, function_name: &str, outcome: &DeployOutcome) {
        match outcome {
            DeployOutcome::Skipped => self.skipped += 1,
            DeployOutcome::Updated { .. } => self.updated += 1,
            DeployOutcome::Failed(failure) => {
                self.failed += 1;
                self.failures.push(FailureRecord {
                    function_name: function_name.to_string(),
                    operation: failure.operation,
                    message: failure.message.clone(),
                });
            }
        }
    }

    pub fn attempted(&self) -> usize {
        self.updated + self.skipped + self.failed
    }
}
