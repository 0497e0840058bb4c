use chrono::Utc;
use layer_autodeploy_core::{
    AutodeployConfig, AutodeployError, FunctionDescriptor, PendingWorkSet, RunSummary,
};

use crate::adapters::registry::FunctionRegistry;
use crate::handlers::deploy::deploy;
use crate::handlers::filter::{evaluate_function, FilterDecision};

/// Drives the deployer over the whole fleet, one function at a time.
///
/// The driver owns the pending work set. Keep one driver per process so a run
/// cut short can be picked up by the next invocation without rediscovering
/// the fleet; a fresh process starts with an empty set.
#[derive(Debug, Default)]
pub struct FleetDriver {
    pending: PendingWorkSet,
}

impl FleetDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pending(pending: PendingWorkSet) -> Self {
        Self { pending }
    }

    pub fn pending(&self) -> &PendingWorkSet {
        &self.pending
    }

    /// Runs one full pass. Only a discovery failure aborts; every other
    /// failure is recorded in the returned summary.
    pub fn run(
        &mut self,
        config: &AutodeployConfig,
        registry: &dyn FunctionRegistry,
    ) -> Result<RunSummary, AutodeployError> {
        let started_at = Utc::now().to_rfc3339();
        let resumed = !self.pending.is_empty();

        if resumed {
            tracing::info!(
                component = "fleet",
                remaining = self.pending.len(),
                "resuming previous run"
            );
        } else {
            let functions = registry
                .list_functions()
                .map_err(AutodeployError::Discovery)?;
            tracing::info!(
                component = "fleet",
                discovered = functions.len(),
                "found functions in region"
            );
            self.pending.fill(functions);
        }

        let mut summary = RunSummary::new(started_at, self.pending.len(), resumed);
        let to_update = self.filter_pass(config, registry, &mut summary);
        summary.eligible = to_update.len();

        let names: Vec<&str> = to_update
            .iter()
            .map(|function| function.function_name.as_str())
            .collect();
        tracing::info!(
            component = "fleet",
            count = names.len(),
            functions = ?names,
            "functions to update"
        );

        for function in &to_update {
            let outcome = deploy(function, &config.target_layer, registry);
            if outcome.is_done() {
                self.pending.complete(&function.function_name);
            }
            summary.record_deploy(&function.function_name, &outcome);
        }

        self.pending.clear();
        summary.completed_at = Utc::now().to_rfc3339();

        tracing::info!(
            component = "fleet",
            discovered = summary.discovered,
            eligible = summary.eligible,
            updated = summary.updated,
            skipped = summary.skipped,
            failed = summary.failed,
            tag_lookup_failures = summary.tag_lookup_failures,
            "all done"
        );

        Ok(summary)
    }

    fn filter_pass(
        &self,
        config: &AutodeployConfig,
        registry: &dyn FunctionRegistry,
        summary: &mut RunSummary,
    ) -> Vec<FunctionDescriptor> {
        let mut to_update = Vec::new();
        for function in self.pending.snapshot() {
            match evaluate_function(&function, &config.policy, registry) {
                FilterDecision::Eligible => to_update.push(function),
                FilterDecision::Ineligible(_) => summary.record_ineligible(),
                FilterDecision::TagLookupFailed(message) => {
                    summary.record_tag_lookup_failure(&function.function_name, message)
                }
            }
        }
        to_update
    }
}
