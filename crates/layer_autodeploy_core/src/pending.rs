use std::collections::HashSet;

use crate::contract::FunctionDescriptor;

/// Functions still awaiting a successful deploy in the current fleet run.
///
/// Lives in memory only. It is filled from discovery when empty, shrinks as
/// functions complete, and is cleared when a run finishes, so an interrupted
/// run can be resumed by the same process without rediscovering the fleet.
///
/// `order` keeps discovery order; `remaining` is the authoritative membership.
/// Completed entries stay in `order` until the next `fill` or `clear`.
#[derive(Debug, Clone, Default)]
pub struct PendingWorkSet {
    order: Vec<FunctionDescriptor>,
    remaining: HashSet<String>,
}

impl PendingWorkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Replaces the contents, dropping repeated function names.
    pub fn fill(&mut self, functions: Vec<FunctionDescriptor>) {
        self.clear();
        for function in functions {
            if self.remaining.insert(function.function_name.clone()) {
                self.order.push(function);
            }
        }
    }

    /// Remaining functions in discovery order.
    pub fn snapshot(&self) -> Vec<FunctionDescriptor> {
        self.order
            .iter()
            .filter(|function| self.remaining.contains(&function.function_name))
            .cloned()
            .collect()
    }

    pub fn contains(&self, function_name: &str) -> bool {
        self.remaining.contains(function_name)
    }

    pub fn complete(&mut self, function_name: &str) -> bool {
        self.remaining.remove(function_name)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.remaining.clear();
    }
}

impl FromIterator<FunctionDescriptor> for PendingWorkSet {
    fn from_iter<I: IntoIterator<Item = FunctionDescriptor>>(iter: I) -> Self {
        let mut set = Self::new();
        set.fill(iter.into_iter().collect());
        set
    }
}
