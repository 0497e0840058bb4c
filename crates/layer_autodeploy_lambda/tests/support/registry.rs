#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use layer_autodeploy_core::{FunctionDescriptor, LayerReference};
use layer_autodeploy_lambda::adapters::registry::FunctionRegistry;

use super::function_arn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    ListFunctions,
    ListTags(String),
    GetLayers(String),
    UpdateLayers(String, Vec<String>),
}

/// Seed data for one function held by [`RecordingRegistry`].
#[derive(Debug, Clone, Default)]
pub struct FakeFunction {
    pub name: String,
    pub tags: Vec<String>,
    pub layers: Vec<String>,
    pub fail_tags: bool,
    pub fail_get: bool,
    pub fail_update: bool,
}

impl FakeFunction {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|tag| tag.to_string()).collect();
        self
    }

    pub fn layers(mut self, layers: &[&str]) -> Self {
        self.layers = layers.iter().map(|layer| layer.to_string()).collect();
        self
    }

    pub fn failing_tags(mut self) -> Self {
        self.fail_tags = true;
        self
    }

    pub fn failing_get(mut self) -> Self {
        self.fail_get = true;
        self
    }

    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    pub fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new(self.name.clone(), function_arn(&self.name))
    }
}

/// In-memory fleet that records every control-plane call.
///
/// Successful updates are applied, so a second run observes the new layers.
pub struct RecordingRegistry {
    order: Vec<String>,
    functions: Mutex<HashMap<String, FakeFunction>>,
    discovery_error: Option<String>,
    panic_on_get: Mutex<HashSet<String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingRegistry {
    pub fn new(functions: Vec<FakeFunction>) -> Self {
        Self {
            order: functions.iter().map(|function| function.name.clone()).collect(),
            functions: Mutex::new(
                functions
                    .into_iter()
                    .map(|function| (function.name.clone(), function))
                    .collect(),
            ),
            discovery_error: None,
            panic_on_get: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_discovery(message: &str) -> Self {
        Self {
            discovery_error: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    /// The next `get_layers` for this function panics; later calls succeed.
    pub fn panic_once_on_get(&self, function_name: &str) {
        self.panic_on_get
            .lock()
            .expect("poisoned mutex")
            .insert(function_name.to_string());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub fn updates(&self) -> Vec<(String, Vec<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::UpdateLayers(name, layers) => Some((name, layers)),
                _ => None,
            })
            .collect()
    }

    pub fn updated_names(&self) -> Vec<String> {
        self.updates().into_iter().map(|(name, _)| name).collect()
    }

    pub fn list_functions_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, RecordedCall::ListFunctions))
            .count()
    }

    pub fn layers_of(&self, function_name: &str) -> Vec<String> {
        self.functions
            .lock()
            .expect("poisoned mutex")
            .get(function_name)
            .map(|function| function.layers.clone())
            .unwrap_or_default()
    }

    pub fn set_tags(&self, function_name: &str, tags: &[&str]) {
        if let Some(function) = self
            .functions
            .lock()
            .expect("poisoned mutex")
            .get_mut(function_name)
        {
            function.tags = tags.iter().map(|tag| tag.to_string()).collect();
        }
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().expect("poisoned mutex").push(call);
    }

    fn with_function<T>(
        &self,
        function_name: &str,
        f: impl FnOnce(&mut FakeFunction) -> Result<T, String>,
    ) -> Result<T, String> {
        let mut functions = self.functions.lock().expect("poisoned mutex");
        let function = functions
            .get_mut(function_name)
            .ok_or_else(|| format!("ResourceNotFoundException: {function_name}"))?;
        f(function)
    }
}

impl FunctionRegistry for RecordingRegistry {
    fn list_functions(&self) -> Result<Vec<FunctionDescriptor>, String> {
        self.record(RecordedCall::ListFunctions);
        if let Some(error) = &self.discovery_error {
            return Err(error.clone());
        }
        Ok(self
            .order
            .iter()
            .map(|name| FunctionDescriptor::new(name.clone(), function_arn(name)))
            .collect())
    }

    fn list_tags(&self, function_arn: &str) -> Result<Vec<String>, String> {
        self.record(RecordedCall::ListTags(function_arn.to_string()));
        let name = function_arn
            .rsplit(':')
            .next()
            .unwrap_or(function_arn)
            .to_string();
        self.with_function(&name, |function| {
            if function.fail_tags {
                return Err("AccessDeniedException: lambda:ListTags".to_string());
            }
            Ok(function.tags.clone())
        })
    }

    fn get_layers(&self, function_name: &str) -> Result<Vec<LayerReference>, String> {
        self.record(RecordedCall::GetLayers(function_name.to_string()));
        let should_panic = self
            .panic_on_get
            .lock()
            .expect("poisoned mutex")
            .remove(function_name);
        if should_panic {
            panic!("registry crashed while reading {function_name}");
        }
        self.with_function(function_name, |function| {
            if function.fail_get {
                return Err("ServiceException: configuration unavailable".to_string());
            }
            Ok(function
                .layers
                .iter()
                .map(|layer| LayerReference::new(layer.clone()))
                .collect())
        })
    }

    fn update_layers(&self, function_name: &str, layers: &[LayerReference]) -> Result<(), String> {
        let layers: Vec<String> = layers
            .iter()
            .map(|layer| layer.as_str().to_string())
            .collect();
        self.record(RecordedCall::UpdateLayers(
            function_name.to_string(),
            layers.clone(),
        ));
        self.with_function(function_name, |function| {
            if function.fail_update {
                return Err("ResourceConflictException: update in progress".to_string());
            }
            function.layers = layers;
            Ok(())
        })
    }
}
