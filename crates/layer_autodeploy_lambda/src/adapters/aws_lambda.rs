use std::future::Future;

use aws_sdk_lambda::error::DisplayErrorContext;
use layer_autodeploy_core::{FunctionDescriptor, LayerReference};

use crate::adapters::discovery::{collect_all_functions, FunctionPage, FunctionPager};
use crate::adapters::registry::FunctionRegistry;

/// [`FunctionRegistry`] backed by the AWS Lambda control plane.
///
/// Calls block the current worker thread, so this must run inside a
/// multi-threaded Tokio runtime.
#[derive(Clone)]
pub struct AwsFunctionRegistry {
    client: aws_sdk_lambda::Client,
}

impl AwsFunctionRegistry {
    pub fn new(client: aws_sdk_lambda::Client) -> Self {
        Self { client }
    }

    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_lambda::Client::new(&config))
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

impl FunctionPager for AwsFunctionRegistry {
    fn fetch_page(&self, marker: Option<&str>, max_items: i32) -> Result<FunctionPage, String> {
        let client = self.client.clone();
        let marker = marker.map(str::to_string);

        block_on(async move {
            let output = client
                .list_functions()
                .set_marker(marker)
                .max_items(max_items)
                .send()
                .await
                .map_err(|error| {
                    format!("failed to list functions: {}", DisplayErrorContext(&error))
                })?;

            let functions = output
                .functions()
                .iter()
                .filter_map(|function| {
                    Some(FunctionDescriptor::new(
                        function.function_name()?,
                        function.function_arn()?,
                    ))
                })
                .collect();

            Ok(FunctionPage {
                functions,
                next_marker: output.next_marker().map(str::to_string),
            })
        })
    }
}

impl FunctionRegistry for AwsFunctionRegistry {
    fn list_functions(&self) -> Result<Vec<FunctionDescriptor>, String> {
        collect_all_functions(self, &mut rand::thread_rng())
    }

    fn list_tags(&self, function_arn: &str) -> Result<Vec<String>, String> {
        let client = self.client.clone();
        let resource = function_arn.to_string();

        block_on(async move {
            let output = client
                .list_tags()
                .resource(resource)
                .send()
                .await
                .map_err(|error| format!("failed to list tags: {}", DisplayErrorContext(&error)))?;

            Ok(output
                .tags()
                .map(|tags| tags.keys().cloned().collect())
                .unwrap_or_default())
        })
    }

    fn get_layers(&self, function_name: &str) -> Result<Vec<LayerReference>, String> {
        let client = self.client.clone();
        let function_name = function_name.to_string();

        block_on(async move {
            let output = client
                .get_function_configuration()
                .function_name(function_name)
                .send()
                .await
                .map_err(|error| {
                    format!(
                        "failed to get function configuration: {}",
                        DisplayErrorContext(&error)
                    )
                })?;

            Ok(output
                .layers()
                .iter()
                .filter_map(|layer| layer.arn().map(LayerReference::from))
                .collect())
        })
    }

    fn update_layers(&self, function_name: &str, layers: &[LayerReference]) -> Result<(), String> {
        let client = self.client.clone();
        let function_name = function_name.to_string();
        let layers = layers
            .iter()
            .map(|layer| layer.as_str().to_string())
            .collect::<Vec<_>>();

        block_on(async move {
            client
                .update_function_configuration()
                .function_name(function_name)
                .set_layers(Some(layers))
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    format!(
                        "failed to update function configuration: {}",
                        DisplayErrorContext(&error)
                    )
                })
        })
    }
}
