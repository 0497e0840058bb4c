use layer_autodeploy_core::{FunctionDescriptor, LayerReference};

/// Control-plane operations the reconciler needs from the function service.
///
/// Errors are opaque cause strings; callers attach the function name and
/// operation when reporting them.
pub trait FunctionRegistry {
    /// Every function in the region, pagination already resolved.
    fn list_functions(&self) -> Result<Vec<FunctionDescriptor>, String>;

    /// Tag names attached to the function.
    fn list_tags(&self, function_arn: &str) -> Result<Vec<String>, String>;

    fn get_layers(&self, function_name: &str) -> Result<Vec<LayerReference>, String>;

    fn update_layers(&self, function_name: &str, layers: &[LayerReference]) -> Result<(), String>;
}
