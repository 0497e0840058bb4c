use crate::layer_ref::LayerReference;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub new_layers: Vec<LayerReference>,
    pub changed: bool,
    /// Same-family references dropped to make room for the target.
    pub replaced: Vec<LayerReference>,
}

/// Computes the layer list a function should carry so that `target` is
/// attached exactly once and no other version of its family remains.
///
/// If `target` is already attached the list is returned untouched with
/// `changed == false`. Otherwise every same-family reference is removed,
/// unrelated references keep their relative order, and `target` is appended.
pub fn reconcile(current_layers: &[LayerReference], target: &LayerReference) -> Reconciliation {
    if current_layers.contains(target) {
        return Reconciliation {
            new_layers: current_layers.to_vec(),
            changed: false,
            replaced: Vec::new(),
        };
    }

    let (replaced, mut new_layers): (Vec<_>, Vec<_>) = current_layers
        .iter()
        .cloned()
        .partition(|layer| layer.same_family(target));
    new_layers.push(target.clone());

    Reconciliation {
        new_layers,
        changed: true,
        replaced,
    }
}
