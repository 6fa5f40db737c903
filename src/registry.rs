//! Construction of layers by type name.

use crate::backend::{cpu::CpuBackend, stub::GpuStubBackend};
use crate::config::LayerParameter;
use crate::element::Element;
use crate::error::Error;
use crate::layers::l1_loss::{L1LossLayer, L1_LOSS_TYPE};
use crate::layers::Layer;
use crate::Device;
use std::collections::BTreeMap;

/// Builds a boxed layer from its configuration block.
pub type LayerCreator<T> = fn(&LayerParameter) -> Result<Box<dyn Layer<T>>, Error>;

/// Maps layer type names to their constructors.
///
/// ```rust
/// use blob_l1_loss::{LayerParameter, LayerRegistry};
///
/// let registry = LayerRegistry::<f32>::with_defaults();
/// let layer = registry.create(&LayerParameter::l1_loss("loss")).unwrap();
/// assert_eq!(layer.layer_type(), "L1Loss");
/// ```
pub struct LayerRegistry<T: Element> {
    creators: BTreeMap<String, LayerCreator<T>>,
}

fn create_l1_loss<T: Element>(param: &LayerParameter) -> Result<Box<dyn Layer<T>>, Error> {
    let layer: Box<dyn Layer<T>> = match param.device {
        Device::Cpu => Box::new(L1LossLayer::<T, CpuBackend>::from_layer_parameter(param)?),
        Device::Gpu => Box::new(L1LossLayer::<T, GpuStubBackend>::from_layer_parameter(param)?),
    };
    Ok(layer)
}

impl<T: Element> LayerRegistry<T> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            creators: BTreeMap::new(),
        }
    }

    /// A registry with every layer type this crate provides.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.creators.insert(L1_LOSS_TYPE.to_string(), create_l1_loss::<T>);
        registry
    }

    /// Adds a constructor. Registering a type name twice is an error.
    pub fn register(&mut self, layer_type: &str, creator: LayerCreator<T>) -> Result<(), Error> {
        if self.creators.contains_key(layer_type) {
            return Err(Error::InvalidOperation(format!(
                "layer type {} already registered",
                layer_type
            )));
        }
        self.creators.insert(layer_type.to_string(), creator);
        Ok(())
    }

    /// Instantiates the layer named by `param.layer_type`.
    pub fn create(&self, param: &LayerParameter) -> Result<Box<dyn Layer<T>>, Error> {
        let creator = self
            .creators
            .get(&param.layer_type)
            .ok_or_else(|| Error::UnknownLayerType(param.layer_type.clone()))?;
        debug_println!(
            "creating layer '{}' of type {} ({})",
            param.name,
            param.layer_type,
            T::NAME
        );
        creator(param)
    }

    /// Registered type names in sorted order.
    pub fn types(&self) -> Vec<&str> {
        self.creators.keys().map(String::as_str).collect()
    }
}

impl<T: Element> Default for LayerRegistry<T> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_contain_l1_loss() {
        let registry = LayerRegistry::<f64>::with_defaults();
        assert_eq!(registry.types(), vec!["L1Loss"]);
        assert!(LayerRegistry::<f64>::new().types().is_empty());
    }

    #[test]
    fn unknown_type_is_reported_by_name() {
        let registry = LayerRegistry::<f32>::with_defaults();
        let mut param = LayerParameter::l1_loss("x");
        param.layer_type = "Softmax".to_string();
        match registry.create(&param) {
            Err(Error::UnknownLayerType(name)) => assert_eq!(name, "Softmax"),
            other => panic!("unexpected result: {:?}", other.map(|l| l.layer_type())),
        }
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = LayerRegistry::<f32>::with_defaults();
        assert!(registry.register(L1_LOSS_TYPE, create_l1_loss::<f32>).is_err());
        registry.register("L1LossAlias", create_l1_loss::<f32>).unwrap();
        assert_eq!(registry.types(), vec!["L1Loss", "L1LossAlias"]);
    }
}
