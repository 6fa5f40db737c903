//! Layer configuration blocks, read from JSON.
//!
//! Every field is optional in the source document; missing fields take
//! their `Default` values.
//!
//! ```rust
//! use blob_l1_loss::LayerParameter;
//!
//! let param = LayerParameter::from_json_str(
//!     r#"{ "name": "loss", "type": "L1Loss", "bottom": ["pred", "label"],
//!          "top": ["loss"], "l1loss_param": { "debug": true } }"#,
//! ).unwrap();
//! assert!(param.l1loss_param.debug);
//! assert_eq!(param.loss_weight(0), 1.0);
//! ```

use crate::error::Error;
use crate::Device;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options specific to the L1 loss layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct L1LossParameter {
    /// Emit an ASCII rendering of both inputs every 5th forward pass.
    pub debug: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerParameter {
    pub name: String,
    /// Registry key, e.g. `"L1Loss"`.
    #[serde(rename = "type")]
    pub layer_type: String,
    pub bottom: Vec<String>,
    pub top: Vec<String>,
    /// Per-top loss weights. Loss layers default to 1.0 for unlisted tops.
    pub loss_weight: Vec<f64>,
    pub device: Device,
    pub l1loss_param: L1LossParameter,
}

impl LayerParameter {
    /// Minimal block for an L1 loss layer named `name`.
    pub fn l1_loss(name: &str) -> Self {
        Self {
            name: name.to_string(),
            layer_type: "L1Loss".to_string(),
            ..Default::default()
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let source = fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loss weight for top `index`, 1.0 when not configured.
    pub fn loss_weight(&self, index: usize) -> f64 {
        self.loss_weight.get(index).copied().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let param = LayerParameter::from_json_str("{}").unwrap();
        assert_eq!(param, LayerParameter::default());
        assert!(!param.l1loss_param.debug);
        assert_eq!(param.device, Device::Cpu);
    }

    #[test]
    fn device_is_lowercase() {
        let param = LayerParameter::from_json_str(r#"{ "device": "gpu" }"#).unwrap();
        assert_eq!(param.device, Device::Gpu);
        assert!(LayerParameter::from_json_str(r#"{ "device": "tpu" }"#).is_err());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = LayerParameter::from_json_str("{ \"name\": ").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn json_round_trip_keeps_type_key() {
        let mut param = LayerParameter::l1_loss("loss");
        param.l1loss_param.debug = true;
        let json = param.to_json_string().unwrap();
        assert!(json.contains("\"type\": \"L1Loss\""));
        assert_eq!(LayerParameter::from_json_str(&json).unwrap(), param);
    }
}
