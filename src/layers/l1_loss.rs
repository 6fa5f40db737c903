//! Mean absolute error between a prediction and a label.
//!
//! Forward computes `loss = Σ|a - b| / N` where `N` is the batch size (the
//! leading dimension of the prediction), not the element count. Backward
//! distributes the upstream scalar gradient `g` as `±g / N * sign(a - b)`,
//! positive for the prediction and negative for the label. `sign(0) = 0`, so
//! elements where prediction and label agree receive no gradient.

use crate::array::Array;
use crate::backend::{cpu::CpuBackend, Backend};
use crate::blob::Blob;
use crate::config::{L1LossParameter, LayerParameter};
use crate::debug::AsciiTrace;
use crate::element::Element;
use crate::error::Error;
use crate::hooks::ForwardHook;
use crate::layers::loss::{reshape_loss_top, LOSS_NUM_BOTTOM, LOSS_NUM_TOP};
use crate::layers::{Layer, LayerState};
use std::fmt;
use std::marker::PhantomData;

pub const L1_LOSS_TYPE: &str = "L1Loss";

/// L1 loss layer with cached difference and sign buffers.
///
/// The buffers are sized by [`reshape`](Layer::reshape) to the prediction's
/// shape, written by `forward` and read by `backward`. They belong to this
/// instance alone.
pub struct L1LossLayer<T: Element, B: Backend = CpuBackend> {
    param: L1LossParameter,
    loss_weight: T,
    diff: Array<T>,
    sign: Array<T>,
    state: LayerState,
    hooks: Vec<Box<dyn ForwardHook<T>>>,
    _backend: PhantomData<B>,
}

impl<T: Element, B: Backend> L1LossLayer<T, B> {
    /// Creates the layer. With `param.debug` set, an [`AsciiTrace`] printing
    /// to stdout is installed.
    pub fn new(param: L1LossParameter) -> Self {
        let mut layer = Self {
            param,
            loss_weight: T::one(),
            diff: Array::zeros(&[0]),
            sign: Array::zeros(&[0]),
            state: LayerState::Uninitialized,
            hooks: Vec::new(),
            _backend: PhantomData,
        };
        if layer.param.debug {
            layer.add_hook(Box::new(AsciiTrace::new()));
        }
        layer
    }

    /// Builds the layer from a configuration block whose type is `"L1Loss"`.
    pub fn from_layer_parameter(param: &LayerParameter) -> Result<Self, Error> {
        if param.layer_type != L1_LOSS_TYPE {
            return Err(Error::InvalidOperation(format!(
                "cannot build {} from a {:?} block",
                L1_LOSS_TYPE, param.layer_type
            )));
        }
        let loss_weight = T::from_f64(param.loss_weight(0)).ok_or_else(|| {
            Error::InvalidOperation(format!(
                "loss weight {} does not fit {}",
                param.loss_weight(0),
                T::NAME
            ))
        })?;
        let mut layer = Self::new(param.l1loss_param.clone());
        layer.loss_weight = loss_weight;
        debug_println!(
            "built {} '{}' on {} (debug={})",
            L1_LOSS_TYPE,
            param.name,
            B::name(),
            param.l1loss_param.debug
        );
        Ok(layer)
    }

    pub fn param(&self) -> &L1LossParameter {
        &self.param
    }

    /// Registers a hook run after every forward pass.
    pub fn add_hook(&mut self, hook: Box<dyn ForwardHook<T>>) {
        self.hooks.push(hook);
    }

    pub fn clear_hooks(&mut self) {
        self.hooks.clear();
    }

    pub fn num_hooks(&self) -> usize {
        self.hooks.len()
    }

    /// `prediction - label` from the latest forward pass.
    pub fn diff(&self) -> &Array<T> {
        &self.diff
    }

    /// `sign(prediction - label)` from the latest forward pass.
    pub fn sign(&self) -> &Array<T> {
        &self.sign
    }
}

impl<T: Element, B: Backend> Layer<T> for L1LossLayer<T, B> {
    fn layer_type(&self) -> &'static str {
        L1_LOSS_TYPE
    }

    fn exact_num_bottom_blobs(&self) -> Option<usize> {
        Some(LOSS_NUM_BOTTOM)
    }

    fn exact_num_top_blobs(&self) -> Option<usize> {
        Some(LOSS_NUM_TOP)
    }

    fn loss_weight(&self, top_index: usize) -> T {
        if top_index == 0 {
            self.loss_weight
        } else {
            T::zero()
        }
    }

    fn state(&self) -> LayerState {
        self.state
    }

    fn reshape(&mut self, bottom: &[&Blob<T>], top: &mut [&mut Blob<T>]) -> Result<(), Error> {
        self.check_blob_counts(bottom.len(), top.len())?;
        let (prediction, label) = (bottom[0], bottom[1]);
        if prediction.count_from(1) != label.count_from(1) {
            return Err(Error::ShapeMismatch {
                expected: prediction.shape().iter().skip(1).copied().collect(),
                actual: label.shape().iter().skip(1).copied().collect(),
            });
        }
        reshape_loss_top(bottom, top)?;

        let changed = self.diff.reshape_like(prediction.shape());
        self.sign.reshape_like(prediction.shape());
        if changed || self.state == LayerState::Uninitialized {
            self.state = LayerState::Shaped;
        }
        debug_println!(
            "reshape: prediction {:?}, label {:?}, buffers reallocated: {}",
            prediction.shape(),
            label.shape(),
            changed
        );
        Ok(())
    }

    fn forward(&mut self, bottom: &[&Blob<T>], top: &mut [&mut Blob<T>]) -> Result<T, Error> {
        self.check_blob_counts(bottom.len(), top.len())?;
        if self.state == LayerState::Uninitialized {
            return Err(Error::InvalidState(
                "forward called before reshape".to_string(),
            ));
        }
        let (prediction, label) = (bottom[0], bottom[1]);
        if prediction.shape() != self.diff.shape() {
            return Err(Error::ShapeMismatch {
                expected: self.diff.shape().to_vec(),
                actual: prediction.shape().to_vec(),
            });
        }
        if top[0].count() != 1 {
            return Err(Error::InvalidState(format!(
                "loss output must hold one element, shape is {:?}; reshape the layer first",
                top[0].shape()
            )));
        }

        B::sub(prediction.data(), label.data(), &mut self.diff)?;
        B::sign(&self.diff, &mut self.sign)?;
        let abs_sum = B::asum(&self.diff)?;
        let loss = abs_sum / T::from_count(prediction.num());

        top[0].data_mut().fill(loss);
        self.state = LayerState::Ready;
        debug_println!(
            "forward: abs_sum={} num={} loss={}",
            abs_sum,
            prediction.num(),
            loss
        );

        for hook in self.hooks.iter_mut() {
            hook.on_forward(bottom, loss);
        }
        Ok(loss * self.loss_weight)
    }

    fn backward(
        &mut self,
        top: &[&Blob<T>],
        propagate_down: &[bool],
        bottom: &mut [&mut Blob<T>],
    ) -> Result<(), Error> {
        self.check_blob_counts(bottom.len(), top.len())?;
        if propagate_down.len() != bottom.len() {
            return Err(Error::InvalidOperation(format!(
                "propagate_down has {} entries for {} bottoms",
                propagate_down.len(),
                bottom.len()
            )));
        }
        if self.state != LayerState::Ready {
            return Err(Error::InvalidState(format!(
                "backward requires a forward pass since the last reshape (state: {:?})",
                self.state
            )));
        }

        let upstream = top[0]
            .diff()
            .get_data()
            .iter()
            .next()
            .copied()
            .ok_or_else(|| Error::InvalidState("loss output has no gradient".to_string()))?;

        for (i, blob) in bottom.iter_mut().enumerate() {
            if !propagate_down[i] {
                continue;
            }
            let direction = if i == 0 { T::one() } else { -T::one() };
            let alpha = direction * upstream / T::from_count(blob.num());
            B::axpby(alpha, &self.sign, T::zero(), blob.diff_mut())?;
            debug_println!("backward: bottom {} alpha={}", i, alpha);
        }
        Ok(())
    }
}

impl<T: Element, B: Backend> fmt::Debug for L1LossLayer<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("L1LossLayer")
            .field("element", &T::NAME)
            .field("backend", &B::name())
            .field("param", &self.param)
            .field("loss_weight", &self.loss_weight)
            .field("buffer_shape", &self.diff.shape())
            .field("state", &self.state)
            .field("hooks_count", &self.hooks.len())
            .finish()
    }
}
