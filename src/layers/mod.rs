//! Layer lifecycle shared by every layer type.

use crate::blob::Blob;
use crate::element::Element;
use crate::error::Error;

pub mod l1_loss;
pub mod loss;

/// Where a layer instance is in its reshape/forward/backward cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerState {
    /// Constructed, never reshaped.
    #[default]
    Uninitialized,
    /// Buffers sized for the current input shape; no forward since.
    Shaped,
    /// A forward pass has filled the buffers backward reads.
    Ready,
}

/// A computation step between bottom (input) and top (output) blobs.
///
/// Hosts call `reshape` whenever input shapes may have changed, then
/// `forward`, then optionally `backward` with the gradient of the tops
/// already written into their diffs.
pub trait Layer<T: Element>: Send {
    /// Registry key of this layer type.
    fn layer_type(&self) -> &'static str;

    fn exact_num_bottom_blobs(&self) -> Option<usize> {
        None
    }

    fn exact_num_top_blobs(&self) -> Option<usize> {
        None
    }

    /// Weight applied to top `top_index` when it contributes to the objective.
    fn loss_weight(&self, _top_index: usize) -> T {
        T::zero()
    }

    fn state(&self) -> LayerState;

    fn reshape(&mut self, bottom: &[&Blob<T>], top: &mut [&mut Blob<T>]) -> Result<(), Error>;

    /// Computes the tops and returns this layer's weighted contribution to the loss.
    fn forward(&mut self, bottom: &[&Blob<T>], top: &mut [&mut Blob<T>]) -> Result<T, Error>;

    /// Writes gradients into the diff of every bottom whose `propagate_down` entry is set.
    fn backward(
        &mut self,
        top: &[&Blob<T>],
        propagate_down: &[bool],
        bottom: &mut [&mut Blob<T>],
    ) -> Result<(), Error>;

    /// Fails with `BlobCountMismatch` if the blob counts disagree with the layer's arity.
    fn check_blob_counts(&self, num_bottom: usize, num_top: usize) -> Result<(), Error> {
        if let Some(expected) = self.exact_num_bottom_blobs() {
            if num_bottom != expected {
                return Err(Error::BlobCountMismatch {
                    layer: format!("{} (bottom)", self.layer_type()),
                    expected,
                    actual: num_bottom,
                });
            }
        }
        if let Some(expected) = self.exact_num_top_blobs() {
            if num_top != expected {
                return Err(Error::BlobCountMismatch {
                    layer: format!("{} (top)", self.layer_type()),
                    expected,
                    actual: num_top,
                });
            }
        }
        Ok(())
    }
}
