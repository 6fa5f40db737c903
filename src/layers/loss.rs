//! Checks and output sizing common to loss layers.

use crate::blob::Blob;
use crate::element::Element;
use crate::error::Error;

/// Bottom/top arity of every loss layer: prediction and label in, scalar out.
pub const LOSS_NUM_BOTTOM: usize = 2;
pub const LOSS_NUM_TOP: usize = 1;

/// Validates the batch sizes of a loss layer's inputs and sizes its output.
///
/// Both bottoms must share their leading (batch) dimension. The single top
/// becomes a 0-dimensional scalar.
pub fn reshape_loss_top<T: Element>(
    bottom: &[&Blob<T>],
    top: &mut [&mut Blob<T>],
) -> Result<(), Error> {
    let (prediction, label) = match bottom {
        [prediction, label] => (*prediction, *label),
        _ => {
            return Err(Error::BlobCountMismatch {
                layer: "loss (bottom)".to_string(),
                expected: LOSS_NUM_BOTTOM,
                actual: bottom.len(),
            })
        }
    };
    if prediction.num() != label.num() {
        return Err(Error::ShapeMismatch {
            expected: prediction.shape().to_vec(),
            actual: label.shape().to_vec(),
        });
    }
    match top {
        [output] => {
            output.reshape(&[]);
            Ok(())
        }
        _ => Err(Error::BlobCountMismatch {
            layer: "loss (top)".to_string(),
            expected: LOSS_NUM_TOP,
            actual: top.len(),
        }),
    }
}
