//! Value/gradient storage pair handed between layers.

use crate::array::Array;
use crate::element::Element;
use crate::error::Error;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A multi-dimensional array of values with a gradient array of the same shape.
///
/// The leading axis is the batch axis: [`num`](Blob::num) reports its size and
/// [`count_from(1)`](Blob::count_from) the per-sample element count.
///
/// # Example
/// ```rust
/// use blob_l1_loss::Blob;
///
/// let blob = Blob::<f32>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// assert_eq!(blob.num(), 2);
/// assert_eq!(blob.count_from(1), 2);
/// assert_eq!(blob.diff().to_vec(), vec![0.0; 4]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Blob<T: Element> {
    data: Array<T>,
    diff: Array<T>,
}

impl<T: Element> Blob<T> {
    /// Creates a zero-filled blob.
    pub fn new(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(shape),
            diff: Array::zeros(shape),
        }
    }

    /// Creates a 0-dimensional blob holding one value, used for loss outputs.
    pub fn scalar() -> Self {
        Self::new(&[])
    }

    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self, Error> {
        let data = Array::from_vec(data, shape)?;
        Ok(Self {
            diff: Array::zeros(shape),
            data,
        })
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn num(&self) -> usize {
        self.data.num()
    }

    pub fn count(&self) -> usize {
        self.data.size()
    }

    pub fn count_from(&self, start_axis: usize) -> usize {
        self.data.count_from(start_axis)
    }

    /// Axis size at `axis`, or 1 when the blob has fewer axes.
    pub fn dim(&self, axis: usize) -> usize {
        self.shape().get(axis).copied().unwrap_or(1)
    }

    pub fn data(&self) -> &Array<T> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array<T> {
        &mut self.data
    }

    pub fn diff(&self) -> &Array<T> {
        &self.diff
    }

    pub fn diff_mut(&mut self) -> &mut Array<T> {
        &mut self.diff
    }

    /// Replaces the gradient; the shape must match the data.
    pub fn set_diff(&mut self, diff: Array<T>) -> Result<(), Error> {
        if diff.shape() != self.shape() {
            return Err(Error::ShapeMismatch {
                expected: self.shape().to_vec(),
                actual: diff.shape().to_vec(),
            });
        }
        self.diff = diff;
        Ok(())
    }

    /// First element of the data, e.g. the value of a loss output.
    pub fn scalar_value(&self) -> Result<T, Error> {
        self.data
            .get_data()
            .iter()
            .next()
            .copied()
            .ok_or_else(|| Error::InvalidOperation("blob is empty".to_string()))
    }

    /// Writes `loss_weight` into the gradient of a scalar loss output.
    pub fn seed_loss_gradient(&mut self, loss_weight: T) -> Result<(), Error> {
        if self.count() != 1 {
            return Err(Error::InvalidOperation(format!(
                "loss gradient can only be seeded on a one-element blob, shape is {:?}",
                self.shape()
            )));
        }
        self.diff.fill(loss_weight);
        Ok(())
    }

    /// Resizes both arrays together. Returns `true` if the shape changed.
    pub fn reshape(&mut self, shape: &[usize]) -> bool {
        let changed = self.data.reshape_like(shape);
        self.diff.reshape_like(shape);
        changed
    }
}
