use crate::element::Element;
use crate::error::Error;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use ndarray::{ArrayD, IxDyn, ShapeError};
use std::fmt;

/// Dense, row-major storage for one side (data or diff) of a blob.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Array<T: Element> {
    pub(crate) data: ArrayD<T>,
}

impl<T: Element> Array<T> {
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self, Error> {
        let actual_len = data.len();
        let map_err = |_e: ShapeError| Error::ShapeMismatch {
            expected: shape.to_vec(),
            actual: vec![actual_len],
        };
        let array = ArrayD::from_shape_vec(IxDyn(shape), data).map_err(map_err)?;
        Ok(Self { data: array })
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: ArrayD::zeros(IxDyn(shape)),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the array contains no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of the leading (batch) axis; 1 for a 0-dimensional array.
    pub fn num(&self) -> usize {
        self.data.shape().first().copied().unwrap_or(1)
    }

    /// Number of elements spanned by the axes starting at `start_axis`.
    ///
    /// `count_from(1)` is the per-sample element count.
    pub fn count_from(&self, start_axis: usize) -> usize {
        self.data.shape().iter().skip(start_axis).product()
    }

    pub fn get_data(&self) -> &ArrayD<T> {
        &self.data
    }

    pub fn get_data_mut(&mut self) -> &mut ArrayD<T> {
        &mut self.data
    }

    /// Contiguous view of the elements in logical order.
    pub fn as_slice(&self) -> Result<&[T], Error> {
        self.data
            .as_slice()
            .ok_or_else(|| Error::ShapeError("array is not contiguous".to_string()))
    }

    pub fn as_mut_slice(&mut self) -> Result<&mut [T], Error> {
        self.data
            .as_slice_mut()
            .ok_or_else(|| Error::ShapeError("array is not contiguous".to_string()))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().copied().collect()
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Resizes to `shape`, zero-filling the contents.
    ///
    /// Returns `false` without touching the storage when the shape is unchanged.
    pub fn reshape_like(&mut self, shape: &[usize]) -> bool {
        if self.shape() == shape {
            return false;
        }
        self.data = ArrayD::zeros(IxDyn(shape));
        true
    }
}

impl<T: Element> fmt::Display for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_data())
    }
}

impl<T: Element> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Array<{}>(shape={:?}, data={:?})",
            T::NAME,
            self.shape(),
            self.get_data()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_from_skips_leading_axes() {
        let a = Array::<f32>::zeros(&[2, 3, 4, 5]);
        assert_eq!(a.num(), 2);
        assert_eq!(a.count_from(0), 120);
        assert_eq!(a.count_from(1), 60);
        assert_eq!(a.count_from(3), 5);
        assert_eq!(a.count_from(4), 1);
    }

    #[test]
    fn scalar_array_has_one_element() {
        let a = Array::<f64>::zeros(&[]);
        assert_eq!(a.size(), 1);
        assert_eq!(a.num(), 1);
        assert_eq!(a.count_from(1), 1);
    }

    #[test]
    fn reshape_like_is_noop_for_same_shape() {
        let mut a = Array::from_vec(vec![1.0f32, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        assert!(!a.reshape_like(&[2, 2]));
        assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);

        assert!(a.reshape_like(&[3, 2]));
        assert_eq!(a.shape(), &[3, 2]);
        assert_eq!(a.to_vec(), vec![0.0; 6]);
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let result = Array::from_vec(vec![1.0f32, 2.0, 3.0], &[2, 2]);
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    }
}
