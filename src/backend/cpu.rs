//! CPU backend implementation using `ndarray`.

use crate::array::Array;
use crate::backend::{check_same_count, Backend};
use crate::element::Element;
use crate::error::Error;
use ndarray::{ArrayView1, ArrayViewMut1, Zip};

/// Marker struct for the CPU backend.
/// Implements the `Backend` trait with `ndarray::Zip` over flattened views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuBackend;

impl Backend for CpuBackend {
    fn name() -> &'static str {
        "cpu"
    }

    fn sub<T: Element>(a: &Array<T>, b: &Array<T>, out: &mut Array<T>) -> Result<(), Error> {
        check_same_count("sub", a, b)?;
        check_same_count("sub", a, out)?;

        let a_view = ArrayView1::from(a.as_slice()?);
        let b_view = ArrayView1::from(b.as_slice()?);
        let out_view = ArrayViewMut1::from(out.as_mut_slice()?);
        Zip::from(out_view)
            .and(a_view)
            .and(b_view)
            .for_each(|o, &x, &y| *o = x - y);
        Ok(())
    }

    fn sign<T: Element>(x: &Array<T>, out: &mut Array<T>) -> Result<(), Error> {
        check_same_count("sign", x, out)?;

        let x_view = ArrayView1::from(x.as_slice()?);
        let out_view = ArrayViewMut1::from(out.as_mut_slice()?);
        Zip::from(out_view)
            .and(x_view)
            .for_each(|o, &v| *o = v.sign());
        Ok(())
    }

    fn asum<T: Element>(x: &Array<T>) -> Result<T, Error> {
        Ok(x
            .get_data()
            .iter()
            .fold(T::zero(), |acc, &v| acc + v.abs()))
    }

    fn axpby<T: Element>(
        alpha: T,
        x: &Array<T>,
        beta: T,
        y: &mut Array<T>,
    ) -> Result<(), Error> {
        check_same_count("axpby", x, y)?;

        let x_view = ArrayView1::from(x.as_slice()?);
        let y_view = ArrayViewMut1::from(y.as_mut_slice()?);
        if beta == T::zero() {
            Zip::from(y_view)
                .and(x_view)
                .for_each(|out, &v| *out = alpha * v);
        } else {
            Zip::from(y_view)
                .and(x_view)
                .for_each(|out, &v| *out = alpha * v + beta * *out);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn arr(values: &[f32], shape: &[usize]) -> Array<f32> {
        Array::from_vec(values.to_vec(), shape).unwrap()
    }

    #[test]
    fn sub_works_across_shapes_with_equal_count() {
        let a = arr(&[5.0, 4.0, 3.0, 2.0, 1.0, 0.0], &[2, 3]);
        let b = arr(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0], &[2, 3, 1]);
        let mut out = Array::zeros(&[2, 3]);
        CpuBackend::sub(&a, &b, &mut out).unwrap();
        assert_eq!(out.to_vec(), vec![4.0, 3.0, 2.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn sub_rejects_count_mismatch() {
        let a = arr(&[1.0, 2.0], &[2]);
        let b = arr(&[1.0, 2.0, 3.0], &[3]);
        let mut out = Array::zeros(&[2]);
        assert!(matches!(
            CpuBackend::sub(&a, &b, &mut out),
            Err(Error::IncompatibleShapes { .. })
        ));
    }

    #[test]
    fn sign_maps_zero_to_zero() {
        let x = arr(&[-3.0, 0.0, 0.5, -0.0], &[4]);
        let mut out = Array::zeros(&[4]);
        CpuBackend::sign(&x, &mut out).unwrap();
        assert_eq!(out.to_vec(), vec![-1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn asum_sums_magnitudes() {
        let x = arr(&[-1.5, 2.0, -0.5, 0.0], &[2, 2]);
        assert_abs_diff_eq!(CpuBackend::asum(&x).unwrap(), 4.0, epsilon = 1e-6);
        assert_eq!(CpuBackend::asum(&Array::<f32>::zeros(&[0])).unwrap(), 0.0);
    }

    #[test]
    fn axpby_with_zero_beta_overwrites() {
        let x = arr(&[1.0, -1.0, 0.0], &[3]);
        let mut y = arr(&[f32::NAN, 7.0, 7.0], &[3]);
        CpuBackend::axpby(2.0, &x, 0.0, &mut y).unwrap();
        assert_eq!(y.to_vec(), vec![2.0, -2.0, 0.0]);
    }

    #[test]
    fn axpby_blends_with_nonzero_beta() {
        let x = arr(&[1.0, 2.0], &[2]);
        let mut y = arr(&[10.0, 20.0], &[2]);
        CpuBackend::axpby(3.0, &x, 0.5, &mut y).unwrap();
        assert_eq!(y.to_vec(), vec![8.0, 16.0]);
    }
}
