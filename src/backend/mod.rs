//! Backend trait definition and module structure.
//!
//! A backend supplies the elementwise primitives layers are written against.
//! All operations work on the flattened element order of their arrays, so
//! operands only need matching element counts, not matching shapes.

use crate::array::Array;
use crate::element::Element;
use crate::error::Error;
use std::fmt::Debug;

pub mod cpu;
pub mod stub;

pub trait Backend: Sized + Debug + Clone + Send + Sync + 'static {
    /// Name used in log lines and error messages.
    fn name() -> &'static str;

    /// `out[i] = a[i] - b[i]`.
    fn sub<T: Element>(a: &Array<T>, b: &Array<T>, out: &mut Array<T>) -> Result<(), Error>;

    /// `out[i] = sign(x[i])`, see [`Element::sign`].
    fn sign<T: Element>(x: &Array<T>, out: &mut Array<T>) -> Result<(), Error>;

    /// Sum of absolute values.
    fn asum<T: Element>(x: &Array<T>) -> Result<T, Error>;

    /// `y[i] = alpha * x[i] + beta * y[i]`.
    ///
    /// With `beta == 0` the previous contents of `y` are not read.
    fn axpby<T: Element>(alpha: T, x: &Array<T>, beta: T, y: &mut Array<T>)
        -> Result<(), Error>;
}

/// Fails with `IncompatibleShapes` unless `a` and `b` hold the same number of elements.
pub(crate) fn check_same_count<T: Element>(
    op: &str,
    a: &Array<T>,
    b: &Array<T>,
) -> Result<(), Error> {
    if a.size() != b.size() {
        return Err(Error::IncompatibleShapes {
            op: op.to_string(),
            shape_a: a.shape().to_vec(),
            shape_b: b.shape().to_vec(),
        });
    }
    Ok(())
}
