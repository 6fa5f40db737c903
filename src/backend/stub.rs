//! Placeholder accelerator backend.
//!
//! Layers can be instantiated against it so a host can wire up a GPU
//! configuration, but every primitive fails with `Error::Unimplemented`.

use crate::array::Array;
use crate::backend::Backend;
use crate::element::Element;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpuStubBackend;

fn no_gpu<R>(op: &str) -> Result<R, Error> {
    Err(Error::Unimplemented(format!(
        "{op} on {}: built without accelerator support",
        GpuStubBackend::name()
    )))
}

impl Backend for GpuStubBackend {
    fn name() -> &'static str {
        "gpu-stub"
    }

    fn sub<T: Element>(_a: &Array<T>, _b: &Array<T>, _out: &mut Array<T>) -> Result<(), Error> {
        no_gpu("sub")
    }

    fn sign<T: Element>(_x: &Array<T>, _out: &mut Array<T>) -> Result<(), Error> {
        no_gpu("sign")
    }

    fn asum<T: Element>(_x: &Array<T>) -> Result<T, Error> {
        no_gpu("asum")
    }

    fn axpby<T: Element>(
        _alpha: T,
        _x: &Array<T>,
        _beta: T,
        _y: &mut Array<T>,
    ) -> Result<(), Error> {
        no_gpu("axpby")
    }
}
