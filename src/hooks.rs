//! Hook trait and implementations for observing layer forward passes.

use crate::blob::Blob;
use crate::element::Element;

/// Called by a layer after each forward pass with its inputs and the loss it produced.
pub trait ForwardHook<T: Element>: Send {
    fn on_forward(&mut self, bottom: &[&Blob<T>], loss: T);
}

impl<T, F> ForwardHook<T> for F
where
    T: Element,
    F: for<'a> FnMut(&'a [&'a Blob<T>], T) + Send + 'static,
{
    fn on_forward(&mut self, bottom: &[&Blob<T>], loss: T) {
        (self)(bottom, loss)
    }
}

/// An owned hook object wrapping a closure.
///
/// # Example
/// ```rust
/// use blob_l1_loss::{Blob, FnHook, L1LossLayer};
///
/// let mut layer = L1LossLayer::<f32>::new(Default::default());
/// layer.add_hook(Box::new(FnHook::new(|bottom: &[&Blob<f32>], loss: f32| {
///     println!("forward over {} inputs, loss={}", bottom.len(), loss);
/// })));
/// ```
pub struct FnHook<T: Element> {
    func: Box<dyn for<'a> FnMut(&'a [&'a Blob<T>], T) + Send>,
}

impl<T: Element> FnHook<T> {
    pub fn new<F>(func: F) -> Self
    where
        F: for<'a> FnMut(&'a [&'a Blob<T>], T) + Send + 'static,
    {
        Self {
            func: Box::new(func),
        }
    }
}

impl<T: Element> ForwardHook<T> for FnHook<T> {
    fn on_forward(&mut self, bottom: &[&Blob<T>], loss: T) {
        (self.func)(bottom, loss)
    }
}
