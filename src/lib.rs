//! An L1 (mean absolute error) loss layer over a small blob framework.
//!
//! This library provides:
//! - `Blob` storage with separate value and gradient arrays
//! - A `Layer` lifecycle (reshape, forward, backward) and a registry that
//!   constructs layers by type name from a JSON configuration block
//! - `L1LossLayer`, generic over `f32`/`f64` and over the math `Backend`
//!
//! # Features
//! - `debug_logs` - Prints trace lines from reshape/forward/backward
//! - `serialization` - Enables serde support for `Array` and `Blob`
//!
//! # Example
//! ```rust
//! use blob_l1_loss::{Blob, Layer, L1LossLayer};
//!
//! fn main() -> Result<(), blob_l1_loss::Error> {
//!     let prediction = Blob::<f32>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2])?;
//!     let target = Blob::<f32>::new(&[2, 2]);
//!     let mut loss = Blob::scalar();
//!
//!     let mut layer = L1LossLayer::<f32>::new(Default::default());
//!     layer.reshape(&[&prediction, &target], &mut [&mut loss])?;
//!     let value = layer.forward(&[&prediction, &target], &mut [&mut loss])?;
//!     assert_eq!(value, 5.0);
//!     Ok(())
//! }
//! ```

// --- Central debug_println macro definition ---
/// Conditional logging macro. Prints if 'debug_logs' feature is enabled.
#[cfg(feature = "debug_logs")]
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        ::std::println!("[DEBUG {}] {}", module_path!(), ::std::format_args!($($arg)*))
    };
}

/// Conditional logging macro (disabled version). Does nothing.
#[cfg(not(feature = "debug_logs"))]
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {};
}

pub mod array;
pub mod backend;
pub mod blob;
pub mod config;
pub mod debug;
pub mod element;
pub mod error;
pub mod filler;
pub mod hooks;
pub mod layers;
pub mod registry;

pub mod test_utils;

use serde::{Deserialize, Serialize};

/// Where a layer runs its math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// CPU via `ndarray`
    #[default]
    Cpu,
    /// Accelerator; only a stub backend exists
    Gpu,
}

pub use array::Array;
pub use backend::cpu::CpuBackend;
pub use backend::stub::GpuStubBackend;
pub use backend::Backend;
pub use blob::Blob;
pub use config::{L1LossParameter, LayerParameter};
pub use debug::{debug_symbol, AsciiTrace};
pub use element::Element;
pub use error::Error;
pub use filler::{ConstantFiller, Filler, GaussianFiller, UniformFiller};
pub use hooks::{FnHook, ForwardHook};
pub use layers::l1_loss::L1LossLayer;
pub use layers::{Layer, LayerState};
pub use registry::LayerRegistry;
