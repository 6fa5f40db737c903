//! Fill blob data with constant or random values.

use crate::blob::Blob;
use crate::element::Element;
use crate::error::Error;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Normal, Uniform};

pub trait Filler<T: Element> {
    /// Overwrites `blob`'s data; the gradient is left alone.
    fn fill(&self, blob: &mut Blob<T>) -> Result<(), Error>;
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

fn cast<T: Element>(value: f64) -> Result<T, Error> {
    T::from_f64(value).ok_or(Error::InitializationError)
}

fn fill_with<T, F>(blob: &mut Blob<T>, mut next: F) -> Result<(), Error>
where
    T: Element,
    F: FnMut() -> f64,
{
    for slot in blob.data_mut().get_data_mut().iter_mut() {
        *slot = cast(next())?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantFiller {
    pub value: f64,
}

impl<T: Element> Filler<T> for ConstantFiller {
    fn fill(&self, blob: &mut Blob<T>) -> Result<(), Error> {
        let value = cast(self.value)?;
        blob.data_mut().fill(value);
        Ok(())
    }
}

/// Samples from U(low, high).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformFiller {
    pub low: f64,
    pub high: f64,
    /// Fixed seed for reproducible fills; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl UniformFiller {
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            seed: None,
        }
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl<T: Element> Filler<T> for UniformFiller {
    fn fill(&self, blob: &mut Blob<T>) -> Result<(), Error> {
        if blob.count() == 0 {
            return Ok(());
        }
        let dist = Uniform::new(self.low, self.high).map_err(|_| Error::InitializationError)?;
        let mut rng = make_rng(self.seed);
        fill_with(blob, || rng.sample(&dist))
    }
}

/// Samples from N(mean, std^2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianFiller {
    pub mean: f64,
    pub std: f64,
    pub seed: Option<u64>,
}

impl GaussianFiller {
    pub fn new(mean: f64, std: f64) -> Self {
        Self {
            mean,
            std,
            seed: None,
        }
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl<T: Element> Filler<T> for GaussianFiller {
    fn fill(&self, blob: &mut Blob<T>) -> Result<(), Error> {
        // `Normal::new` accepts a negative std and mirrors the samples.
        if self.std.is_nan() || self.std < 0.0 {
            return Err(Error::InitializationError);
        }
        if blob.count() == 0 {
            return Ok(());
        }
        let dist = Normal::new(self.mean, self.std).map_err(|_| Error::InitializationError)?;
        let mut rng = make_rng(self.seed);
        fill_with(blob, || rng.sample(&dist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_fill_leaves_diff() {
        let mut blob = Blob::<f32>::new(&[2, 2]);
        blob.diff_mut().fill(3.0);
        ConstantFiller { value: 0.25 }.fill(&mut blob).unwrap();
        assert_eq!(blob.data().to_vec(), vec![0.25; 4]);
        assert_eq!(blob.diff().to_vec(), vec![3.0; 4]);
    }

    #[test]
    fn uniform_fill_stays_in_range() {
        let mut blob = Blob::<f64>::new(&[10, 10]);
        UniformFiller::new(-0.5, 0.5).fill(&mut blob).unwrap();
        assert!(blob.data().to_vec().iter().all(|v| (-0.5..0.5).contains(v)));
    }

    #[test]
    fn seeded_fills_are_reproducible() {
        let filler = GaussianFiller::new(0.0, 1.0).seeded(42);
        let mut a = Blob::<f32>::new(&[3, 4]);
        let mut b = Blob::<f32>::new(&[3, 4]);
        filler.fill(&mut a).unwrap();
        filler.fill(&mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_uniform_range_is_an_error() {
        let mut blob = Blob::<f32>::new(&[2]);
        assert!(matches!(
            UniformFiller::new(1.0, 0.0).fill(&mut blob),
            Err(Error::InitializationError)
        ));
    }

    #[test]
    fn negative_std_is_an_error() {
        let mut blob = Blob::<f32>::new(&[2]);
        assert!(matches!(
            GaussianFiller::new(0.0, -1.0).fill(&mut blob),
            Err(Error::InitializationError)
        ));
        assert!(GaussianFiller::new(0.0, f64::NAN).fill(&mut blob).is_err());
        assert_eq!(blob.data().to_vec(), vec![0.0; 2]);
    }
}
