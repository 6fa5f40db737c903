//! Robust line fit with the L1 loss layer on the CPU backend.
//!
//! Fits y = w * x + b to points from y = 2x + 1 where every tenth label is a
//! gross outlier. The L1 objective ignores the outliers far better than a
//! squared loss would. Logs the loss every 100 steps.

use blob_l1_loss::{
    AsciiTrace, Blob, Error, Filler, GaussianFiller, L1LossLayer, LayerParameter, LayerRegistry,
    Layer,
};

const NUM_SAMPLES: usize = 64;
const NUM_STEPS: usize = 1000;
const LEARNING_RATE: f32 = 0.05;

fn main() -> Result<(), Error> {
    let xs: Vec<f32> = (0..NUM_SAMPLES)
        .map(|i| -1.0 + 2.0 * i as f32 / NUM_SAMPLES as f32)
        .collect();

    let mut noise = Blob::<f32>::new(&[NUM_SAMPLES, 1]);
    GaussianFiller::new(0.0, 0.05).seeded(17).fill(&mut noise)?;
    let labels: Vec<f32> = xs
        .iter()
        .zip(noise.data().to_vec())
        .enumerate()
        .map(|(i, (x, n))| if i % 10 == 0 { 25.0 } else { 2.0 * x + 1.0 + n })
        .collect();
    let label = Blob::from_vec(labels, &[NUM_SAMPLES, 1])?;

    let param = LayerParameter::from_json_str(r#"{ "name": "loss", "type": "L1Loss" }"#)?;
    let registry = LayerRegistry::<f32>::with_defaults();
    let mut layer = registry.create(&param)?;

    // A second, directly built layer just to show the trace output once.
    let mut traced = L1LossLayer::<f32>::new(Default::default());
    traced.add_hook(Box::new(AsciiTrace::new().with_period(NUM_STEPS)));

    let (mut w, mut b) = (0.0f32, 0.0f32);
    let mut prediction = Blob::<f32>::new(&[NUM_SAMPLES, 1]);
    let mut label = label;
    let mut top = Blob::scalar();

    for step in 0..NUM_STEPS {
        for (slot, x) in prediction.data_mut().as_mut_slice()?.iter_mut().zip(&xs) {
            *slot = w * x + b;
        }

        layer.reshape(&[&prediction, &label], &mut [&mut top])?;
        let loss = layer.forward(&[&prediction, &label], &mut [&mut top])?;
        top.seed_loss_gradient(layer.loss_weight(0))?;
        layer.backward(&[&top], &[true, false], &mut [&mut prediction, &mut label])?;

        let grad = prediction.diff().to_vec();
        let grad_w: f32 = grad.iter().zip(&xs).map(|(g, x)| g * x).sum();
        let grad_b: f32 = grad.iter().sum();
        w -= LEARNING_RATE * grad_w;
        b -= LEARNING_RATE * grad_b;

        if step % 100 == 0 {
            println!("step {:4}: loss = {:.4}, w = {:.3}, b = {:.3}", step, loss, w, b);
        }
    }

    traced.reshape(&[&prediction, &label], &mut [&mut top])?;
    traced.forward(&[&prediction, &label], &mut [&mut top])?;

    println!("fitted y = {:.3} * x + {:.3} (true: 2x + 1)", w, b);
    Ok(())
}
