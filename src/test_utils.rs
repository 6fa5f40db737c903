use crate::{Blob, Element, Error, Layer};

/// Checks a loss layer's backward pass against central finite differences.
///
/// # Arguments
/// * `layer`: The layer under test. It is reshaped and run in place.
/// * `bottom`: The layer inputs. Their data is perturbed and restored.
/// * `input_idx_to_check`: The index in `bottom` whose gradient is compared.
/// * `epsilon`: Finite difference step (e.g., 1e-3).
/// * `tolerance`: Allowed difference, scaled by `max(1, |analytical|, |numerical|)`.
///
/// Elements sitting on a kink of the objective (where the left and right
/// slopes disagree by more than the tolerance) are skipped, since no
/// single derivative exists there.
///
/// # Returns
/// * `Ok(n)` with the number of elements compared if all gradients match.
/// * `Err(Error::GradientCheckError)` describing the first mismatch otherwise.
pub fn check_layer_gradient<T, L>(
    layer: &mut L,
    bottom: &mut [Blob<T>],
    input_idx_to_check: usize,
    epsilon: f64,
    tolerance: f64,
) -> Result<usize, Error>
where
    T: Element,
    L: Layer<T> + ?Sized,
{
    if input_idx_to_check >= bottom.len() {
        return Err(Error::InvalidOperation(format!(
            "input_idx_to_check ({}) is out of bounds for bottom (len {})",
            input_idx_to_check,
            bottom.len()
        )));
    }
    let step = T::from_f64(epsilon).ok_or(Error::InitializationError)?;

    // --- Analytical gradient ---
    let mut top = Blob::scalar();
    let base_loss = run_forward(layer, bottom, &mut top)?;
    top.seed_loss_gradient(layer.loss_weight(0))?;
    {
        let propagate_down = vec![true; bottom.len()];
        let mut refs: Vec<&mut Blob<T>> = bottom.iter_mut().collect();
        layer.backward(&[&top], &propagate_down, &mut refs)?;
    }
    let analytical: Vec<f64> = bottom[input_idx_to_check]
        .diff()
        .to_vec()
        .into_iter()
        .map(Element::to_f64_lossy)
        .collect();

    // --- Numerical gradient ---
    let size = bottom[input_idx_to_check].count();
    let mut numerical = vec![0.0; size];
    let mut compared = 0;
    for i in 0..size {
        let original = bottom[input_idx_to_check].data().as_slice()?[i];

        bottom[input_idx_to_check].data_mut().as_mut_slice()?[i] = original + step;
        let loss_plus = run_forward(layer, bottom, &mut top)?;
        bottom[input_idx_to_check].data_mut().as_mut_slice()?[i] = original - step;
        let loss_minus = run_forward(layer, bottom, &mut top)?;
        bottom[input_idx_to_check].data_mut().as_mut_slice()?[i] = original;

        let right = (loss_plus - base_loss) / epsilon;
        let left = (base_loss - loss_minus) / epsilon;
        numerical[i] = (loss_plus - loss_minus) / (2.0 * epsilon);
        if (right - left).abs() > tolerance {
            continue;
        }

        let scale = 1.0f64.max(analytical[i].abs()).max(numerical[i].abs());
        let abs_error = (analytical[i] - numerical[i]).abs();
        if abs_error > tolerance * scale {
            return Err(Error::GradientCheckError {
                analytical,
                numerical,
                max_abs_error: abs_error,
                at_index: i,
            });
        }
        compared += 1;
    }
    Ok(compared)
}

fn run_forward<T, L>(layer: &mut L, bottom: &[Blob<T>], top: &mut Blob<T>) -> Result<f64, Error>
where
    T: Element,
    L: Layer<T> + ?Sized,
{
    let refs: Vec<&Blob<T>> = bottom.iter().collect();
    layer.reshape(&refs, &mut [&mut *top])?;
    let loss = layer.forward(&refs, &mut [&mut *top])?;
    Ok(loss.to_f64_lossy())
}
