//! ASCII rendering of loss-layer inputs for eyeballing training progress.

use crate::blob::Blob;
use crate::element::Element;
use crate::hooks::ForwardHook;

/// Maps a value to a one-character intensity label.
///
/// Values at or above 0.95 render as `'X'`, then `'9'` down to `'1'` in bands
/// of 0.1 centred on the digit's tenth, and everything below 0.05 as `'-'`.
pub fn debug_symbol<T: Element>(value: T) -> char {
    const BANDS: [(f64, char); 10] = [
        (0.95, 'X'),
        (0.85, '9'),
        (0.75, '8'),
        (0.65, '7'),
        (0.55, '6'),
        (0.45, '5'),
        (0.35, '4'),
        (0.25, '3'),
        (0.15, '2'),
        (0.05, '1'),
    ];
    let value = value.to_f64_lossy();
    BANDS
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, symbol)| *symbol)
        .unwrap_or('-')
}

/// Height and width used to lay out one sample as a 2-D image.
///
/// A few flattened feature sizes map to known image sizes; otherwise the
/// blob's own height/width axes are used, and a 1x1 spatial size is treated
/// as a square image.
pub fn trace_geometry<T: Element>(blob: &Blob<T>) -> (usize, usize) {
    let count = blob.count_from(1);
    match count {
        4320 => (36, 120),
        1080 => (18, 60),
        _ => {
            let (h, w) = (blob.dim(2), blob.dim(3));
            if h == 1 && w == 1 {
                let side = (count as f64).sqrt() as usize;
                (side, side)
            } else {
                (h, w)
            }
        }
    }
}

/// Downsamples the first channel of the first sample by averaging 2x2 cells.
///
/// Neighbours outside the image or the sample are left out of the average.
pub fn render_sample<T: Element>(values: &[T], height: usize, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for y in (0..height).step_by(2) {
        let mut row = String::new();
        for x in (0..width).step_by(2) {
            let mut sum = 0.0;
            let mut n = 0usize;
            for (dy, dx) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                let (yy, xx) = (y + dy, x + dx);
                if yy >= height || xx >= width {
                    continue;
                }
                if let Some(v) = values.get(yy * width + xx) {
                    sum += v.to_f64_lossy();
                    n += 1;
                }
            }
            if n > 0 {
                row.push(debug_symbol(sum / n as f64));
            }
        }
        rows.push(row);
    }
    rows
}

/// Forward hook that logs an ASCII picture of both loss inputs.
///
/// The call counter belongs to the hook, so two layers with their own traces
/// sample independently. Lines go to the sink given at construction.
pub struct AsciiTrace {
    period: usize,
    calls: usize,
    sink: Box<dyn FnMut(&str) + Send>,
}

impl AsciiTrace {
    pub const DEFAULT_PERIOD: usize = 5;

    /// Trace printing to stdout.
    pub fn new() -> Self {
        Self::with_sink(|line: &str| println!("{}", line))
    }

    pub fn with_sink<F>(sink: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        Self {
            period: Self::DEFAULT_PERIOD,
            calls: 0,
            sink: Box::new(sink),
        }
    }

    /// Render on every `period`-th call instead of every 5th. Zero is treated as 1.
    pub fn with_period(mut self, period: usize) -> Self {
        self.period = period.max(1);
        self
    }

    /// Number of forward passes observed so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Builds the trace lines for one forward pass.
    pub fn render<T: Element>(bottom: &[&Blob<T>], loss: T) -> Vec<String> {
        let mut lines = Vec::new();
        let (prediction, label) = match bottom {
            [prediction, label, ..] => (*prediction, *label),
            _ => return lines,
        };

        let count = prediction.count_from(1);
        let num = prediction.num();
        let (height, width) = trace_geometry(prediction);
        let channels = prediction.dim(1);
        let predicted = prediction.data().to_vec();
        let labels = label.data().to_vec();

        let grid = (channels * height * width).min(count).min(predicted.len());
        if predicted[..grid].iter().all(|v| *v == T::zero()) {
            lines.push("!!! L1_LOSS: ALL ZEROS !!!".to_string());
        }
        lines.push(format!("loss = {} count={} num={}", loss, count, num));
        lines.push(format!(
            "h = {} w={} channels = {}",
            prediction.dim(2),
            prediction.dim(3),
            channels
        ));
        lines.push("L1 net-output, label".to_string());

        for values in [&predicted, &labels] {
            let sample = &values[..count.min(values.len())];
            for row in render_sample(sample, height, width) {
                lines.push(format!("  {}", row));
            }
            lines.push(" ".to_string());
        }
        lines
    }
}

impl Default for AsciiTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> ForwardHook<T> for AsciiTrace {
    fn on_forward(&mut self, bottom: &[&Blob<T>], loss: T) {
        if self.calls % self.period == 0 {
            for line in Self::render(bottom, loss) {
                (self.sink)(&line);
            }
        }
        self.calls += 1;
    }
}
