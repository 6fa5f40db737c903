use blob_l1_loss::{Blob, Filler, L1LossLayer, L1LossParameter, Layer, UniformFiller};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// Helper function to create a random blob
fn create_random_blob(shape: &[usize], seed: u64) -> Blob<f32> {
    let mut blob = Blob::new(shape);
    UniformFiller::new(-1.0, 1.0)
        .seeded(seed)
        .fill(&mut blob)
        .unwrap();
    blob
}

fn bench_l1_loss(c: &mut Criterion) {
    let shapes = [
        ([32, 3, 16, 16], "32x3x16x16"),
        ([64, 1, 36, 120], "64x1x36x120"),
        ([128, 3, 64, 64], "128x3x64x64"),
    ];

    let mut group = c.benchmark_group("l1_loss");

    for (shape, size) in shapes.iter() {
        let a = create_random_blob(shape, 1);
        let mut b = create_random_blob(shape, 2);
        let mut a_grad = a.clone();
        let mut top = Blob::scalar();
        let mut layer = L1LossLayer::<f32>::new(L1LossParameter::default());
        layer.reshape(&[&a, &b], &mut [&mut top]).unwrap();

        group.bench_function(format!("forward_{}", size), |bencher| {
            bencher.iter(|| {
                black_box(layer.forward(black_box(&[&a, &b]), &mut [&mut top])).unwrap();
            });
        });

        layer.forward(&[&a, &b], &mut [&mut top]).unwrap();
        top.seed_loss_gradient(1.0).unwrap();
        group.bench_function(format!("backward_{}", size), |bencher| {
            bencher.iter(|| {
                layer
                    .backward(&[&top], &[true, true], &mut [&mut a_grad, &mut b])
                    .unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_l1_loss);
criterion_main!(benches);
