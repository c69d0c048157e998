use criterion::{black_box, criterion_group, criterion_main, Criterion};
use momentum_nn::{Hyperparams, Network, Trainer};

fn xor_samples() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
    (inputs, targets)
}

fn train(topology: &[usize], iterations: usize) {
    let mut net = Network::new(topology, Hyperparams::default()).unwrap();
    let (inputs, targets) = xor_samples();

    let trainer = Trainer::new(iterations);
    assert_eq!(Ok(()), trainer.train(&mut net, &inputs, &targets));
}

fn forward(net: &mut Network, inputs: &[Vec<f64>]) {
    for input in inputs {
        assert!(net.forward(input).is_ok());
    }
}

fn bench_forward(c: &mut Criterion) {
    let mut small = Network::new(&[2, 10, 10, 2], Hyperparams::default()).unwrap();
    let mut medium = Network::new(&[2, 20, 20, 20, 2], Hyperparams::default()).unwrap();

    let input_small = vec![vec![0.5, -0.5]; 10];
    let input_medium = vec![vec![0.5, -0.5]; 1_000];

    c.bench_function("forward small 10 inputs", |b| {
        b.iter(|| forward(black_box(&mut small), black_box(&input_small)))
    });
    c.bench_function("forward small 1,000 inputs", |b| {
        b.iter(|| forward(black_box(&mut small), black_box(&input_medium)))
    });

    c.bench_function("forward medium 10 inputs", |b| {
        b.iter(|| forward(black_box(&mut medium), black_box(&input_small)))
    });
    c.bench_function("forward medium 1,000 inputs", |b| {
        b.iter(|| forward(black_box(&mut medium), black_box(&input_medium)))
    });
}

fn bench_tiny(c: &mut Criterion) {
    c.bench_function("tiny 10 iterations", |b| {
        b.iter(|| train(&[2, 2, 1], black_box(10)))
    });
    c.bench_function("tiny 10,000 iterations", |b| {
        b.iter(|| train(&[2, 2, 1], black_box(10_000)))
    });
}

fn bench_small(c: &mut Criterion) {
    c.bench_function("small 10 iterations", |b| {
        b.iter(|| train(&[2, 10, 10, 1], black_box(10)))
    });
    c.bench_function("small 10,000 iterations", |b| {
        b.iter(|| train(&[2, 10, 10, 1], black_box(10_000)))
    });
}

fn bench_medium(c: &mut Criterion) {
    c.bench_function("medium 10 iterations", |b| {
        b.iter(|| train(&[2, 20, 20, 20, 1], black_box(10)))
    });
    c.bench_function("medium 10,000 iterations", |b| {
        b.iter(|| train(&[2, 20, 20, 20, 1], black_box(10_000)))
    });
}

criterion_group!(
    benches,
    bench_forward,
    bench_tiny,
    bench_small,
    bench_medium
);
criterion_main!(benches);
