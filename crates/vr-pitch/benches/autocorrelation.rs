//! Autocorrelation estimator benchmarks

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vr_core::AudioFrame;
use vr_pitch::AutocorrelationEstimator;

fn sine_frame(freq: f32, sample_rate: u32, size: usize) -> AudioFrame {
    let samples = (0..size)
        .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
        .collect();
    AudioFrame::new(samples, sample_rate).expect("valid frame")
}

fn bench_estimate_2048(c: &mut Criterion) {
    let estimator = AutocorrelationEstimator::default();
    let frame = sine_frame(220.0, 44100, 2048);

    c.bench_function("autocorrelation_estimate_2048", |b| {
        b.iter(|| black_box(estimator.estimate(black_box(&frame))))
    });
}

fn bench_silent_frame(c: &mut Criterion) {
    let estimator = AutocorrelationEstimator::default();
    let frame = AudioFrame::new(vec![0.0; 2048], 44100).expect("valid frame");

    c.bench_function("autocorrelation_silent_2048", |b| {
        b.iter(|| black_box(estimator.estimate(black_box(&frame))))
    });
}

criterion_group!(benches, bench_estimate_2048, bench_silent_frame);
criterion_main!(benches);
