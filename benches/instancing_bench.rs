//! Instance generation and camera benchmarks.

use criterion::{criterion_group, criterion_main, Criterion, black_box};
use triview::animation::{AnimationPhase, InstanceTransformGenerator};
use triview::camera::CameraController;
use triview::input::PointerEvent;

fn instance_generation_benchmark(c: &mut Criterion) {
    let mut generator = InstanceTransformGenerator::new();
    c.bench_function("mobile_next_frame", |b| {
        b.iter(|| black_box(generator.next_frame()))
    });

    let phase = AnimationPhase {
        main: 1.0,
        tier1: 2.0,
        tier2: 3.0,
    };
    c.bench_function("mobile_records_at", |b| {
        b.iter(|| black_box(InstanceTransformGenerator::records_at(black_box(&phase))))
    });
}

fn camera_benchmark(c: &mut Criterion) {
    let cameras = CameraController::new();
    c.bench_function("three_view_matrices", |b| {
        b.iter(|| black_box(cameras.view_matrices()))
    });

    let mut group = c.benchmark_group("pointer_drag");
    for steps in [10, 100, 1000].iter() {
        group.bench_function(format!("{}_moves", steps), |b| {
            b.iter(|| {
                let mut cameras = CameraController::new();
                let _ = cameras.handle_event(&PointerEvent::button_down(450.0, 300.0), 900);
                for i in 0..*steps {
                    let _ = cameras.handle_event(
                        &PointerEvent::moved(450.0 + i as f32, 300.0),
                        900,
                    );
                }
                black_box(cameras.eye_position())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, instance_generation_benchmark, camera_benchmark);
criterion_main!(benches);
