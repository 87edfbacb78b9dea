use std::time::{Duration, Instant};

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tile_layout::{
    Animation, ContainerBox, Frame, LayoutConfig, LayoutOptions, LayoutRuntime, LayoutSnapshot,
    NoInsets, Positioner, Result, Size, Tile, TileSnapshot, compute_layout,
};

#[derive(Default)]
struct NullPositioner;

impl Positioner<usize> for NullPositioner {
    fn position(&mut self, _: &usize, _: Frame, _: Option<&Animation>) -> Result<()> {
        Ok(())
    }
}

fn tiles(count: usize, big: usize, config: &LayoutConfig) -> Vec<Tile<usize>> {
    (0..count)
        .map(|i| {
            let mut snapshot = TileSnapshot::new(i)
                .with_video(1280.0, if i % 3 == 0 { 960.0 } else { 720.0 })
                .with_volume(0.1 + (i % 7) as f64 * 0.15);
            if i < big {
                snapshot = snapshot.with_class(config.big_class.clone());
            }
            Tile::from_snapshot(snapshot, config)
        })
        .collect()
}

fn layout_small_grid(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let size = Size::new(1920.0, 1080.0);
    let mut group = c.benchmark_group("layout_small_grid");
    for count in [1usize, 4, 9, 16, 36] {
        let input = tiles(count, 0, &config);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| compute_layout(&config, black_box(size), black_box(input), &NoInsets));
        });
    }
    group.finish();
}

fn layout_big_and_vroom(c: &mut Criterion) {
    let config = LayoutOptions {
        vroom: Some(true),
        fixed_ratio: Some(true),
        ..LayoutOptions::default()
    }
    .resolve();
    let size = Size::new(1366.0, 768.0);
    let input = tiles(24, 2, &config);
    c.bench_function("layout_big_and_vroom", |b| {
        b.iter(|| compute_layout(&config, black_box(size), black_box(&input), &NoInsets));
    });
}

fn runtime_resize_burst(c: &mut Criterion) {
    let start = Instant::now();
    let script: Vec<_> = (0..20u64)
        .map(|step| {
            let snapshot = LayoutSnapshot::new(
                ContainerBox::new(1200.0 + step as f64 * 5.0, 700.0),
                (0..12usize).map(TileSnapshot::new).collect(),
            );
            (start + Duration::from_millis(step * 15), snapshot)
        })
        .collect();
    c.bench_function("runtime_resize_burst", |b| {
        b.iter(|| {
            let mut runtime = LayoutRuntime::new(LayoutConfig::default()).expect("runtime");
            runtime
                .run_scripted(black_box(script.clone()), &NoInsets, &mut NullPositioner)
                .expect("scripted run")
        });
    });
}

criterion_group!(
    benches,
    layout_small_grid,
    layout_big_and_vroom,
    runtime_resize_burst
);
criterion_main!(benches);
