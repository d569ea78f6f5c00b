//! Benchmarks for memd.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use memd::{here, RawHeap, Tracker, TrackerConfig};

fn bench_tracked_vs_raw(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc_free_64B");

    group.bench_function("raw_heap", |b| {
        b.iter(|| {
            let ptr = RawHeap::malloc(black_box(64));
            unsafe { RawHeap::free(ptr) };
        })
    });

    group.bench_function("tracked", |b| {
        let tracker = Tracker::new(TrackerConfig::default());
        b.iter(|| {
            let ptr = tracker.allocate(black_box(64), here!());
            unsafe { tracker.release(ptr, here!()) };
        })
    });

    group.bench_function("tracked_paused", |b| {
        let tracker = Tracker::new(TrackerConfig::default());
        let _paused = tracker.pause_scope();
        b.iter(|| {
            let ptr = tracker.allocate(black_box(64), here!());
            // Paused releases are ignored; hand the block back directly.
            unsafe { RawHeap::free(ptr) };
        })
    });

    group.finish();
}

fn bench_registry_occupancy(c: &mut Criterion) {
    let mut group = c.benchmark_group("release_with_live_records");

    // Release cost grows with the number of live records ahead of the slot.
    for live in [0usize, 100, 900] {
        group.bench_with_input(BenchmarkId::from_parameter(live), &live, |b, &live| {
            let tracker = Tracker::new(TrackerConfig::default());
            let held: Vec<_> = (0..live).map(|_| tracker.allocate(8, here!())).collect();

            b.iter(|| {
                let ptr = tracker.allocate(black_box(32), here!());
                unsafe { tracker.release(ptr, here!()) };
            });

            for ptr in held {
                unsafe { tracker.release(ptr, here!()) };
            }
        });
    }

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");

    for leaks in [0usize, 100, 1000] {
        group.throughput(Throughput::Elements(leaks as u64));
        group.bench_with_input(BenchmarkId::from_parameter(leaks), &leaks, |b, &leaks| {
            let tracker = Tracker::new(TrackerConfig::default());
            let held: Vec<_> = (0..leaks).map(|_| tracker.allocate(16, here!())).collect();

            b.iter(|| black_box(tracker.report()));

            for ptr in held {
                unsafe { tracker.release(ptr, here!()) };
            }
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tracked_vs_raw, bench_registry_occupancy, bench_report);
criterion_main!(benches);
