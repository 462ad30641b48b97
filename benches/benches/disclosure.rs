// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect};
use ui_events::keyboard::{Key, NamedKey};
use understory_disclosure::{DisclosureConfig, DisclosureController, TransitionLog};
use understory_disclosure_listeners::Disclosures;

/// Mounts `n` open dropdowns laid out in a row, each 100 units wide.
fn build_registry(n: u32) -> Disclosures<Rect, (), ()> {
    let mut reg = Disclosures::new(());
    for i in 0..n {
        let id = reg.mount(DisclosureConfig::new().with_default_open(true), ());
        let x0 = f64::from(i) * 100.0;
        reg.set_boundary(id, Some(Rect::new(x0, 0.0, x0 + 90.0, 200.0)));
    }
    reg
}

fn bench_controller(c: &mut Criterion) {
    let mut group = c.benchmark_group("disclosure/controller");

    group.bench_function("header_click_toggle", |b| {
        let mut ctl = DisclosureController::<()>::new(DisclosureConfig::new());
        b.iter(|| {
            black_box(ctl.header_click(()));
        });
    });

    group.bench_function("header_click_controlled", |b| {
        let mut ctl = DisclosureController::<()>::new(DisclosureConfig::controlled(true));
        b.iter(|| {
            black_box(ctl.header_click(()));
        });
    });

    group.bench_function("key_up_non_escape", |b| {
        let config = DisclosureConfig::new().with_default_open(true);
        let mut ctl = DisclosureController::<()>::new(config);
        let enter = Key::Named(NamedKey::Enter);
        b.iter(|| {
            black_box(ctl.key_up(&enter, ()));
        });
    });

    group.bench_function("header_click_traced", |b| {
        b.iter_batched(
            || (DisclosureController::<()>::new(DisclosureConfig::new()), TransitionLog::new()),
            |(mut ctl, mut log)| {
                for _ in 0..64 {
                    ctl.traced(&mut log).header_click(());
                }
                black_box(log);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("disclosure/fan_out");

    for n in [1_u32, 16, 256, 4_096] {
        group.throughput(Throughput::Elements(u64::from(n)));

        // Only the first dropdown contains the point; all others close.
        group.bench_with_input(BenchmarkId::new("dispatch_click", n), &n, |b, &n| {
            b.iter_batched(
                || build_registry(n),
                |mut reg| {
                    let out = reg.dispatch_click(&Point::new(10.0, 10.0));
                    black_box(out);
                    black_box(reg);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("dispatch_key_up_escape", n), &n, |b, &n| {
            b.iter_batched(
                || build_registry(n),
                |mut reg| {
                    let out = reg.dispatch_key_up(&Key::Named(NamedKey::Escape));
                    black_box(out);
                    black_box(reg);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("mount_unmount_all", n), &n, |b, &n| {
            b.iter(|| {
                let mut reg = Disclosures::<Rect, (), ()>::new(());
                let ids: Vec<_> = (0..n)
                    .map(|_| reg.mount(DisclosureConfig::new(), ()))
                    .collect();
                for id in ids {
                    black_box(reg.unmount(id));
                }
                black_box(reg.is_attached());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_controller, bench_fan_out);
criterion_main!(benches);
