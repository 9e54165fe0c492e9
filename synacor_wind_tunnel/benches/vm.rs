// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use synacor_solvers::teleporter::{self, MemoTable};
use synacor_solvers::vault;
use synacor_vm::asm::{Asm, lit, reg};
use synacor_vm::console::MemoryConsole;
use synacor_vm::image::Image;
use synacor_vm::vm::Vm;

fn bench_all(c: &mut Criterion) {
    bench_countdown_loop(c);
    bench_teleporter_confirm(c);
    bench_vault_search(c);
}

/// A tight `set/add/jt` countdown: 3 instructions per iteration.
fn countdown_cells(iterations: u16) -> Vec<u16> {
    let mut a = Asm::new();
    a.set(0, lit(iterations));
    let top = a.here();
    a.add(0, reg(0), lit(32767));
    a.jt(reg(0), lit(top));
    a.halt();
    a.into_cells()
}

fn bench_countdown_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("countdown_loop");
    for &iterations in &[100_u16, 1000, 10_000] {
        let cells = countdown_cells(iterations);
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &cells,
            |b, cells| {
                b.iter(|| {
                    let image = Image::from_cells(cells.clone()).unwrap();
                    let mut vm = Vm::new(image, MemoryConsole::new());
                    vm.run().unwrap();
                    black_box(vm.registers()[0]);
                });
            },
        );
    }
    group.finish();
}

fn bench_teleporter_confirm(c: &mut Criterion) {
    let mut memo = MemoTable::new();
    c.bench_function("teleporter_confirm_reference_seed", |b| {
        b.iter(|| {
            memo.clear();
            black_box(teleporter::confirm(black_box(25734), &mut memo));
        });
    });
}

fn bench_vault_search(c: &mut Criterion) {
    c.bench_function("vault_search", |b| {
        b.iter(|| black_box(vault::solve()));
    });
}

criterion_group!(benches, bench_all);
criterion_main!(benches);
