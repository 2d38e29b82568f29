// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

use criterion::{criterion_group, criterion_main, Criterion};
use mdcrd_rs::prelude::*;

fn benchmark(c: &mut Criterion) {
    c.bench_function("MdcrdFile::open", |b| {
        b.iter(|| {
            std::hint::black_box(MdcrdFile::open("test_files/traj_box.mdcrd", 5).unwrap());
        })
    });

    c.bench_function("MdcrdFile::read_next_frame (all frames)", |b| {
        b.iter(|| {
            let mut mdcrd = MdcrdFile::open("test_files/traj_box.mdcrd", 5).unwrap();
            let mut system = System::from_n_atoms("Bench", 5);
            while mdcrd.read_next_frame().unwrap() {
                mdcrd.update_target(&mut system).unwrap();
            }
            std::hint::black_box(system);
        })
    });

    c.bench_function("MdcrdFile::read_frame (reversed)", |b| {
        b.iter(|| {
            let mut mdcrd = MdcrdFile::open("test_files/traj_box.mdcrd", 5).unwrap();
            let mut system = System::from_n_atoms("Bench", 5);
            for index in (0..mdcrd.get_n_frames()).rev() {
                mdcrd.read_frame(index).unwrap();
                mdcrd.update_target(&mut system).unwrap();
            }
            std::hint::black_box(system);
        })
    });

    c.bench_function("System::mdcrd_iter", |b| {
        let mut system = System::from_n_atoms("Bench", 5);
        b.iter(|| {
            for frame in system.mdcrd_iter("test_files/traj_box.mdcrd").unwrap() {
                std::hint::black_box(frame.unwrap());
            }
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
