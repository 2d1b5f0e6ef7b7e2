// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::*;

use dynspec::{
    averaging::downsample,
    constants::{DEFAULT_TIME_CHUNKS, NUM_CHANNELS, NUM_POLS, NUM_REIMS},
    ndarray::{Array2, Array4},
    stokes,
};

fn stokes_benchmarks(c: &mut Criterion) {
    c.bench_function("stokes_i on a default time chunk", |b| {
        // The values are irrelevant.
        let voltages = Array4::from_elem(
            (DEFAULT_TIME_CHUNKS, NUM_CHANNELS, NUM_POLS, NUM_REIMS),
            1_i8,
        );
        b.iter(|| {
            stokes::stokes_i(voltages.view());
        })
    });

    c.bench_function("downsample a default time chunk by 16x4", |b| {
        // The values are irrelevant.
        let stokes = Array2::from_elem((DEFAULT_TIME_CHUNKS, NUM_CHANNELS), 50_i32);
        b.iter(|| {
            downsample(stokes.view(), 16, 4).unwrap();
        })
    });
}

criterion_group!(benches, stokes_benchmarks);
criterion_main!(benches);
