// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for subtype classification in the pitchwire-network
// crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use pitchwire_core::types::ConnectivityState;
use pitchwire_network::{Classifier, classify};

fn bench_known_codes(c: &mut Criterion) {
    let states: Vec<ConnectivityState> = (1..=20).map(ConnectivityState::connected).collect();
    c.bench_function("classify_known_codes", |b| {
        b.iter(|| {
            for state in &states {
                black_box(classify(black_box(state)));
            }
        })
    });
}

fn bench_fallback(c: &mut Criterion) {
    let classifier = Classifier::with_nr_code(20);
    let unknown = ConnectivityState::connected(4_096);
    let offline = ConnectivityState::disconnected();
    c.bench_function("classify_fallback", |b| {
        b.iter(|| {
            black_box(classifier.classify(black_box(&unknown)));
            black_box(classifier.classify(black_box(&offline)));
        })
    });
}

criterion_group!(benches, bench_known_codes, bench_fallback);
criterion_main!(benches);
