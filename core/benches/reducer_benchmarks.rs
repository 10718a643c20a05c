//! Reducer and selector benchmarks
//!
//! Measures the cost of one dispatch through a resource reducer:
//! - Unrelated actions: should be a string classification and an `Arc` clone
//! - Lifecycle actions: one clone of the slice plus the built-in mutation
//! - Selectors: map lookups only
//!
//! Run with: `cargo bench`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::expect_used)] // Benchmarks can use expect for setup

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use resource_reducers_core::prelude::*;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// A slice holding `count` entities.
fn seeded_slice(count: usize) -> Value {
    let entities: Map<String, Value> = (0..count)
        .map(|i| (i.to_string(), json!({ "id": i.to_string(), "name": format!("entity-{i}") })))
        .collect();
    json!({ "byId": entities })
}

fn benchmark_reducer_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer");
    group.throughput(Throughput::Elements(1));

    let reducer = make_reducer(ResourceConfig::new("foo", "byId", seeded_slice(100)));
    let state = Arc::clone(reducer.initial_state());

    let unrelated = Action::new("FETCH_bar_START");
    group.bench_function("unrelated_action", |b| {
        b.iter(|| reducer.reduce(Some(&state), black_box(&unrelated)));
    });

    let start = Action::lifecycle(&Verb::Fetch, "foo", Lifecycle::Start).with_reference_id("42");
    group.bench_function("fetch_start", |b| {
        b.iter(|| reducer.reduce(Some(&state), black_box(&start)));
    });

    let page: Vec<Value> = (100..150).map(|i| json!({ "id": i.to_string() })).collect();
    let success = Action::lifecycle(&Verb::Fetch, "foo", Lifecycle::Success).with_payload(Value::Array(page));
    group.bench_function("fetch_success_50_entities", |b| {
        b.iter(|| reducer.reduce(Some(&state), black_box(&success)));
    });

    group.finish();
}

fn benchmark_selectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("selectors");
    group.throughput(Throughput::Elements(1));

    let selectors = make_selectors(SelectorConfig::new("byId", "foo"));
    let state = json!({ "foo": seeded_slice(1_000) });

    group.bench_function("by_id", |b| {
        b.iter(|| selectors.by_id(&state, black_box("500")).is_some());
    });

    group.bench_function("lookup_by_name", |b| {
        let props = SelectorProps::with_id("500");
        b.iter(|| {
            selectors
                .get(black_box("getFooById"))
                .and_then(|select| select.select(&state, &props))
                .is_some()
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_reducer_dispatch, benchmark_selectors);
criterion_main!(benches);
