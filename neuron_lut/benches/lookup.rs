use std::time::Duration;

use criterion::*;
use neuron_lut::{InputTuple, Operation, TableParams, query, serialize};

criterion_group! {
    name = lookup;
    config = Criterion::default().warm_up_time(Duration::from_millis(1000));
    targets = lookup_vs_multiply
}

criterion_main!(lookup);

fn lookup_vs_multiply(c: &mut Criterion) {
    for (num_inputs, input_bit_depth) in [(2, 4), (3, 4), (2, 8)] {
        let params = TableParams::new(num_inputs, input_bit_depth, "multiply").unwrap();
        let table = serialize(&params.build().unwrap());
        let max = params.values_per_input().unwrap() - 1;
        let inputs = InputTuple::from(vec![max; params.num_inputs]);

        let mut group = c.benchmark_group("lookup");
        let label = format!("n = {num_inputs}, bits = {input_bit_depth}");

        group.bench_function(BenchmarkId::new("query", &label), |b| {
            b.iter(|| query(black_box(&table), black_box(&inputs)).unwrap())
        });
        group.bench_function(BenchmarkId::new("multiply", &label), |b| {
            b.iter(|| Operation::Multiply.apply(black_box(inputs.values())))
        });
        group.finish();
    }
}
