use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use vitalrisk::{Classification, PatientRecord};

fn synthetic_page(size: usize) -> Vec<PatientRecord> {
    (0..size)
        .map(|i| {
            let value = match i % 4 {
                0 => json!({"id": format!("P{i}"), "blood_pressure": {"systolic": 110 + (i % 50), "diastolic": 70 + (i % 25)}, "temperature": 97.0 + (i % 50) as f64 / 10.0, "age": 20 + (i % 70)}),
                1 => json!({"id": format!("P{i}"), "blood_pressure": {"systolic": "145", "diastolic": "92"}, "temperature": "100.4F", "age": "71 years"}),
                2 => json!({"id": format!("P{i}"), "blood_pressure": "INVALID", "temperature": "TEMP_ERROR", "age": null}),
                _ => json!({"id": format!("P{i}"), "temperature": 98.6, "age": 45}),
            };
            serde_json::from_value(value).unwrap()
        })
        .collect()
}

fn bench_classification(c: &mut Criterion) {
    let page = synthetic_page(10_000);

    c.bench_function("classify 10k patients", |b| {
        b.iter(|| Classification::new().with_page(black_box(&page)))
    });
}

criterion_group!(benches, bench_classification);
criterion_main!(benches);
