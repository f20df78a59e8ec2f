use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use refract_engine::{render, DynamicRecord, FieldValue, RecordMut, Reflect};

#[derive(Debug, Clone, Reflect)]
struct Counter {
    id: i64,
    label: String,
    x: i64,
}

fn counter() -> Counter {
    Counter {
        id: 1,
        label: "bench".to_string(),
        x: 0,
    }
}

fn bench_increment(c: &mut Criterion) {
    let mut group = c.benchmark_group("increment");

    group.bench_function("direct", |b| {
        let mut record = counter();
        b.iter(|| {
            record.x += black_box(2);
        });
    });

    group.bench_function("reflective", |b| {
        let mut record = counter();
        b.iter(|| {
            let mut handle = RecordMut::new(&mut record);
            let x = handle.get(2).unwrap().as_integer().unwrap();
            handle.set(2, FieldValue::Integer(x + black_box(2))).unwrap();
        });
    });

    group.bench_function("reflective_named", |b| {
        let mut record = counter();
        b.iter(|| {
            let mut handle = RecordMut::new(&mut record);
            let x = handle.get_named("x").unwrap().as_integer().unwrap();
            handle.set_named("x", FieldValue::Integer(x + black_box(2))).unwrap();
        });
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let derived = counter();
    let dynamic = DynamicRecord::snapshot(&derived).unwrap();
    let records: [(&str, &dyn Reflect); 2] = [("derived", &derived), ("dynamic", &dynamic)];

    for (name, record) in records {
        group.bench_with_input(BenchmarkId::new("counter", name), &record, |b, record| {
            b.iter(|| render(black_box(*record)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_increment, bench_render);
criterion_main!(benches);
