use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

use data_stream::sources::{BufferedSource, BytesSource, RepeatSource};
use data_stream::ByteSource;

const INPUT_SIZE: usize = 64 * 1024;

fn generate_random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

fn read_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_into");
    group.measurement_time(std::time::Duration::from_secs(10));

    let data = generate_random_data(INPUT_SIZE);
    let mut buffer = vec![0u8; INPUT_SIZE];

    group.bench_function("byte_at_a_time", |b| {
        b.iter(|| {
            let mut source = RepeatSource::new(7);
            let read = source
                .read_into(Some(&mut buffer[..]), 0, INPUT_SIZE as i64)
                .unwrap();
            black_box(read);
        });
    });

    group.bench_function("bulk_copy", |b| {
        b.iter(|| {
            let mut source = BytesSource::new(data.clone());
            let read = source
                .read_fully(Some(&mut buffer[..]), 0, INPUT_SIZE as i64)
                .unwrap();
            black_box(read);
        });
    });

    group.bench_function("buffered_bytes", |b| {
        b.iter(|| {
            let mut source =
                BufferedSource::new(BytesSource::new(data.clone()));
            let mut total = 0;
            while let Some(_) = source.read_byte().unwrap() {
                total += 1;
            }
            black_box(total);
        });
    });

    group.finish();
}

criterion_group!(benches, read_benchmark);
criterion_main!(benches);
