//! Gap buffer benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mochi_edit::core::GapBuffer;

fn document(lines: usize) -> Vec<u8> {
    (0..lines)
        .flat_map(|i| format!("Line {}: Some text content here\n", i).into_bytes())
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("gap_buffer");

    let text = document(100);
    group.throughput(Throughput::Bytes(text.len() as u64));

    // Typing into an empty buffer, growing one increment at a time
    group.bench_function("insert_bytes", |b| {
        b.iter(|| {
            let mut buf = GapBuffer::new();
            buf.insert_slice(&text).unwrap();
            black_box(buf)
        })
    });

    // Typing in the middle of an existing document
    group.bench_function("insert_middle", |b| {
        b.iter(|| {
            let mut buf = GapBuffer::from_bytes(&text, 4);
            buf.move_to_logical(text.len() / 2);
            buf.insert_slice(b"inserted text").unwrap();
            black_box(buf)
        })
    });

    group.finish();
}

fn bench_relocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("gap_buffer");

    let text = document(1000);

    // Sweep the gap across the whole document and back
    group.bench_function("relocate_sweep", |b| {
        let mut buf = GapBuffer::from_bytes(&text, 64);
        b.iter(|| {
            for offset in (0..=text.len()).step_by(97) {
                buf.move_to_logical(offset);
            }
            buf.move_to_logical(0);
            black_box(buf.cursor())
        })
    });

    // One-byte moves, the common case for arrow keys
    group.bench_function("relocate_step", |b| {
        let mut buf = GapBuffer::from_bytes(&text, 64);
        buf.move_to_logical(text.len() / 2);
        b.iter(|| {
            let at = buf.cursor();
            buf.move_to_logical(at + 1);
            buf.move_to_logical(at);
            black_box(buf.cursor())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_relocate);
criterion_main!(benches);
