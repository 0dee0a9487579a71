//! Wire codec benchmarks
//!
//! Benchmarks for command encoding and reply decoding, covering the frame
//! shapes the store client round-trips most often.
//!
//! Run with: `cargo bench --bench codec_bench -p kvscribe-infra`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kvscribe_infra::resp::codec::decode;
use kvscribe_infra::resp::Command;

fn bulk_reply(len: usize) -> Vec<u8> {
    let mut buf = format!("${len}\r\n").into_bytes();
    buf.extend_from_slice(&vec![b'x'; len]);
    buf.extend_from_slice(b"\r\n");
    buf
}

fn history_reply(entries: usize, entry_len: usize) -> Vec<u8> {
    let mut buf = format!("*{entries}\r\n").into_bytes();
    let payload = vec![b'x'; entry_len];
    for _ in 0..entries {
        buf.extend_from_slice(format!("${entry_len}\r\n").as_bytes());
        buf.extend_from_slice(&payload);
        buf.extend_from_slice(b"\r\n");
    }
    buf
}

// ============================================================================
// Command Encoding Benchmarks
// ============================================================================

fn bench_encode_command(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_command");

    group.throughput(Throughput::Elements(1));
    group.bench_function("get", |b| {
        b.iter(|| {
            black_box(Command::new("GET").arg(black_box("cached:https://example.com")).encode())
        });
    });

    for size in [16, 256, 4096] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("set", size), &size, |b, &size| {
            let value = vec![0u8; size];
            b.iter(|| {
                black_box(Command::new("SET").arg("key").arg(black_box(value.as_slice())).encode())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Reply Decoding Benchmarks
// ============================================================================

fn bench_decode_scalar_replies(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_scalar_replies");

    group.throughput(Throughput::Elements(1));
    group.bench_function("simple_ok", |b| {
        b.iter(|| black_box(decode(black_box(b"+OK\r\n"))));
    });

    group.bench_function("integer", |b| {
        b.iter(|| black_box(decode(black_box(b":1234567\r\n"))));
    });

    group.bench_function("nil_bulk", |b| {
        b.iter(|| black_box(decode(black_box(b"$-1\r\n"))));
    });

    group.finish();
}

fn bench_decode_bulk_replies(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_bulk_replies");

    for size in [16, 256, 4096] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("bulk", size), &size, |b, &size| {
            let reply = bulk_reply(size);
            b.iter(|| black_box(decode(black_box(&reply))));
        });
    }

    group.finish();
}

fn bench_decode_history_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_history_array");

    for entries in [8, 64, 512] {
        group.throughput(Throughput::Elements(entries as u64));
        group.bench_with_input(BenchmarkId::new("entries", entries), &entries, |b, &entries| {
            // Entry size in the ballpark of a recorded call input
            let reply = history_reply(entries, 40);
            b.iter(|| black_box(decode(black_box(&reply))));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark Groups
// ============================================================================

criterion_group!(encoding, bench_encode_command,);

criterion_group!(
    decoding,
    bench_decode_scalar_replies,
    bench_decode_bulk_replies,
    bench_decode_history_array,
);

criterion_main!(encoding, decoding);
