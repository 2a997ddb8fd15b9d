//! Construction benchmarks over synthetic texts.
//!
//! Run with: `cargo bench`
//! Save baseline: `cargo bench -- --save-baseline main`
//! Compare: `cargo bench -- --baseline main`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use txi::{CompressMode, EngineConfig, IndexManager, KindSet, StructureKind};

/// Pseudo-random text over a small alphabet, sentinel-terminated.
///
/// A small alphabet keeps the suffix comparisons long, like natural text.
fn synthetic_text(len: usize) -> Vec<u8> {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    let mut text = Vec::with_capacity(len);
    for _ in 0..len - 1 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        text.push(b'a' + (state % 4) as u8);
    }
    text.push(0);
    text
}

fn build(text: &[u8], requested: KindSet, mode: CompressMode) {
    let mut manager = IndexManager::new(text, &EngineConfig::default()).unwrap();
    manager.require_set(requested, mode).unwrap();
}

fn bench_suffix_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("suffix_array");
    for size in [1 << 12, 1 << 16] {
        let text = synthetic_text(size);
        let requested = KindSet::of(&[StructureKind::SuffixArray]);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| build(text, requested, CompressMode::Plain));
        });
    }
    group.finish();
}

fn bench_lcp_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcp_chain");
    for size in [1 << 12, 1 << 16] {
        let text = synthetic_text(size);
        let requested = KindSet::of(&[StructureKind::LcpArray]);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| build(text, requested, CompressMode::Delayed));
        });
    }
    group.finish();
}

fn bench_compress_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_modes");
    let text = synthetic_text(1 << 16);
    let requested = KindSet::of(&[StructureKind::SuffixArray, StructureKind::InverseSuffixArray]);
    for (name, mode) in [
        ("plain", CompressMode::Plain),
        ("delayed", CompressMode::Delayed),
        ("compressed", CompressMode::Compressed),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| build(text, requested, mode));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_suffix_array,
    bench_lcp_chain,
    bench_compress_modes
);
criterion_main!(benches);
