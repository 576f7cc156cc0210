//! Benchmarks for codeowners-ruleset
//!
//! Run with: cargo bench -p codeowners-ruleset --features generate
//!
//! Filter benchmarks:
//!   cargo bench -- "parsing"
//!   cargo bench -- "matching/linear"
//!   cargo bench -- "matching/trie"

use codeowners_ruleset::matching::compile;
use codeowners_ruleset::parse::parse_codeowners;
use codeowners_ruleset::{Ruleset, RulesetSource};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use fixtures::{fixtures, fixtures_extended, paths};

fn ruleset(content: &str) -> Ruleset {
    let file = parse_codeowners(content).expect("fixture should parse");
    Ruleset::new(RulesetSource::Ingested { id: 0 }, file)
}

/// Benchmark parsing across all fixture sizes
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for (name, content) in fixtures() {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("parse_codeowners", name),
            content,
            |b, input| b.iter(|| parse_codeowners(std::hint::black_box(input))),
        );
    }
    group.finish();
}

/// Benchmark parsing with extended sizes (up to 3MB)
fn bench_parsing_extended(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing/extended");
    group.sample_size(10); // Fewer samples for large files

    for (name, content) in fixtures_extended() {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("parse_codeowners", name),
            content,
            |b, input| b.iter(|| parse_codeowners(std::hint::black_box(input))),
        );
    }
    group.finish();
}

/// Benchmark compiling single patterns
fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    for pattern in ["*.rs", "/src/**/test_*.rs", "/docs/api/v1/index.md"] {
        group.bench_with_input(BenchmarkId::from_parameter(pattern), pattern, |b, p| {
            b.iter(|| compile(std::hint::black_box(p)))
        });
    }
    group.finish();
}

/// Benchmark last-match-wins lookups by reverse scan
fn bench_linear_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching/linear");
    let paths = paths();
    group.throughput(Throughput::Elements(paths.len() as u64));

    for (name, content) in fixtures() {
        let rs = ruleset(content);
        // Compile every pattern before measuring
        paths.iter().for_each(|p| {
            rs.match_path(p);
        });
        group.bench_with_input(BenchmarkId::new("match_path", name), &rs, |b, rs| {
            b.iter(|| {
                for path in paths {
                    std::hint::black_box(rs.match_path(path));
                }
            })
        });
    }
    group.finish();
}

/// Benchmark lookups through the pattern trie, one path at a time and in bulk
fn bench_trie_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching/trie");
    let paths = paths();
    group.throughput(Throughput::Elements(paths.len() as u64));

    for (name, content) in fixtures() {
        let rs = ruleset(content);
        // Build the trie before measuring
        rs.match_path_with_trie("/");
        group.bench_with_input(
            BenchmarkId::new("match_path_with_trie", name),
            &rs,
            |b, rs| {
                b.iter(|| {
                    for path in paths {
                        std::hint::black_box(rs.match_path_with_trie(path));
                    }
                })
            },
        );
        group.bench_with_input(BenchmarkId::new("match_paths", name), &rs, |b, rs| {
            b.iter(|| std::hint::black_box(rs.match_paths(paths)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_parsing_extended,
    bench_compile,
    bench_linear_matching,
    bench_trie_matching
);
criterion_main!(benches);
