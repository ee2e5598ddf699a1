//! Short code generation and title parsing benchmarks

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shortly::services::title::parse_title;
use shortly::utils::url_validator::validate_url;
use shortly::utils::{generate_random_code, generate_short_code, is_valid_short_code};
use std::hint::black_box;

fn bench_code_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_code");

    for length in [4usize, 6, 12, 32] {
        group.bench_with_input(BenchmarkId::new("random", length), &length, |b, &len| {
            b.iter(|| generate_random_code(black_box(len)));
        });
    }

    group.bench_function("short_code_default", |b| {
        b.iter(|| generate_short_code(black_box(6)));
    });

    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validation");

    group.bench_function("short_code_valid", |b| {
        b.iter(|| assert!(is_valid_short_code(black_box("abc123"))));
    });

    group.bench_function("short_code_invalid", |b| {
        b.iter(|| assert!(!is_valid_short_code(black_box("'; DROP TABLE--"))));
    });

    group.bench_function("url_valid", |b| {
        b.iter(|| validate_url(black_box("https://github.com/rust-lang/rust")).is_ok());
    });

    group.finish();
}

fn bench_parse_title(c: &mut Criterion) {
    let mut group = c.benchmark_group("title/parse");

    let small = "<html><head><title>GitHub &amp; Friends</title></head></html>".to_string();
    let padding = "<meta name=\"x\" content=\"y\">".repeat(2000);
    let large = format!(
        "<html><head>{}<TITLE lang=\"en\">Late title</TITLE></head><body></body></html>",
        padding
    );
    let missing = format!("<html><head>{}</head></html>", padding);

    for (name, html) in [("small", &small), ("late", &large), ("missing", &missing)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), html, |b, html| {
            b.iter(|| parse_title(black_box(html)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_code_generation,
    bench_validation,
    bench_parse_title
);
criterion_main!(benches);
