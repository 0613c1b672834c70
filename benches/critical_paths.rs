//! Criterion benchmarks for Windcfg critical paths
//!
//! Benchmarks the operations a generator runs on every build:
//! - Source: parsing a JS module config
//! - Load: validation and theme resolution
//! - Merge: additive theme merge at growing extension sizes
//! - Content: brace expansion and glob compilation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::path::Path;
use windcfg::config::{parse_source, ConfigLoader, SourceFormat};
use windcfg::content::ContentMatcher;
use windcfg::theme::{deep_merge_additive, default_theme, Theme};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a JS module config extending `groups` color groups of 9 shades each
fn make_js_config(groups: usize) -> String {
    let colors: Vec<String> = (0..groups)
        .map(|g| {
            let shades: Vec<String> = (1..10)
                .map(|s| format!("'{}00': '#{:02x}{:02x}{:02x}'", s, g % 256, s * 25, 255 - s * 20))
                .collect();
            format!("brand{}: {{ {} }}", g, shades.join(", "))
        })
        .collect();

    format!(
        "module.exports = {{\n  content: ['./index.html', './src/**/*.{{rs,html,css}}'],\n  theme: {{ extend: {{ colors: {{ {} }} }} }},\n  plugins: [],\n}};\n",
        colors.join(",\n")
    )
}

/// Generate an extension theme with `n` color tokens
fn make_extension(n: usize) -> Theme {
    let mut theme = Theme::new();
    for i in 0..n {
        theme.insert("colors", format!("token-{}", i), format!("#{:06x}", i * 97 % 0xffffff));
    }
    theme
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("source");
    for groups in [1, 10, 50] {
        let text = make_js_config(groups);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("js_module", groups), &text, |b, text| {
            b.iter(|| parse_source(black_box(text), SourceFormat::JsModule))
        });
    }
    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let loader = ConfigLoader::default();
    let mut group = c.benchmark_group("load");
    for groups in [1, 10, 50] {
        let text = make_js_config(groups);
        group.bench_with_input(BenchmarkId::new("js_module", groups), &text, |b, text| {
            b.iter(|| loader.load_str(black_box(text), SourceFormat::JsModule, Path::new(".")))
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let defaults = default_theme();
    let mut group = c.benchmark_group("merge");
    for n in [10, 100, 1000] {
        let extend = make_extension(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("deep_merge_additive", n), &extend, |b, extend| {
            b.iter(|| deep_merge_additive(black_box(&defaults), black_box(extend)))
        });
    }
    group.finish();
}

fn bench_content(c: &mut Criterion) {
    let patterns = ["./index.html", "./src/**/*.{rs,html,css}", "./{pages,components}/**/*.{rs,html}"];
    c.bench_function("content/matcher", |b| {
        b.iter(|| ContentMatcher::new(Path::new("/project"), black_box(patterns)))
    });
}

criterion_group!(benches, bench_source, bench_load, bench_merge, bench_content);
criterion_main!(benches);
