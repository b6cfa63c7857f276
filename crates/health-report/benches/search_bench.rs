//! Benchmarks for parsing, filtering and highlighting a health report.
//!
//! Run with: `cargo bench --package health-report --bench search_bench`
//!
//! The interactive viewer re-filters and re-highlights on every keystroke,
//! so `filter` and `highlight_rows` are the hot paths. Reports are generated
//! with a few hundred languages, about the size of a current Helix release.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use health_report::{Report, highlight_words, mark_status_symbols, parse};
use std::hint::black_box;

// ============================================================================
// Test Data Generation
// ============================================================================

const PREAMBLE: &str = "\
Config file: default
Language file: default
Log file: /home/user/.cache/helix/helix.log
Runtime directories: /home/user/.config/helix/runtime
Clipboard provider: wayland
";

const HEADER: &str = "Language    Language servers    Debug adapter    Formatter    Highlight    Textobject    Indent";

const TOOLS: &[&str] = &[
    "rust-analyzer",
    "typescript-language…",
    "pylsp",
    "clangd",
    "gopls",
    "lldb-dap",
    "taplo",
    "marksman",
    "zls",
    "jedi-language-serv…",
];

/// Generate a report with `languages` rows, every third row with a
/// continuation line.
fn generate_report(languages: usize) -> String {
    let mut text = String::from(PREAMBLE);
    text.push('\n');
    text.push_str(HEADER);
    text.push('\n');
    for i in 0..languages {
        let lsp = TOOLS[i % TOOLS.len()];
        let dap = TOOLS[(i * 7 + 3) % TOOLS.len()];
        let mark = if i % 4 == 0 { "✘" } else { "✓" };
        text.push_str(&format!(
            "lang{i:<8}{mark} {lsp:<22}{mark} {dap:<20}None        ✓    ✓    ✘\n"
        ));
        if i % 3 == 0 {
            text.push_str(&format!("            ✘ extra-server-{i}\n"));
        }
    }
    text
}

fn highlight_rows(report: &Report, queries: &[&str]) -> usize {
    report
        .filter(queries)
        .into_iter()
        .flat_map(|row| row.lines.iter())
        .map(|line| mark_status_symbols(highlight_words(line, queries)).spans().len())
        .sum()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for languages in [50, 250, 1_000] {
        let text = generate_report(languages);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(languages), &text, |b, text| {
            b.iter(|| parse(black_box(text)));
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for languages in [50, 250, 1_000] {
        let report = parse(&generate_report(languages));
        group.throughput(Throughput::Elements(report.rows.len() as u64));

        // Many matching rows
        group.bench_with_input(BenchmarkId::new("common", languages), &report, |b, r| {
            b.iter(|| r.filter(black_box(&["lsp"])).len());
        });

        // No match
        group.bench_with_input(BenchmarkId::new("no_match", languages), &report, |b, r| {
            b.iter(|| r.filter(black_box(&["xyzzy"])).len());
        });

        // Several terms
        group.bench_with_input(BenchmarkId::new("multi", languages), &report, |b, r| {
            b.iter(|| r.filter(black_box(&["rust", "zls", "taplo", "dap"])).len());
        });
    }

    group.finish();
}

fn bench_highlight(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight");

    let report = parse(&generate_report(250));
    group.throughput(Throughput::Elements(report.line_count() as u64));

    group.bench_function("single_term", |b| {
        b.iter(|| highlight_rows(black_box(&report), &["lang1"]));
    });
    group.bench_function("multi_term", |b| {
        b.iter(|| highlight_rows(black_box(&report), &["lsp", "dap", "extra"]));
    });

    let line = &report.rows[0].lines[0];
    group.bench_function("one_line", |b| {
        b.iter(|| mark_status_symbols(highlight_words(black_box(line), &["rust"])));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_filter, bench_highlight);
criterion_main!(benches);
