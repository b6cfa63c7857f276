//! End-to-end checks against a captured `hx --health` report.

use health_report::{
    PlainPainter, Report, SpanKind, highlight_words, mark_status_symbols, matches, matches_any,
    parse,
};

const HX_HEALTH: &str = include_str!("fixtures/hx-health.txt");

fn keys(rows: &[&health_report::Row]) -> Vec<String> {
    rows.iter().map(|row| row.primary_key.clone()).collect()
}

fn report() -> Report {
    parse(HX_HEALTH)
}

#[test]
fn sections() {
    let report = report();
    assert_eq!(report.preamble_lines.len(), 7);
    assert_eq!(report.preamble_lines[0], "Config file: default");
    assert!(report.header.starts_with("Language "));
    assert!(report.header.ends_with("Indent"));
    assert_eq!(report.rows.len(), 10);
}

#[test]
fn continuation_lines_belong_to_their_row() {
    let report = report();
    let line_counts: Vec<(&str, usize)> = report
        .rows
        .iter()
        .map(|row| (row.primary_key.as_str(), row.lines.len()))
        .collect();
    assert_eq!(
        line_counts,
        [
            ("astro", 1),
            ("bash", 1),
            ("c", 1),
            ("go", 2),
            ("javascript", 1),
            ("markdown", 2),
            ("python", 3),
            ("rust", 1),
            ("toml", 1),
            ("zig", 1),
        ]
    );
}

#[test]
fn search_terms_from_all_lines() {
    let report = report();
    let by_key = |key: &str| {
        report
            .rows
            .iter()
            .find(|row| row.primary_key == key)
            .map(|row| row.search_terms.clone())
            .unwrap_or_default()
    };
    assert_eq!(
        by_key("python"),
        ["python", "ruff", "debugpy", "jedi-language-serv", "pylsp"]
    );
    assert_eq!(
        by_key("go"),
        ["go", "gopls", "dlv", "gofmt", "golangci-lint-lange"]
    );
    assert_eq!(by_key("javascript"), ["javascript", "typescript-language"]);
    assert_eq!(by_key("markdown"), ["markdown", "marksman", "markdown-oxide"]);
    // Duplicates are kept.
    assert_eq!(by_key("zig"), ["zig", "zls", "lldb-dap", "zig"]);
}

#[test]
fn rows_reconstruct_post_header_text() {
    let report = report();
    let rows_text: Vec<&str> = report
        .rows
        .iter()
        .flat_map(|row| row.lines.iter().map(String::as_str))
        .collect();
    let expected: Vec<&str> = HX_HEALTH
        .lines()
        .skip_while(|line| *line != report.header)
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .collect();
    assert_eq!(rows_text, expected);
}

#[test]
fn filter_by_tool_name() {
    let report = report();
    assert_eq!(keys(&report.filter(&["lldb"])), ["c", "rust", "zig"]);
    assert_eq!(keys(&report.filter(&["RUFF"])), ["python"]);
}

#[test]
fn filter_with_several_terms_is_or() {
    let report = report();
    assert_eq!(keys(&report.filter(&["toml", "zls"])), ["toml", "zig"]);
}

#[test]
fn filter_never_matches_placeholders_or_symbols() {
    let report = report();
    assert!(report.filter(&["None"]).is_empty());
    assert!(report.filter(&["✓"]).is_empty());
}

#[test]
fn matcher_agrees_with_filter() {
    let report = report();
    for row in &report.rows {
        assert_eq!(matches(row, "lsp"), matches_any(row, &["lsp"]));
        assert!(!matches(row, ""));
    }
}

#[test]
fn highlight_row_lines() {
    let report = report();
    let python = &report.rows[6];
    let highlighted: Vec<_> = python
        .lines
        .iter()
        .map(|line| mark_status_symbols(highlight_words(line, &["py"])))
        .collect();

    let matched: Vec<Vec<&str>> = highlighted
        .iter()
        .map(|h| {
            h.spans()
                .iter()
                .filter(|span| span.kind == SpanKind::Matched)
                .map(|span| span.text.as_str())
                .collect()
        })
        .collect();
    assert_eq!(matched, [vec!["py", "py"], vec![], vec!["py"]]);

    for (line, h) in python.lines.iter().zip(&highlighted) {
        assert_eq!(&h.paint(&PlainPainter), line);
        assert!(h.spans().iter().any(|span| span.kind != SpanKind::Plain));
    }
}

#[test]
fn reparse_of_reconstruction_is_stable() {
    let report = report();
    let mut text = report.preamble_lines.join("\n");
    text.push_str("\n\n");
    text.push_str(&report.header);
    text.push_str("\n\n");
    for row in &report.rows {
        for line in &row.lines {
            text.push_str(line);
            text.push('\n');
        }
    }
    text.push('\n');
    assert_eq!(parse(&text), report);
}

#[cfg(feature = "serde")]
#[test]
fn serializes_to_json() {
    let report = report();
    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["rows"][0]["primary_key"], "astro");
    assert_eq!(json["preamble_lines"].as_array().map(Vec::len), Some(7));
}
