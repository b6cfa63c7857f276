#![forbid(unsafe_code)]

//! Case-insensitive row matching.
//!
//! A query matches a row when it is a substring of any of the row's search
//! terms, ignoring case. Several queries combine with OR.

use tracing::debug;

use crate::highlight::fold_case;
use crate::report::Row;

/// Returns `true` if `query` occurs, ignoring case, in any search term of `row`.
///
/// The empty query returns `false`. Callers that treat an empty query as
/// "no filter" must handle it before calling this.
#[must_use]
pub fn matches(row: &Row, query: &str) -> bool {
    if query.is_empty() {
        return false;
    }
    let query = fold_case(query);
    row.search_terms
        .iter()
        .any(|term| fold_case(term).contains(&query))
}

/// Returns `true` if any of `queries` [`matches`] `row`.
///
/// An empty list matches nothing.
#[must_use]
pub fn matches_any<S: AsRef<str>>(row: &Row, queries: &[S]) -> bool {
    queries.iter().any(|query| matches(row, query.as_ref()))
}

/// Rows that match any non-empty entry of `queries`.
///
/// Empty query strings are ignored. When no non-empty query remains there is
/// no filter and every row is returned.
#[must_use]
pub fn filter_rows<'a, S: AsRef<str>>(rows: &'a [Row], queries: &[S]) -> Vec<&'a Row> {
    let active: Vec<&str> = queries
        .iter()
        .map(|query| query.as_ref())
        .filter(|query| !query.is_empty())
        .collect();
    if active.is_empty() {
        return rows.iter().collect();
    }
    let kept: Vec<&Row> = rows.iter().filter(|row| matches_any(row, &active)).collect();
    debug!(
        queries = ?active,
        total = rows.len(),
        kept = kept.len(),
        "filtered rows"
    );
    kept
}
