#![forbid(unsafe_code)]

//! Tool-name extraction from report lines.
//!
//! Helix prints each configured tool as a status symbol followed by the tool
//! name, e.g. `✓ rust-analyzer` or `✘ pylsp`. Long names are cut with a
//! trailing ellipsis, and an unconfigured slot prints `None`.

/// Status symbol printed before a tool that was found.
pub const PASS_SYMBOL: &str = "✓";
/// Status symbol printed before a tool that is missing.
pub const FAIL_SYMBOL: &str = "✘";
/// Placeholder printed when no tool is configured for a column.
pub const NONE_PLACEHOLDER: &str = "None";
/// Truncation marker appended to names that did not fit the column.
pub const ELLIPSIS: char = '…';

/// Returns `true` if `token` is exactly one of the status symbols.
#[inline]
pub fn is_status_symbol(token: &str) -> bool {
    token == PASS_SYMBOL || token == FAIL_SYMBOL
}

/// Extract tool names that follow a status symbol in `line`.
///
/// Tokens are whitespace-delimited. The symbols themselves and the `None`
/// placeholder are never returned (a symbol directly after another symbol
/// starts its own pair); one trailing ellipsis is stripped. Order
/// follows the line and duplicates are kept.
#[must_use]
pub fn extract_tools(line: &str) -> Vec<String> {
    let mut tokens = line.split_whitespace().peekable();
    let mut tools = Vec::new();

    while let Some(token) = tokens.next() {
        if !is_status_symbol(token) {
            continue;
        }
        let Some(&candidate) = tokens.peek() else {
            break;
        };
        if candidate == NONE_PLACEHOLDER || is_status_symbol(candidate) {
            continue;
        }
        let name = candidate.strip_suffix(ELLIPSIS).unwrap_or(candidate);
        tools.push(name.to_string());
    }

    tools
}
