//! Scope filter clauses.
//!
//! Each non-empty dimension becomes one `context["<name>"] in [...]` membership
//! test, in declaration order.

use crate::model::ScopeDimensions;

/// Compile scope dimensions into CEL filter clauses.
///
/// Disabled filtering or an empty dimension set yields no clauses.
pub fn compile(dimensions: &ScopeDimensions, enabled: bool) -> Vec<String> {
    if !enabled {
        return Vec::new();
    }

    dimensions
        .iter()
        .filter(|d| !d.values.is_empty())
        .map(|d| {
            let values = d
                .values
                .iter()
                .map(|v| cel_string(v))
                .collect::<Vec<_>>()
                .join(", ");
            format!("context[{}] in [{}]", cel_string(&d.name), values)
        })
        .collect()
}

/// Quote `s` as a CEL double-quoted string literal.
pub fn cel_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
