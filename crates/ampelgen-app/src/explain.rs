//! The `explain` and `types` use cases: look up attestation type documentation.

use ampelgen_domain::registry::{self, AttestationType};

/// Output from the explain use case.
#[derive(Debug)]
pub enum ExplainOutput {
    /// Found a registry entry for the identifier.
    Found(&'static AttestationType),
    /// Unknown identifier; includes the available identifiers and aliases.
    NotFound {
        identifier: String,
        available: Vec<(&'static str, &'static str)>,
    },
}

/// Look up an attestation type by predicate URI or alias.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match registry::lookup(identifier) {
        Some(entry) => ExplainOutput::Found(entry),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available: registry::registry()
                .iter()
                .map(|t| (t.alias, t.id))
                .collect(),
        },
    }
}

/// Format a registry entry for terminal display.
pub fn format_explanation(entry: &AttestationType) -> String {
    let mut out = String::new();

    out.push_str(entry.title);
    out.push('\n');
    out.push_str(&"=".repeat(entry.title.len()));
    out.push_str("\n\n");
    out.push_str(&format!("Identifier: {}\n", entry.id));
    out.push_str(&format!("Alias:      {}\n", entry.alias));
    if entry.catch_all {
        out.push_str("Fallback:   yes (used when no other type matches)\n");
    }
    out.push('\n');

    out.push_str("Keywords\n");
    out.push_str("--------\n");
    for k in entry.keywords {
        out.push_str(&format!("  - {}\n", k));
    }
    out.push('\n');

    out.push_str("Default template\n");
    out.push_str("----------------\n");
    out.push_str("```cel\n");
    out.push_str(entry.template);
    out.push('\n');
    out.push_str("```\n");

    if !entry.defaults.is_empty() {
        out.push_str("\nParameter defaults\n");
        out.push_str("------------------\n");
        for (name, value) in entry.defaults {
            out.push_str(&format!("  {} = {:?}\n", name, value));
        }
    }

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, available: &[(&str, &str)]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown attestation type: {}\n\n", identifier));
    out.push_str("Available types:\n");
    for (alias, id) in available {
        out.push_str(&format!("  - {} ({})\n", alias, id));
    }

    out
}

/// One line per registry entry, in inference priority order.
pub fn format_types() -> String {
    let width = registry::registry()
        .iter()
        .map(|t| t.alias.len())
        .max()
        .unwrap_or(0);

    registry::registry()
        .iter()
        .map(|t| format!("{:<width$}  {}\n", t.alias, t.id))
        .collect()
}
