use ampelgen_types::AmpelPolicy;

/// Table cells cannot carry raw pipes or newlines.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

pub fn render_markdown(policy: &AmpelPolicy) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Ampel policy: {}\n\n", policy.name));
    out.push_str(&format!(
        "- Tenets: {}\n- Rule: `{}`\n\n",
        policy.tenets.len(),
        policy.rule
    ));

    if policy.tenets.is_empty() {
        out.push_str("No tenets.\n");
        return out;
    }

    out.push_str("| Tenet | Name | Attestation types |\n");
    out.push_str("|---|---|---|\n");
    for t in &policy.tenets {
        let types = t
            .attestation_types
            .iter()
            .map(|a| format!("`{}`", cell(a)))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("| `{}` | {} | {} |\n", cell(&t.id), cell(&t.name), types));
    }

    out.push_str("\n## Checks\n");
    for t in &policy.tenets {
        out.push_str(&format!("\n### {}\n\n", t.id));
        if let Some(description) = &t.description {
            out.push_str(&format!("{}\n\n", description.trim()));
        }
        out.push_str(&format!("```cel\n{}\n```\n", t.code));
    }

    out
}
