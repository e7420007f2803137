//! Attestation type inference from free-text evidence requirements.

use crate::registry;

/// Infer which attestation types a check targets.
///
/// Explicit types, when supplied, are returned verbatim and inference is
/// skipped. Otherwise every registry entry whose signature matches the
/// combined text contributes its identifier once, in registry order; the
/// catch-all in-toto statement is added when nothing else matched, so the
/// result is never empty.
pub fn infer(evidence: &str, method_description: &str, explicit: &[String]) -> Vec<String> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }

    let text = format!("{evidence}\n{method_description}").to_lowercase();

    let mut out: Vec<String> = registry::registry()
        .iter()
        .filter(|entry| entry.matches(&text))
        .map(|entry| entry.id.to_string())
        .collect();

    if out.is_empty() {
        out.push(registry::catch_all().id.to_string());
    }

    out
}
