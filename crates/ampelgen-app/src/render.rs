//! Serialization and Markdown rendering of generated policies.

use ampelgen_types::AmpelPolicy;
use anyhow::Context;

/// Pretty JSON (2-space indent, struct field order) with a trailing newline.
pub fn serialize_policy(policy: &AmpelPolicy) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(policy).context("serialize policy")?;
    out.push('\n');
    Ok(out)
}

pub fn parse_policy_json(text: &str) -> anyhow::Result<AmpelPolicy> {
    serde_json::from_str(text).context("parse policy JSON")
}

pub fn render_markdown(policy: &AmpelPolicy) -> String {
    ampelgen_render::render_markdown(policy)
}
