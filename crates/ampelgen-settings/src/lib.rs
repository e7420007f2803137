//! Config parsing and option resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{AmpelgenConfigV1, ScopeConfig};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `ampelgen.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<AmpelgenConfigV1> {
    let cfg: AmpelgenConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the transform options used by the engine (config + overrides).
pub fn resolve_config(
    cfg: AmpelgenConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
