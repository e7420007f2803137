//! The `transform` use case: load documents, resolve options, compile the policy.

use ampelgen_settings::{Overrides, ResolvedConfig};
use ampelgen_types::AmpelPolicy;
use anyhow::Context;
use tracing::{debug, info};

/// Input for the transform use case.
#[derive(Clone, Debug)]
pub struct TransformInput<'a> {
    /// Gemara Layer-3 policy location (path or `file://` URI).
    pub policy: &'a str,
    /// Optional Gemara Layer-2 catalog location.
    pub catalog: Option<&'a str>,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the transform use case.
#[derive(Clone, Debug)]
pub struct TransformOutput {
    pub policy: AmpelPolicy,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

pub fn run_transform(input: TransformInput<'_>) -> anyhow::Result<TransformOutput> {
    // Empty config is allowed, defaults apply.
    let cfg = if input.config_text.trim().is_empty() {
        ampelgen_settings::AmpelgenConfigV1::default()
    } else {
        ampelgen_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let mut resolved =
        ampelgen_settings::resolve_config(cfg, input.overrides).context("resolve config")?;

    let source = ampelgen_source::load_policy(input.policy)?;
    debug!(
        path = input.policy,
        plan_count = source.assessment_plans.len(),
        "loaded policy"
    );

    if let Some(location) = input.catalog {
        let catalog = ampelgen_source::load_catalog(location)?;
        debug!(path = location, entry_count = catalog.len(), "loaded catalog");
        resolved.options = resolved.options.with_catalog(catalog);
    }

    let policy = ampelgen_domain::transform(&source, &resolved.options)
        .with_context(|| format!("transform policy: {}", input.policy))?;
    info!(
        name = %policy.name,
        tenet_count = policy.tenets.len(),
        scope_filters = resolved.options.scope_filters,
        "generated ampel policy"
    );

    Ok(TransformOutput {
        policy,
        resolved_config: resolved,
    })
}
