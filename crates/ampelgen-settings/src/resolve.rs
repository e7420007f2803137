use crate::model::{AmpelgenConfigV1, ScopeConfig};
use ampelgen_domain::model::{ScopeDimension, ScopeDimensions};
use ampelgen_domain::options::TransformOptions;
use ampelgen_domain::{registry, template};
use ampelgen_types::SCHEMA_CONFIG_V1;
use anyhow::Context;

/// CLI-level overrides; `None`/empty means "not given".
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub scope_filters: Option<bool>,
    pub attestation_types: Vec<String>,
}

/// Options ready for the engine. The catalog is attached by the caller.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub options: TransformOptions,
}

pub fn resolve_config(
    cfg: AmpelgenConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let scope_filters = overrides.scope_filters.or(cfg.scope_filters).unwrap_or(false);
    let scope = parse_scope(&cfg.scope)?;

    // Attestation types: CLI list replaces the config list wholesale.
    let raw_types = if overrides.attestation_types.is_empty() {
        cfg.attestation_types
    } else {
        overrides.attestation_types
    };
    let attestation_types = parse_attestation_types(&raw_types)?;

    for (key, body) in &cfg.templates {
        validate_template(key, body)?;
    }

    let options = TransformOptions::default()
        .with_scope_filters(scope_filters)
        .with_attestation_types(attestation_types)
        .with_cel_templates(cfg.templates)
        .with_scope_dimensions(scope);

    Ok(ResolvedConfig { options })
}

fn parse_attestation_types(raw: &[String]) -> anyhow::Result<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for entry in raw {
        if entry.trim().is_empty() {
            anyhow::bail!("attestation type entries must not be empty");
        }
        let canonical = registry::canonicalize(entry);
        if !out.contains(&canonical) {
            out.push(canonical);
        }
    }
    Ok(out)
}

fn validate_template(key: &str, body: &str) -> anyhow::Result<()> {
    if key.trim().is_empty() {
        anyhow::bail!("template keys must not be empty");
    }
    template::placeholders(body).with_context(|| format!("invalid template for {key}"))?;
    Ok(())
}

fn parse_scope(scope: &[ScopeConfig]) -> anyhow::Result<ScopeDimensions> {
    let mut dims: Vec<ScopeDimension> = Vec::with_capacity(scope.len());
    for sc in scope {
        let name = sc.name.trim();
        if name.is_empty() {
            anyhow::bail!("scope dimension names must not be empty");
        }
        if dims.iter().any(|d| d.name == name) {
            anyhow::bail!("scope dimension declared twice: {name}");
        }
        dims.push(ScopeDimension::new(name, sc.values.iter().cloned()));
    }
    Ok(ScopeDimensions(dims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;
    use ampelgen_types::ids;

    #[test]
    fn empty_config_uses_defaults() {
        let resolved =
            resolve_config(AmpelgenConfigV1::default(), Overrides::default()).expect("resolve");
        let options = resolved.options;
        assert!(!options.scope_filters);
        assert!(options.attestation_types.is_empty());
        assert!(options.templates.is_empty());
        assert!(options.scope.is_empty());
        assert!(options.catalog.is_none());
    }

    #[test]
    fn full_config_resolves() {
        let cfg = parse_config_toml(
            r#"
schema = "ampelgen.config.v1"
scope_filters = true
attestation_types = ["slsa", "https://example.com/custom/v1"]

[templates]
"BUILD-01.01" = 'attestation.predicate.buildDefinition.buildType == "{{.BuildType}}"'

[[scope]]
name = "technology"
values = ["rust", "go"]

[[scope]]
name = "region"
values = ["eu"]
"#,
        )
        .expect("parse");

        let options = resolve_config(cfg, Overrides::default())
            .expect("resolve")
            .options;
        assert!(options.scope_filters);
        assert_eq!(
            options.attestation_types,
            vec![
                ids::PREDICATE_SLSA_PROVENANCE_V1.to_string(),
                "https://example.com/custom/v1".to_string()
            ]
        );
        assert!(options.templates.contains_key("BUILD-01.01"));
        let names: Vec<&str> = options.scope.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["technology", "region"]);
    }

    #[test]
    fn overrides_win_over_config() {
        let cfg = AmpelgenConfigV1 {
            scope_filters: Some(true),
            attestation_types: vec!["slsa".to_string()],
            ..AmpelgenConfigV1::default()
        };
        let overrides = Overrides {
            scope_filters: Some(false),
            attestation_types: vec!["cyclonedx".to_string(), "cyclonedx".to_string()],
        };
        let options = resolve_config(cfg, overrides).expect("resolve").options;
        assert!(!options.scope_filters);
        assert_eq!(
            options.attestation_types,
            vec![ids::PREDICATE_CYCLONEDX_BOM.to_string()]
        );
    }

    #[test]
    fn malformed_template_is_rejected_with_key() {
        let mut cfg = AmpelgenConfigV1::default();
        cfg.templates
            .insert("slsa-check-01".to_string(), "x == {{.Open".to_string());
        let err = resolve_config(cfg, Overrides::default()).unwrap_err();
        assert!(format!("{err:#}").contains("slsa-check-01"));
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let cfg = AmpelgenConfigV1 {
            schema: Some("ampelgen.config.v9".to_string()),
            ..AmpelgenConfigV1::default()
        };
        assert!(resolve_config(cfg, Overrides::default()).is_err());
    }

    #[test]
    fn duplicate_scope_dimension_is_rejected() {
        let cfg = parse_config_toml(
            r#"
[[scope]]
name = "region"
values = ["eu"]

[[scope]]
name = "region"
values = ["us"]
"#,
        )
        .expect("parse");
        assert!(resolve_config(cfg, Overrides::default()).is_err());
    }

    #[test]
    fn blank_attestation_type_is_rejected() {
        let overrides = Overrides {
            attestation_types: vec!["  ".to_string()],
            ..Overrides::default()
        };
        assert!(resolve_config(AmpelgenConfigV1::default(), overrides).is_err());
    }

    #[test]
    fn config_scope_survives_when_config_types_are_used() {
        let cfg = parse_config_toml(
            r#"
attestation_types = ["spdx"]

[[scope]]
name = "region"
values = ["eu", "us"]
"#,
        )
        .expect("parse");

        let options = resolve_config(cfg, Overrides::default())
            .expect("resolve")
            .options;
        assert_eq!(
            options.attestation_types,
            vec![ids::PREDICATE_SPDX_DOCUMENT.to_string()]
        );
        assert_eq!(options.scope.0.len(), 1);
        assert_eq!(options.scope.0[0].values, vec!["eu", "us"]);
    }
}
