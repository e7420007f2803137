//! Gemara Layer-3 policy documents.

use crate::yaml::scalar_to_string;
use ampelgen_domain::model::{
    AssessmentPlan, EvaluationMethod, MethodKind, ScopeDimension, ScopeDimensions, SourcePolicy,
};
use anyhow::Context;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

const SCOPE_IN: &str = "in";
const SCOPE_OUT: &str = "out";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PolicyDoc {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    metadata: Option<MetadataDoc>,
    #[serde(default)]
    scope: Option<Value>,
    #[serde(default)]
    adherence: Option<AdherenceDoc>,
    #[serde(default)]
    assessment_plans: Vec<PlanDoc>,
}

#[derive(Debug, Default, Deserialize)]
struct MetadataDoc {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct AdherenceDoc {
    #[serde(default)]
    assessment_plans: Vec<PlanDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PlanDoc {
    id: String,
    #[serde(default)]
    requirement_id: String,
    #[serde(default)]
    evaluation_methods: Vec<MethodDoc>,
    #[serde(default)]
    evidence_requirements: String,
    #[serde(default)]
    parameters: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct MethodDoc {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    description: String,
}

/// Parse a Gemara Layer-3 policy (YAML or JSON) into the domain model.
///
/// `title` and `assessment-plans` may sit at the top level or under
/// `metadata` / `adherence` respectively; top-level wins.
pub fn parse_policy_yaml(text: &str) -> anyhow::Result<SourcePolicy> {
    let doc: PolicyDoc = if text.trim().is_empty() {
        PolicyDoc::default()
    } else {
        serde_yaml::from_str(text)?
    };

    let title = doc
        .title
        .or_else(|| doc.metadata.and_then(|m| m.title))
        .unwrap_or_default();

    let scope = match &doc.scope {
        Some(v) => parse_scope(v).context("parse scope")?,
        None => ScopeDimensions::default(),
    };

    let plan_docs = if doc.assessment_plans.is_empty() {
        doc.adherence.map(|a| a.assessment_plans).unwrap_or_default()
    } else {
        doc.assessment_plans
    };

    let assessment_plans = plan_docs
        .into_iter()
        .map(convert_plan)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(SourcePolicy {
        title,
        scope,
        assessment_plans,
    })
}

fn convert_plan(doc: PlanDoc) -> anyhow::Result<AssessmentPlan> {
    let evaluation_methods = doc
        .evaluation_methods
        .into_iter()
        .map(|m| {
            let kind = MethodKind::parse(&m.kind).with_context(|| {
                format!(
                    "plan '{}': unknown evaluation method type '{}' (expected automated|gate|behavioral)",
                    doc.id, m.kind
                )
            })?;
            Ok(EvaluationMethod {
                kind,
                description: m.description,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let parameters = match &doc.parameters {
        Some(v) => parse_parameters(v).with_context(|| format!("plan '{}': parameters", doc.id))?,
        None => BTreeMap::new(),
    };

    Ok(AssessmentPlan {
        id: doc.id,
        requirement_id: doc.requirement_id,
        evaluation_methods,
        evidence_requirements: doc.evidence_requirements,
        parameters,
    })
}

fn parse_parameters(value: &Value) -> anyhow::Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    match value {
        Value::Null => {}
        Value::Mapping(map) => {
            for (k, v) in map {
                let key = scalar_to_string(k).context("parameter names must be scalars")?;
                let val = scalar_to_string(v)
                    .with_context(|| format!("parameter '{key}' must be a scalar"))?;
                out.insert(key, val);
            }
        }
        _ => anyhow::bail!("parameters must be a mapping of name to value"),
    }
    Ok(out)
}

/// Scope is an ordered mapping of dimension -> values; a nested `in:` mapping is unwrapped.
/// Exclusions (`out:`) do not narrow checks and are skipped.
fn parse_scope(value: &Value) -> anyhow::Result<ScopeDimensions> {
    let map = match value {
        Value::Null => return Ok(ScopeDimensions::default()),
        Value::Mapping(map) => map,
        _ => anyhow::bail!("scope must be a mapping of dimension to values"),
    };

    let map = match map.get(SCOPE_IN) {
        Some(Value::Mapping(inner)) => inner,
        _ => map,
    };

    let mut dims = Vec::with_capacity(map.len());
    for (k, v) in map {
        if k.as_str() == Some(SCOPE_OUT) {
            continue;
        }
        let name = scalar_to_string(k).context("scope dimension names must be scalars")?;
        let values = match v {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items
                .iter()
                .map(|item| {
                    scalar_to_string(item)
                        .with_context(|| format!("scope '{name}' values must be scalars"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?,
            other => vec![
                scalar_to_string(other)
                    .with_context(|| format!("scope '{name}' values must be scalars"))?,
            ],
        };
        dims.push(ScopeDimension::new(name, values));
    }
    Ok(ScopeDimensions(dims))
}
