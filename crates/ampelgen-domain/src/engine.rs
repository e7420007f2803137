use crate::catalog;
use crate::error::TransformError;
use crate::infer;
use crate::model::{AssessmentPlan, EvaluationMethod, ScopeDimensions, SourcePolicy};
use crate::options::TransformOptions;
use crate::registry;
use crate::scope;
use crate::template::{self, BindError};
use ampelgen_types::{AmpelPolicy, Tenet};
use std::collections::{BTreeMap, BTreeSet};

/// Compile a source policy into an Ampel policy.
///
/// Plans and their automated methods are visited in document order; each
/// automated method becomes one tenet. Any failure aborts the whole call.
pub fn transform(
    policy: &SourcePolicy,
    options: &TransformOptions,
) -> Result<AmpelPolicy, TransformError> {
    if !policy.has_automated_methods() {
        return Err(TransformError::EmptyPolicy);
    }

    let dimensions = policy.scope.merged_with(&options.scope);

    let mut tenets = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for plan in &policy.assessment_plans {
        for (index, method) in plan.automated_methods().enumerate() {
            let tenet = compile_tenet(plan, index, method, &dimensions, options)?;
            if !seen.insert(tenet.id.clone()) {
                return Err(TransformError::DuplicateTenetId { id: tenet.id });
            }
            tenets.push(tenet);
        }
    }

    Ok(AmpelPolicy::new(policy.title.clone(), tenets))
}

fn compile_tenet(
    plan: &AssessmentPlan,
    index: usize,
    method: &EvaluationMethod,
    dimensions: &ScopeDimensions,
    options: &TransformOptions,
) -> Result<Tenet, TransformError> {
    let id = tenet_id(plan, index);

    let attestation_types = infer::infer(
        &plan.evidence_requirements,
        &method.description,
        &options.attestation_types,
    );

    let bound = bind_expression(plan, index, &id, &attestation_types, options)?;

    let clauses = scope::compile(dimensions, options.scope_filters);
    let code = if clauses.is_empty() {
        bound
    } else {
        let mut fragments = Vec::with_capacity(clauses.len() + 1);
        fragments.push(bound);
        fragments.extend(clauses);
        template::conjoin(&fragments)
    };

    let entry = catalog::enrich(&plan.requirement_id, options.catalog.as_ref());
    let name = match entry {
        Some(e) if !e.name.trim().is_empty() => e.name.clone(),
        _ => fallback_name(plan, method),
    };
    let description = entry
        .map(|e| e.description.clone())
        .filter(|d| !d.trim().is_empty());

    Ok(Tenet {
        id,
        name,
        code,
        attestation_types,
        description,
    })
}

/// `{requirement}-{plan}-{index}`; an empty requirement id is replaced by the
/// plan id.
fn tenet_id(plan: &AssessmentPlan, index: usize) -> String {
    let requirement = if plan.requirement_id.is_empty() {
        plan.id.as_str()
    } else {
        plan.requirement_id.as_str()
    };
    format!("{}-{}-{}", requirement, plan.id, index)
}

fn fallback_name(plan: &AssessmentPlan, method: &EvaluationMethod) -> String {
    let description = method.description.trim();
    if !description.is_empty() {
        description.to_string()
    } else if !plan.requirement_id.is_empty() {
        plan.requirement_id.clone()
    } else {
        plan.id.clone()
    }
}

/// Override lookup order for a whole check: tenet id, plan id, requirement id.
fn check_override<'a>(
    templates: &'a BTreeMap<String, String>,
    tenet_id: &str,
    plan: &AssessmentPlan,
) -> Option<&'a str> {
    [tenet_id, plan.id.as_str(), plan.requirement_id.as_str()]
        .into_iter()
        .filter(|key| !key.is_empty())
        .find_map(|key| templates.get(key))
        .map(String::as_str)
}

fn bind_expression(
    plan: &AssessmentPlan,
    index: usize,
    tenet_id: &str,
    attestation_types: &[String],
    options: &TransformOptions,
) -> Result<String, TransformError> {
    let params = parameters(plan, tenet_id, attestation_types);
    let locate = |err: BindError| TransformError::from_bind(err, &plan.id, index);

    if let Some(t) = check_override(&options.templates, tenet_id, plan) {
        return template::bind(t, &params).map_err(locate);
    }

    let mut fragments = Vec::with_capacity(attestation_types.len());
    for attestation_type in attestation_types {
        let t = match options.templates.get(attestation_type) {
            Some(t) => t.as_str(),
            None => registry::by_id(attestation_type)
                .map(|entry| entry.template)
                .ok_or_else(|| TransformError::TemplateNotFound {
                    plan_id: plan.id.clone(),
                    method_index: index,
                    attestation_type: attestation_type.clone(),
                })?,
        };
        fragments.push(template::bind(t, &params).map_err(locate)?);
    }

    Ok(template::conjoin(&fragments))
}

/// Registry defaults, then built-ins, then the plan's own parameters.
fn parameters(
    plan: &AssessmentPlan,
    tenet_id: &str,
    attestation_types: &[String],
) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();

    for entry in attestation_types.iter().filter_map(|t| registry::by_id(t)) {
        for (name, value) in entry.defaults {
            params
                .entry((*name).to_string())
                .or_insert_with(|| (*value).to_string());
        }
    }

    params.insert("RequirementId".to_string(), plan.requirement_id.clone());
    params.insert("PlanId".to_string(), plan.id.clone());
    params.insert("TenetId".to_string(), tenet_id.to_string());

    for (name, value) in &plan.parameters {
        params.insert(name.clone(), value.clone());
    }

    params
}
