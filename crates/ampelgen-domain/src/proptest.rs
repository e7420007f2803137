//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Output determinism and tenet id uniqueness
//! - Inference fallback and explicit type precedence
//! - Scope filter neutrality when disabled
//! - Strict template binding

use crate::engine::transform;
use crate::error::TransformError;
use crate::infer::infer;
use crate::model::{
    AssessmentPlan, EvaluationMethod, MethodKind, ScopeDimension, ScopeDimensions, SourcePolicy,
};
use crate::options::TransformOptions;
use crate::registry;
use crate::template::{self, BindError};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Evidence phrases, some recognized by the registry and some not.
fn arb_phrase() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "SLSA provenance",
        "trusted builder",
        "SBOM",
        "SPDX document",
        "CycloneDX bom",
        "vulnerability scan",
        "CVE report",
        "in-toto statement",
        "signed release notes",
        "code review",
        "unit tests pass",
    ])
    .prop_map(str::to_string)
}

fn arb_evidence() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_phrase(), 0..4).prop_map(|v| v.join(" and "))
}

/// Text that cannot contain any registry keyword.
fn arb_unrecognized_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9 .,#-]{0,40}").unwrap()
}

fn arb_kind() -> impl Strategy<Value = MethodKind> {
    prop_oneof![
        3 => Just(MethodKind::Automated),
        1 => Just(MethodKind::Gate),
        1 => Just(MethodKind::Behavioral),
    ]
}

fn arb_method() -> impl Strategy<Value = EvaluationMethod> {
    (arb_kind(), arb_evidence()).prop_map(|(kind, description)| EvaluationMethod {
        kind,
        description,
    })
}

fn arb_requirement_id() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        4 => prop::string::string_regex("[A-Z]{2,5}-[0-9]{2}\\.[0-9]{2}").unwrap(),
    ]
}

/// Plans with distinct ids (the index is baked into the id).
fn arb_plans() -> impl Strategy<Value = Vec<AssessmentPlan>> {
    prop::collection::vec(
        (
            arb_requirement_id(),
            arb_evidence(),
            prop::collection::vec(arb_method(), 0..4),
        ),
        0..6,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (requirement_id, evidence, methods))| AssessmentPlan {
                id: format!("plan-{i}"),
                requirement_id,
                evaluation_methods: methods,
                evidence_requirements: evidence,
                parameters: BTreeMap::new(),
            })
            .collect()
    })
}

fn arb_policy() -> impl Strategy<Value = SourcePolicy> {
    ("[A-Za-z ]{0,20}", arb_plans()).prop_map(|(title, plans)| SourcePolicy {
        title,
        scope: ScopeDimensions::default(),
        assessment_plans: plans,
    })
}

fn arb_scope() -> impl Strategy<Value = ScopeDimensions> {
    prop::collection::vec(
        (
            "[a-z][a-z-]{0,10}",
            prop::collection::vec("[a-z0-9]{1,8}", 0..4),
        ),
        0..4,
    )
    .prop_map(|dims| {
        dims.into_iter()
            .map(|(name, values)| ScopeDimension::new(name, values))
            .collect()
    })
}

fn arb_explicit_types() -> impl Strategy<Value = Vec<String>> {
    let ids: Vec<String> = registry::registry()
        .iter()
        .map(|t| t.id.to_string())
        .collect();
    prop::sample::subsequence(ids.clone(), 1..=ids.len())
}

fn arb_identifier() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z_][A-Za-z0-9_]{0,15}").unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn transform_is_deterministic(policy in arb_policy(), scope in arb_scope(), filters in any::<bool>()) {
        let options = TransformOptions::default()
            .with_scope_filters(filters)
            .with_scope_dimensions(scope);
        let first = transform(&policy, &options);
        let second = transform(&policy, &options);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn tenet_ids_are_unique(policy in arb_policy()) {
        if let Ok(out) = transform(&policy, &TransformOptions::default()) {
            let mut ids: Vec<&str> = out.tenets.iter().map(|t| t.id.as_str()).collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), total);
        }
    }

    #[test]
    fn empty_policy_error_iff_no_automated_methods(policy in arb_policy()) {
        let result = transform(&policy, &TransformOptions::default());
        let automated = policy
            .assessment_plans
            .iter()
            .map(|p| p.automated_methods().count())
            .sum::<usize>();
        if automated == 0 {
            prop_assert_eq!(result, Err(TransformError::EmptyPolicy));
        } else {
            let out = result.expect("policy with automated methods compiles");
            prop_assert_eq!(out.tenets.len(), automated);
        }
    }

    #[test]
    fn unrecognized_text_infers_exactly_one_in_toto_type(
        evidence in arb_unrecognized_text(),
        description in arb_unrecognized_text(),
    ) {
        let types = infer(&evidence, &description, &[]);
        prop_assert_eq!(types, vec![registry::catch_all().id.to_string()]);
    }

    #[test]
    fn inference_never_returns_empty(evidence in arb_evidence(), description in arb_evidence()) {
        let types = infer(&evidence, &description, &[]);
        prop_assert!(!types.is_empty());
    }

    #[test]
    fn explicit_types_ignore_evidence(
        evidence in arb_evidence(),
        description in arb_evidence(),
        explicit in arb_explicit_types(),
    ) {
        prop_assert_eq!(infer(&evidence, &description, &explicit), explicit);
    }

    #[test]
    fn explicit_types_apply_to_every_tenet(policy in arb_policy(), explicit in arb_explicit_types()) {
        let options = TransformOptions::default().with_attestation_types(explicit.clone());
        if let Ok(out) = transform(&policy, &options) {
            for tenet in &out.tenets {
                prop_assert_eq!(&tenet.attestation_types, &explicit);
            }
        }
    }

    #[test]
    fn disabled_scope_filters_do_not_change_code(policy in arb_policy(), scope in arb_scope()) {
        let plain = transform(&policy, &TransformOptions::default());
        let scoped = transform(
            &policy,
            &TransformOptions::default()
                .with_scope_filters(false)
                .with_scope_dimensions(scope),
        );
        prop_assert_eq!(plain, scoped);
    }

    #[test]
    fn binding_is_strict(name in arb_identifier(), other in arb_identifier()) {
        prop_assume!(name != other);
        let mut params = BTreeMap::new();
        params.insert(other, "value".to_string());
        let template = format!("attestation.predicate.x == \"{{{{.{name}}}}}\"");
        prop_assert_eq!(
            template::bind(&template, &params),
            Err(BindError::MissingParameter { name })
        );
    }
}
