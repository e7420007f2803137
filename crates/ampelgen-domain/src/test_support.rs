use crate::model::{AssessmentPlan, EvaluationMethod, MethodKind, SourcePolicy};
use std::collections::BTreeMap;

pub fn method(kind: MethodKind, description: &str) -> EvaluationMethod {
    EvaluationMethod {
        kind,
        description: description.to_string(),
    }
}

pub fn plan(
    id: &str,
    requirement_id: &str,
    evidence: &str,
    methods: Vec<EvaluationMethod>,
) -> AssessmentPlan {
    AssessmentPlan {
        id: id.to_string(),
        requirement_id: requirement_id.to_string(),
        evaluation_methods: methods,
        evidence_requirements: evidence.to_string(),
        parameters: BTreeMap::new(),
    }
}

pub fn build_policy(title: &str, plans: Vec<AssessmentPlan>) -> SourcePolicy {
    SourcePolicy {
        title: title.to_string(),
        scope: Default::default(),
        assessment_plans: plans,
    }
}

/// The canonical single-plan SLSA example.
pub fn slsa_policy() -> SourcePolicy {
    build_policy(
        "Secure Build Policy",
        vec![plan(
            "slsa-check-01",
            "BUILD-01.01",
            "SLSA provenance with trusted builder",
            vec![method(MethodKind::Automated, "Verify SLSA provenance")],
        )],
    )
}
