use std::collections::BTreeMap;

/// A Gemara Layer-3 policy reduced to what the transformation needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourcePolicy {
    pub title: String,

    /// Scope dimensions declared on the policy itself.
    pub scope: ScopeDimensions,

    pub assessment_plans: Vec<AssessmentPlan>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssessmentPlan {
    pub id: String,

    /// Catalog assessment requirement this plan verifies; may be empty.
    pub requirement_id: String,

    pub evaluation_methods: Vec<EvaluationMethod>,
    pub evidence_requirements: String,

    /// Values bound into `{{.Name}}` template placeholders.
    pub parameters: BTreeMap<String, String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MethodKind {
    Automated,
    Gate,
    Behavioral,
}

impl MethodKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MethodKind::Automated => "automated",
            MethodKind::Gate => "gate",
            MethodKind::Behavioral => "behavioral",
        }
    }

    /// Case-insensitive parse of the Gemara `type` field.
    pub fn parse(v: &str) -> Option<Self> {
        match v.trim().to_ascii_lowercase().as_str() {
            "automated" => Some(MethodKind::Automated),
            "gate" => Some(MethodKind::Gate),
            "behavioral" | "behavioural" => Some(MethodKind::Behavioral),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationMethod {
    pub kind: MethodKind,
    pub description: String,
}

impl EvaluationMethod {
    pub fn automated(description: impl Into<String>) -> Self {
        Self {
            kind: MethodKind::Automated,
            description: description.into(),
        }
    }
}

/// A named scope axis (technology, region, sensitivity level, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeDimension {
    pub name: String,
    pub values: Vec<String>,
}

impl ScopeDimension {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Scope dimensions in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeDimensions(pub Vec<ScopeDimension>);

impl ScopeDimensions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScopeDimension> {
        self.0.iter()
    }

    /// Overlay `other` onto `self`.
    ///
    /// A dimension already declared keeps its position but takes the overlay's
    /// values; new dimensions are appended in the overlay's order.
    pub fn merged_with(&self, other: &ScopeDimensions) -> ScopeDimensions {
        let mut out = self.0.clone();
        for dim in other.iter() {
            match out.iter_mut().find(|d| d.name == dim.name) {
                Some(existing) => existing.values = dim.values.clone(),
                None => out.push(dim.clone()),
            }
        }
        ScopeDimensions(out)
    }
}

impl FromIterator<ScopeDimension> for ScopeDimensions {
    fn from_iter<T: IntoIterator<Item = ScopeDimension>>(iter: T) -> Self {
        ScopeDimensions(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
}

/// Read-only catalog keyed by requirement (or control) identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    pub entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.entries.insert(
            id.into(),
            CatalogEntry {
                name: name.into(),
                description: description.into(),
            },
        );
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssessmentPlan {
    pub fn automated_methods(&self) -> impl Iterator<Item = &EvaluationMethod> {
        self.evaluation_methods
            .iter()
            .filter(|m| m.kind == MethodKind::Automated)
    }
}

impl SourcePolicy {
    pub fn has_automated_methods(&self) -> bool {
        self.assessment_plans
            .iter()
            .any(|p| p.automated_methods().next().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_kind_parse_is_case_insensitive() {
        assert_eq!(MethodKind::parse("Automated"), Some(MethodKind::Automated));
        assert_eq!(MethodKind::parse(" GATE "), Some(MethodKind::Gate));
        assert_eq!(MethodKind::parse("behavioral"), Some(MethodKind::Behavioral));
        assert_eq!(MethodKind::parse("manual"), None);
    }

    #[test]
    fn merged_scope_replaces_in_place_and_appends() {
        let base: ScopeDimensions = [
            ScopeDimension::new("technology", ["rust"]),
            ScopeDimension::new("region", ["eu"]),
        ]
        .into_iter()
        .collect();
        let overlay: ScopeDimensions = [
            ScopeDimension::new("sensitivity", ["high"]),
            ScopeDimension::new("technology", ["go", "rust"]),
        ]
        .into_iter()
        .collect();

        let merged = base.merged_with(&overlay);
        let names: Vec<&str> = merged.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["technology", "region", "sensitivity"]);
        assert_eq!(merged.0[0].values, vec!["go", "rust"]);
    }

    #[test]
    fn automated_methods_skip_other_kinds() {
        let plan = AssessmentPlan {
            id: "p".to_string(),
            evaluation_methods: vec![
                EvaluationMethod {
                    kind: MethodKind::Gate,
                    description: "review".to_string(),
                },
                EvaluationMethod::automated("scan"),
            ],
            ..AssessmentPlan::default()
        };
        let descriptions: Vec<&str> = plan
            .automated_methods()
            .map(|m| m.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["scan"]);
    }

    #[test]
    fn policies_compare_by_value_down_to_methods() {
        let plan = AssessmentPlan {
            id: "p".to_string(),
            evaluation_methods: vec![EvaluationMethod::automated("scan")],
            ..AssessmentPlan::default()
        };
        let a = SourcePolicy {
            title: "t".to_string(),
            assessment_plans: vec![plan.clone()],
            ..SourcePolicy::default()
        };
        let mut b = a.clone();
        assert_eq!(a, b);

        b.assessment_plans[0].evaluation_methods[0].kind = MethodKind::Gate;
        assert_ne!(a, b);
        assert_ne!(plan, b.assessment_plans[0]);
    }
}
