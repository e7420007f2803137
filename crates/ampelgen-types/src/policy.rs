use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Schema identifier for `ampelgen.toml`.
pub const SCHEMA_CONFIG_V1: &str = "ampelgen.config.v1";

/// One compiled verification check.
///
/// Field order is the serialization order and is part of the output contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Tenet {
    pub id: String,
    pub name: String,

    /// CEL expression evaluated against each attestation.
    pub code: String,

    #[serde(rename = "attestationTypes")]
    pub attestation_types: Vec<String>,

    /// Catalog description, present only when a catalog entry matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An Ampel policy document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AmpelPolicy {
    pub name: String,
    pub tenets: Vec<Tenet>,
    pub rule: String,
}

impl AmpelPolicy {
    pub fn new(name: impl Into<String>, tenets: Vec<Tenet>) -> Self {
        Self {
            name: name.into(),
            tenets,
            rule: ids::RULE_ALL_TENETS.to_string(),
        }
    }

    pub fn tenet(&self, id: &str) -> Option<&Tenet> {
        self.tenets.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AmpelPolicy {
        AmpelPolicy::new(
            "Secure Build Policy",
            vec![Tenet {
                id: "BUILD-01.01-slsa-check-01-0".to_string(),
                name: "Verify SLSA provenance".to_string(),
                code: "true".to_string(),
                attestation_types: vec![ids::PREDICATE_SLSA_PROVENANCE_V1.to_string()],
                description: None,
            }],
        )
    }

    #[test]
    fn serializes_fields_in_contract_order() {
        let json = serde_json::to_string(&sample()).expect("serialize");
        let name = json.find("\"name\"").expect("name");
        let tenets = json.find("\"tenets\"").expect("tenets");
        let rule = json.find("\"rule\"").expect("rule");
        assert!(name < tenets && tenets < rule);

        let id = json.find("\"id\"").expect("id");
        let code = json.find("\"code\"").expect("code");
        let types = json.find("\"attestationTypes\"").expect("attestationTypes");
        assert!(id < code && code < types);
    }

    #[test]
    fn description_is_omitted_when_absent() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert!(json["tenets"][0].get("description").is_none());
        assert_eq!(json["rule"], "all(tenets)");
    }

    #[test]
    fn tenet_lookup_by_id() {
        let policy = sample();
        assert!(policy.tenet("BUILD-01.01-slsa-check-01-0").is_some());
        assert!(policy.tenet("missing").is_none());
    }
}
