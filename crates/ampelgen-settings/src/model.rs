use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `ampelgen.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AmpelgenConfigV1 {
    /// Optional schema string for tooling (`ampelgen.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Emit scope filter clauses from policy and config scope dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_filters: Option<bool>,

    /// Pin attestation types for every check (predicate URIs or aliases such as `slsa`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attestation_types: Vec<String>,

    /// Override templates keyed by tenet id, plan id, requirement id, or predicate type.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub templates: BTreeMap<String, String>,

    /// Global scope dimensions, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope: Vec<ScopeConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScopeConfig {
    pub name: String,

    #[serde(default)]
    pub values: Vec<String>,
}
