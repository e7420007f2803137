//! Stable identifiers for attestation predicate types and policy rules.
//!
//! Predicate types are the canonical URIs carried in an in-toto statement's
//! `predicateType` field.

// Predicate types
pub const PREDICATE_SLSA_PROVENANCE_V1: &str = "https://slsa.dev/provenance/v1";
pub const PREDICATE_SPDX_DOCUMENT: &str = "https://spdx.dev/Document";
pub const PREDICATE_CYCLONEDX_BOM: &str = "https://cyclonedx.org/bom";
pub const PREDICATE_VULNERABILITY_SCAN: &str = "https://in-toto.io/Statement/v0.1";
pub const PREDICATE_IN_TOTO_STATEMENT_V1: &str = "https://in-toto.io/Statement/v1";

// Aggregation rules
pub const RULE_ALL_TENETS: &str = "all(tenets)";
