//! Attestation type registry.
//!
//! An ordered table of known predicate types. Order is inference priority:
//! the inferencer walks this slice front to back and the catch-all in-toto
//! statement entry is always last.

use ampelgen_types::ids;

/// One attestation class the engine knows how to verify.
#[derive(Debug)]
pub struct AttestationType {
    /// Canonical predicate type URI.
    pub id: &'static str,
    /// Short name accepted wherever an identifier is expected.
    pub alias: &'static str,
    pub title: &'static str,
    /// Lowercase keywords shown by `explain`; matching is done by `signature`.
    pub keywords: &'static [&'static str],
    signature: fn(&str) -> bool,
    /// Default CEL template for this type.
    pub template: &'static str,
    /// Placeholder defaults for `template`.
    pub defaults: &'static [(&'static str, &'static str)],
    /// Matches when no other entry does.
    pub catch_all: bool,
}

impl AttestationType {
    /// `text` must already be lowercased.
    pub fn matches(&self, text: &str) -> bool {
        (self.signature)(text)
    }
}

const SLSA_KEYWORDS: &[&str] = &["slsa", "provenance", "trusted builder", "build attestation"];
const SPDX_KEYWORDS: &[&str] = &["spdx"];
const SBOM_KEYWORDS: &[&str] = &["sbom", "bill of materials"];
const CYCLONEDX_KEYWORDS: &[&str] = &["cyclonedx", "cdx"];
const VULN_KEYWORDS: &[&str] = &[
    "vulnerab",
    "cve",
    "vuln scan",
    "security scan",
    "osv",
    "grype",
    "trivy",
];
const IN_TOTO_KEYWORDS: &[&str] = &["in-toto", "intoto"];

const SPDX_DISPLAY_KEYWORDS: &[&str] = &["spdx", "sbom", "bill of materials"];

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn slsa_signature(text: &str) -> bool {
    mentions_any(text, SLSA_KEYWORDS)
}

/// A bare "SBOM" defaults to SPDX unless CycloneDX is named.
fn spdx_signature(text: &str) -> bool {
    mentions_any(text, SPDX_KEYWORDS)
        || (mentions_any(text, SBOM_KEYWORDS) && !mentions_any(text, CYCLONEDX_KEYWORDS))
}

fn cyclonedx_signature(text: &str) -> bool {
    mentions_any(text, CYCLONEDX_KEYWORDS)
}

fn vuln_signature(text: &str) -> bool {
    mentions_any(text, VULN_KEYWORDS)
}

fn in_toto_signature(text: &str) -> bool {
    mentions_any(text, IN_TOTO_KEYWORDS)
}

static REGISTRY: [AttestationType; 5] = [
    AttestationType {
        id: ids::PREDICATE_SLSA_PROVENANCE_V1,
        alias: "slsa",
        title: "SLSA Provenance",
        keywords: SLSA_KEYWORDS,
        signature: slsa_signature,
        template: r#"attestation.predicateType == "https://slsa.dev/provenance/v1" && has(attestation.predicate.buildDefinition.buildType) && attestation.predicate.runDetails.builder.id.startsWith("{{.BuilderIdPrefix}}")"#,
        defaults: &[("BuilderIdPrefix", "")],
        catch_all: false,
    },
    AttestationType {
        id: ids::PREDICATE_SPDX_DOCUMENT,
        alias: "spdx",
        title: "SPDX SBOM",
        keywords: SPDX_DISPLAY_KEYWORDS,
        signature: spdx_signature,
        template: r#"attestation.predicateType == "https://spdx.dev/Document" && attestation.predicate.spdxVersion.startsWith("SPDX-") && size(attestation.predicate.packages) >= {{.MinPackages}}"#,
        defaults: &[("MinPackages", "1")],
        catch_all: false,
    },
    AttestationType {
        id: ids::PREDICATE_CYCLONEDX_BOM,
        alias: "cyclonedx",
        title: "CycloneDX SBOM",
        keywords: CYCLONEDX_KEYWORDS,
        signature: cyclonedx_signature,
        template: r#"attestation.predicateType == "https://cyclonedx.org/bom" && attestation.predicate.bomFormat == "CycloneDX" && size(attestation.predicate.components) >= {{.MinComponents}}"#,
        defaults: &[("MinComponents", "1")],
        catch_all: false,
    },
    AttestationType {
        id: ids::PREDICATE_VULNERABILITY_SCAN,
        alias: "vulns",
        title: "Vulnerability Scan",
        keywords: VULN_KEYWORDS,
        signature: vuln_signature,
        template: r#"attestation.predicateType == "https://in-toto.io/Statement/v0.1" && has(attestation.predicate.scanner.uri) && size(attestation.predicate.scanner.result) <= {{.MaxVulnerabilities}}"#,
        defaults: &[("MaxVulnerabilities", "0")],
        catch_all: false,
    },
    AttestationType {
        id: ids::PREDICATE_IN_TOTO_STATEMENT_V1,
        alias: "in-toto",
        title: "in-toto Statement",
        keywords: IN_TOTO_KEYWORDS,
        signature: in_toto_signature,
        template: r#"has(attestation.predicateType) && size(attestation.subject) > 0"#,
        defaults: &[],
        catch_all: true,
    },
];

/// All entries in priority order.
pub fn registry() -> &'static [AttestationType] {
    &REGISTRY
}

/// Look up an entry by predicate type URI or alias (alias is case-insensitive).
pub fn lookup(identifier: &str) -> Option<&'static AttestationType> {
    let trimmed = identifier.trim();
    REGISTRY
        .iter()
        .find(|t| t.id == trimmed || t.alias.eq_ignore_ascii_case(trimmed))
}

/// Exact predicate type lookup, used when selecting default templates.
pub fn by_id(id: &str) -> Option<&'static AttestationType> {
    REGISTRY.iter().find(|t| t.id == id)
}

/// The catch-all entry.
pub fn catch_all() -> &'static AttestationType {
    &REGISTRY[REGISTRY.len() - 1]
}

/// Map an alias to its predicate URI; anything else passes through unchanged.
pub fn canonicalize(identifier: &str) -> String {
    match lookup(identifier) {
        Some(t) => t.id.to_string(),
        None => identifier.trim().to_string(),
    }
}
