//! Gemara Layer-2 control catalogs.

use ampelgen_domain::model::Catalog;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CatalogDoc {
    #[serde(default)]
    control_families: Vec<FamilyDoc>,
    #[serde(default)]
    entries: Vec<EntryDoc>,
}

#[derive(Debug, Deserialize)]
struct FamilyDoc {
    #[serde(default)]
    controls: Vec<ControlDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ControlDoc {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    objective: String,
    #[serde(default)]
    assessment_requirements: Vec<RequirementDoc>,
}

#[derive(Debug, Deserialize)]
struct RequirementDoc {
    id: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct EntryDoc {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

/// Parse a catalog into requirement/control id lookups.
///
/// Requirement ids resolve to their control's title and the requirement
/// text; control ids resolve to title and objective. Flat `entries` are
/// inserted last and win on conflict.
pub fn parse_catalog_yaml(text: &str) -> anyhow::Result<Catalog> {
    let doc: CatalogDoc = if text.trim().is_empty() {
        CatalogDoc::default()
    } else {
        serde_yaml::from_str(text)?
    };

    let mut catalog = Catalog::default();
    for control in doc.control_families.iter().flat_map(|f| &f.controls) {
        catalog.insert(&control.id, &control.title, &control.objective);
        for req in &control.assessment_requirements {
            catalog.insert(&req.id, &control.title, req.text.trim());
        }
    }
    for entry in doc.entries {
        catalog.insert(entry.id, entry.name, entry.description);
    }
    Ok(catalog)
}
