//! Catalog enrichment.

use crate::model::{Catalog, CatalogEntry};

/// Look up catalog metadata for a requirement.
///
/// No catalog, an empty id, and a miss all return `None`; enrichment is
/// never required.
pub fn enrich<'a>(requirement_id: &str, catalog: Option<&'a Catalog>) -> Option<&'a CatalogEntry> {
    if requirement_id.is_empty() {
        return None;
    }
    catalog?.get(requirement_id)
}
