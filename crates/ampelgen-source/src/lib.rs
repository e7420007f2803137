//! Source adapters: read Gemara documents and map them onto domain models.
//!
//! This crate is allowed to do filesystem IO. It does not fetch remote documents;
//! callers hand it a local path or a `file://` URI.

#![forbid(unsafe_code)]

mod catalog;
mod location;
mod policy;
mod yaml;

use ampelgen_domain::model::{Catalog, SourcePolicy};
use anyhow::Context;

pub use catalog::parse_catalog_yaml;
pub use location::resolve_location;
pub use policy::parse_policy_yaml;

/// Load a Gemara Layer-3 policy from a path or `file://` URI.
pub fn load_policy(location: &str) -> anyhow::Result<SourcePolicy> {
    let path = resolve_location(location)?;
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("read policy: {path}"))?;
    parse_policy_yaml(&text).with_context(|| format!("parse policy: {path}"))
}

/// Load a Gemara Layer-2 catalog from a path or `file://` URI.
pub fn load_catalog(location: &str) -> anyhow::Result<Catalog> {
    let path = resolve_location(location)?;
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("read catalog: {path}"))?;
    parse_catalog_yaml(&text).with_context(|| format!("parse catalog: {path}"))
}
