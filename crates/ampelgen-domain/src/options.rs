use crate::model::{Catalog, ScopeDimensions};
use std::collections::BTreeMap;

/// Caller-supplied knobs for a single transformation.
///
/// Built with the `with_*` methods; immutable once handed to [`crate::transform`].
#[derive(Clone, Debug, Default)]
pub struct TransformOptions {
    pub catalog: Option<Catalog>,

    /// Emit `context[...] in [...]` clauses for scope dimensions.
    pub scope_filters: bool,

    /// When non-empty, used verbatim for every check instead of inference.
    pub attestation_types: Vec<String>,

    /// Override templates keyed by tenet id, plan id, requirement id, or
    /// attestation type identifier.
    pub templates: BTreeMap<String, String>,

    /// Global scope dimensions overlaid on the policy's own.
    pub scope: ScopeDimensions,
}

impl TransformOptions {
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_scope_filters(mut self, enabled: bool) -> Self {
        self.scope_filters = enabled;
        self
    }

    pub fn with_attestation_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attestation_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cel_templates(mut self, templates: BTreeMap<String, String>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_scope_dimensions(mut self, scope: ScopeDimensions) -> Self {
        self.scope = scope;
        self
    }
}
