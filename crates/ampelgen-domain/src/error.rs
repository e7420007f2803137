//! Error types for the transformation engine.

use crate::template::BindError;

/// Errors that abort a transformation. There is no partial output.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// No assessment plan carries an automated evaluation method.
    #[error("policy has no automated evaluation methods to compile")]
    EmptyPolicy,

    /// A template placeholder had neither a plan parameter nor a default.
    #[error(
        "plan '{plan_id}' method {method_index}: missing template parameter '{name}'"
    )]
    MissingParameter {
        plan_id: String,
        method_index: usize,
        name: String,
    },

    /// No override and no registry default exists for an attestation type.
    #[error(
        "plan '{plan_id}' method {method_index}: no template for attestation type '{attestation_type}'"
    )]
    TemplateNotFound {
        plan_id: String,
        method_index: usize,
        attestation_type: String,
    },

    #[error("plan '{plan_id}' method {method_index}: {reason}")]
    MalformedTemplate {
        plan_id: String,
        method_index: usize,
        reason: String,
    },

    /// Two checks produced the same tenet id, either from duplicate plan ids or
    /// from dash-joined ids colliding (`A-b`/`c` and `A`/`b-c`).
    #[error("duplicate tenet id '{id}'")]
    DuplicateTenetId { id: String },
}

impl TransformError {
    pub(crate) fn from_bind(err: BindError, plan_id: &str, method_index: usize) -> Self {
        match err {
            BindError::MissingParameter { name } => TransformError::MissingParameter {
                plan_id: plan_id.to_string(),
                method_index,
                name,
            },
            BindError::Malformed { reason } => TransformError::MalformedTemplate {
                plan_id: plan_id.to_string(),
                method_index,
                reason,
            },
        }
    }
}
