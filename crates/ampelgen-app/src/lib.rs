//! Use case orchestration for ampelgen.
//!
//! This crate provides the application layer: use cases that coordinate the source, settings,
//! domain, and render layers. It is intentionally thin and delegates heavy lifting to them.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod explain;
mod render;
mod transform;

pub use explain::{ExplainOutput, format_explanation, format_not_found, format_types, run_explain};
pub use render::{parse_policy_json, render_markdown, serialize_policy};
pub use transform::{TransformInput, TransformOutput, run_transform};
