//! Rendering utilities for human-facing summaries of generated policies.

#![forbid(unsafe_code)]

mod markdown;

pub use markdown::render_markdown;
