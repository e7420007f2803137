//! Pure policy transformation (no IO).
//!
//! Input: a Gemara Layer-3 policy model constructed elsewhere, plus options.
//! Output: an Ampel policy whose tenets carry CEL verification expressions.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod infer;
pub mod model;
pub mod options;
pub mod registry;
pub mod scope;
pub mod template;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::transform;
pub use error::TransformError;
