//! Stable DTOs and IDs used across the ampelgen workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted Ampel policy document
//! - stable predicate type identifiers and the aggregation rule

#![forbid(unsafe_code)]

pub mod ids;
pub mod policy;

pub use policy::{AmpelPolicy, Tenet, SCHEMA_CONFIG_V1};
