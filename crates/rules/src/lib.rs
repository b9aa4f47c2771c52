//! Rule extraction and indexing over component properties.
//!
//! This crate provides:
//! - The extension property catalog (namespace, property names, classes)
//! - Rule/check/parameter types extracted from component properties
//! - Property grouping by remarks key with namespace-qualified lookup
//! - An in-memory store with bidirectional rule/check/component indices

pub mod extension;
pub mod grouper;
pub mod store;

pub use extension::{Check, Parameter, Rule, RuleSet};
pub use store::{MemoryStore, RuleStore, StoreError};
