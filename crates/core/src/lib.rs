//! Shared document model for assessment tooling.
//!
//! This crate provides:
//! - Typed OSCAL document structs with strict (no unknown fields) serde
//! - The single-key document envelope and JSON decoding entry points
//! - Component and control-implementation flavor adapters
//! - Document validation (duplicate identifier detection)
//! - Defaults stamped into generated documents

pub mod component;
pub mod decode;
pub mod defaults;
pub mod error;
pub mod implementation;
pub mod schema;
pub mod util;
pub mod validation;

pub use component::Component;
pub use error::CoreError;
pub use implementation::{ControlImplementation, RequirementView, StatementView};
pub use validation::{validate_all, DuplicateIdValidator, NoopValidator, ValidationError, Validator};
