//! Whole-document transforms.
//!
//! This crate provides:
//! - `component_definitions_to_assessment_plan`: component definitions +
//!   framework name → assessment plan
//! - `ssp_to_assessment_plan`: system security plan → assessment plan
//! - `assessment_plan_to_assessment_results`: assessment plan → results

pub mod error;
pub mod plan;
pub mod results;

pub use error::TransformError;
pub use plan::{component_definitions_to_assessment_plan, ssp_to_assessment_plan};
pub use results::assessment_plan_to_assessment_results;
