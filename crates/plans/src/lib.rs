//! Assessment plan and results generation.
//!
//! This crate provides:
//! - `generate_assessment_plan`: components + settings → assessment plan,
//!   one activity per applicable rule with a step per check
//! - `generate_assessment_results`: assessment plan → results skeleton,
//!   one observation per check with caller observations matched in

pub mod error;
pub mod generator;
pub mod results;

pub use error::PlanError;
pub use generator::{generate_assessment_plan, GenerateOptions};
pub use results::{generate_assessment_results, ResultsOptions};
