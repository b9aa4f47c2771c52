//! Settings resolution over indexed rules.
//!
//! This crate provides:
//! - `Settings`: a rule selection plus parameter overrides for one scope
//! - `ImplementationSettings`: per-control and aggregate settings built
//!   from control implementations, with incremental merge
//! - Framework selection by short name (property or source path)
//! - `apply_to_component`: store lookup filtered and tuned by settings

pub mod error;
pub mod framework;
pub mod implementation;
pub mod settings;

pub use error::SettingsError;
pub use framework::{framework, framework_short_name};
pub use implementation::ImplementationSettings;
pub use settings::{apply_to_component, Settings};
