//! Error types for plan and results generation.

use thiserror::Error;

use attest_rules::StoreError;
use attest_settings::SettingsError;

/// Failures raised while generating plans or results.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A component's rules could not be resolved; generation aborts on
    /// the first such component.
    #[error("failed to resolve rules for component {component:?}: {source}")]
    ComponentResolution {
        component: String,
        #[source]
        source: SettingsError,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Results were requested for a plan that schedules no tasks.
    #[error("assessment plan has no tasks")]
    NoTasks,
}

/// Result alias for generation.
pub type Result<T> = std::result::Result<T, PlanError>;
