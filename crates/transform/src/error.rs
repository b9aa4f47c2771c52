//! Error types for document transforms.

use thiserror::Error;

use attest_plans::PlanError;
use attest_settings::SettingsError;

/// Failures raised while transforming whole documents.
#[derive(Debug, Error)]
pub enum TransformError {
    /// No control implementation matched the requested framework.
    #[error("cannot transform definitions for framework {framework:?}: {source}")]
    Framework {
        framework: String,
        #[source]
        source: SettingsError,
    },

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Result alias for transforms.
pub type Result<T> = std::result::Result<T, TransformError>;
