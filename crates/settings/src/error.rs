//! Error types for settings resolution.

use thiserror::Error;

use attest_rules::StoreError;

/// Failures raised while building or applying settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("control {0:?} not found in settings")]
    ControlNotFound(String),

    #[error("rule {0:?} is not mapped to any control")]
    RuleNotMapped(String),

    #[error("framework {0:?} not found in control implementations")]
    FrameworkNotFound(String),

    /// A component resolved no rules that the settings select.
    #[error("no rules found with criteria for component {0:?}")]
    NoApplicableRules(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
