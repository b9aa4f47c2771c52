//! Error types for rule-store indexing and queries.

use thiserror::Error;

use crate::extension::RuleSet;

/// Failures raised by rule-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Indexing was invoked with no components.
    #[error("no components to index")]
    NoComponents,

    #[error("rule {0:?} not found")]
    RuleNotFound(String),

    #[error("no rule found for check {0:?}")]
    CheckNotFound(String),

    #[error("no rules indexed for component {0:?}")]
    ComponentNotFound(String),

    /// Some of a component's recorded rules failed to resolve. Carries
    /// the rule sets that did resolve alongside the per-rule failures.
    #[error("failed to resolve rules for component {component:?}: {}", format_causes(.errors))]
    Partial {
        component: String,
        rule_sets: Vec<RuleSet>,
        errors: Vec<StoreError>,
    },
}

fn format_causes(errors: &[StoreError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
