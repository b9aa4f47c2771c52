//! Document validation.
//!
//! Validators run over a decoded [`Document`] before it is handed to the
//! indexing and generation layers. The duplicate-id validator walks the
//! known schema explicitly, one arm per document kind.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::schema::Document;

/// Failures raised by document validators.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The same identifier appears on more than one object.
    #[error("duplicate ids in {kind}: {}", .ids.join(", "))]
    DuplicateIds { kind: &'static str, ids: Vec<String> },

    /// Several validators failed.
    #[error("{}", format_failures(.0))]
    Multiple(Vec<ValidationError>),
}

fn format_failures(failures: &[ValidationError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A document-level validation rule.
pub trait Validator {
    fn validate(&self, document: &Document) -> Result<(), ValidationError>;
}

/// Accepts every document.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopValidator;

impl Validator for NoopValidator {
    fn validate(&self, _document: &Document) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Rejects documents in which any `uuid` value appears more than once.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateIdValidator;

impl Validator for DuplicateIdValidator {
    fn validate(&self, document: &Document) -> Result<(), ValidationError> {
        let ids = collect_ids(document);
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for id in ids {
            *counts.entry(id).or_insert(0) += 1;
        }
        let duplicates: Vec<String> = counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(id, _)| (*id).to_string())
            .collect();
        if duplicates.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::DuplicateIds {
                kind: document.kind(),
                ids: duplicates,
            })
        }
    }
}

/// Run every validator, joining all failures into one error.
pub fn validate_all(
    validators: &[&dyn Validator],
    document: &Document,
) -> Result<(), ValidationError> {
    let mut failures = Vec::new();
    for validator in validators {
        if let Err(failure) = validator.validate(document) {
            failures.push(failure);
        }
    }
    debug!(
        kind = document.kind(),
        validators = validators.len(),
        failures = failures.len(),
        "validated document"
    );
    match failures.len() {
        0 => Ok(()),
        1 => Err(failures.remove(0)),
        _ => Err(ValidationError::Multiple(failures)),
    }
}

/// Every `uuid` value in the document, in declaration order.
fn collect_ids(document: &Document) -> Vec<&str> {
    let mut ids = Vec::new();
    match document {
        Document::ComponentDefinition(definition) => {
            ids.push(definition.uuid.as_str());
            for component in definition.components.as_deref().unwrap_or(&[]) {
                ids.push(component.uuid.as_str());
                for implementation in component.control_implementations.as_deref().unwrap_or(&[]) {
                    ids.push(implementation.uuid.as_str());
                    for requirement in &implementation.implemented_requirements {
                        ids.push(requirement.uuid.as_str());
                        for statement in requirement.statements.as_deref().unwrap_or(&[]) {
                            ids.push(statement.uuid.as_str());
                        }
                    }
                }
            }
        }
        Document::SystemSecurityPlan(plan) => {
            ids.push(plan.uuid.as_str());
            for component in &plan.system_implementation.components {
                ids.push(component.uuid.as_str());
            }
            for requirement in &plan.control_implementation.implemented_requirements {
                ids.push(requirement.uuid.as_str());
                for statement in requirement.statements.as_deref().unwrap_or(&[]) {
                    ids.push(statement.uuid.as_str());
                }
            }
        }
        Document::AssessmentPlan(plan) => {
            ids.push(plan.uuid.as_str());
            let activities = plan
                .local_definitions
                .as_ref()
                .and_then(|definitions| definitions.activities.as_deref())
                .unwrap_or(&[]);
            for activity in activities {
                ids.push(activity.uuid.as_str());
                for step in activity.steps.as_deref().unwrap_or(&[]) {
                    ids.push(step.uuid.as_str());
                }
            }
            if let Some(assets) = &plan.assessment_assets {
                for component in assets.components.as_deref().unwrap_or(&[]) {
                    ids.push(component.uuid.as_str());
                }
                for platform in &assets.assessment_platforms {
                    ids.push(platform.uuid.as_str());
                }
            }
            for task in plan.tasks.as_deref().unwrap_or(&[]) {
                ids.push(task.uuid.as_str());
            }
        }
        Document::AssessmentResults(results) => {
            ids.push(results.uuid.as_str());
            for result in &results.results {
                ids.push(result.uuid.as_str());
                for observation in result.observations.as_deref().unwrap_or(&[]) {
                    ids.push(observation.uuid.as_str());
                }
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::schema::{ComponentDefinition, ComponentType, DefinedComponent, Metadata};

    fn definition_with_component_uuid(uuid: &str) -> Document {
        Document::ComponentDefinition(ComponentDefinition {
            uuid: "38d18f24-ba25-4ba3-a3a0-0331aba45d24".into(),
            metadata: Metadata {
                title: "validation fixture".into(),
                last_modified: Utc::now(),
                version: "0.1.0".into(),
                oscal_version: "1.1.2".into(),
            },
            components: Some(vec![DefinedComponent {
                uuid: uuid.into(),
                component_type: ComponentType::Service,
                title: "svc".into(),
                description: "svc".into(),
                purpose: None,
                props: None,
                links: None,
                control_implementations: None,
            }]),
        })
    }

    #[test]
    fn unique_ids_pass() {
        let document = definition_with_component_uuid("c4b2e9c9-d0f2-4bb1-a82a-a9b5b3f64cbb");
        assert!(DuplicateIdValidator.validate(&document).is_ok());
    }

    #[test]
    fn repeated_ids_are_reported() {
        let document = definition_with_component_uuid("38d18f24-ba25-4ba3-a3a0-0331aba45d24");
        let err = DuplicateIdValidator.validate(&document).unwrap_err();
        match err {
            ValidationError::DuplicateIds { kind, ids } => {
                assert_eq!(kind, "component-definition");
                assert_eq!(ids, vec!["38d18f24-ba25-4ba3-a3a0-0331aba45d24"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn noop_accepts_anything() {
        let document = definition_with_component_uuid("38d18f24-ba25-4ba3-a3a0-0331aba45d24");
        assert!(NoopValidator.validate(&document).is_ok());
    }

    #[test]
    fn validate_all_joins_failures() {
        let document = definition_with_component_uuid("38d18f24-ba25-4ba3-a3a0-0331aba45d24");
        let validators: [&dyn Validator; 3] =
            [&NoopValidator, &DuplicateIdValidator, &DuplicateIdValidator];
        let err = validate_all(&validators, &document).unwrap_err();
        assert!(matches!(err, ValidationError::Multiple(failures) if failures.len() == 2));
    }
}
