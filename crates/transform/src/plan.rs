//! Document-to-plan transforms.
//!
//! These assemble the generator inputs from whole documents: pick the
//! components that matter, gather their control implementations, resolve
//! the framework, and hand off to plan generation.

use tracing::debug;

use attest_core::schema::{
    AssessmentPlan, ComponentDefinition, ComponentType, ControlImplementationSet,
    SystemSecurityPlan,
};
use attest_core::{Component, ControlImplementation};
use attest_plans::{generate_assessment_plan, GenerateOptions};
use attest_settings::{framework, ImplementationSettings};

use crate::error::{Result, TransformError};

/// Transform one or more component definitions into an assessment plan
/// scoped to the named framework.
///
/// Components carrying control implementations or typed as validation
/// are kept; everything else is ignored.
pub fn component_definitions_to_assessment_plan(
    definitions: &[ComponentDefinition],
    framework_name: &str,
) -> Result<AssessmentPlan> {
    let mut components = Vec::new();
    let mut implementations: Vec<ControlImplementationSet> = Vec::new();
    for definition in definitions {
        for defined in definition.components.as_deref().unwrap_or(&[]) {
            if defined.control_implementations.is_none()
                && defined.component_type != ComponentType::Validation
            {
                continue;
            }
            if let Some(sets) = &defined.control_implementations {
                implementations.extend(sets.iter().cloned());
            }
            components.push(Component::from(defined.clone()));
        }
    }
    debug!(
        definitions = definitions.len(),
        components = components.len(),
        implementations = implementations.len(),
        "collected plan inputs from component definitions"
    );

    let settings =
        framework(framework_name, &implementations).map_err(|source| TransformError::Framework {
            framework: framework_name.to_string(),
            source,
        })?;
    let plan = generate_assessment_plan(&components, &settings, GenerateOptions::default())?;
    Ok(plan)
}

/// Transform a system security plan into an assessment plan over its
/// system components.
pub fn ssp_to_assessment_plan(
    ssp: &SystemSecurityPlan,
    import_href: &str,
) -> Result<AssessmentPlan> {
    let components: Vec<Component> = ssp
        .system_implementation
        .components
        .iter()
        .map(|component| Component::from(component.clone()))
        .collect();
    let settings =
        ImplementationSettings::new(ControlImplementation::from(&ssp.control_implementation));
    let options = GenerateOptions::new().with_import_href(import_href);
    let plan = generate_assessment_plan(&components, &settings, options)?;
    Ok(plan)
}
