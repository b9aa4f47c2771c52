//! Assessment plan generation.
//!
//! Combines a component list with resolved implementation settings: the
//! components are indexed into a fresh rule store, every non-validation
//! component is resolved to its applied rule sets, and each applied rule
//! becomes one activity under a single generated assessment task.
//! Validation components become assessment assets instead.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use attest_core::defaults::{
    ASSESSMENT_TASK_TITLE, DEFAULT_SUBJECT_TYPE, DEFAULT_TASK_TYPE, DEFAULT_VERSION, OSCAL_VERSION,
    REPLACE_ME,
};
use attest_core::schema::{
    Activity, AssessmentAssets, AssessmentPlan, AssessmentPlatform, AssessmentSubject,
    AssociatedActivity, ControlSelection, ImportSsp, LocalDefinitions, Metadata, ReviewedControls,
    SelectControlById, SelectSubjectById, Step, Task, UsesComponent,
};
use attest_core::util::none_if_empty;
use attest_core::Component;
use attest_rules::extension::{extension_property, METHOD_PROP, METHOD_TEST, TEST_PARAMETER_CLASS};
use attest_rules::{MemoryStore, RuleSet};
use attest_settings::{apply_to_component, ImplementationSettings};

use crate::error::{PlanError, Result};

/// Description stamped on the generated assessment task.
const TASK_DESCRIPTION: &str = "Evaluation of defined rules for applicable components.";

/// Caller-tunable fields of a generated plan.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    title: String,
    import_href: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            title: REPLACE_ME.to_string(),
            import_href: REPLACE_ME.to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the plan's metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the href of the imported system security plan.
    pub fn with_import_href(mut self, href: impl Into<String>) -> Self {
        self.import_href = href.into();
        self
    }
}

/// Generate an assessment plan for a set of components under the given
/// implementation settings.
///
/// Every non-validation component must resolve to at least one applied
/// rule; the first component that resolves to none aborts the whole
/// generation. Callers wanting a partial plan must pre-filter their
/// component list.
pub fn generate_assessment_plan(
    components: &[Component],
    implementation: &ImplementationSettings,
    options: GenerateOptions,
) -> Result<AssessmentPlan> {
    let mut store = MemoryStore::new();
    store.index_all(components)?;

    let mut activities = Vec::new();
    let mut associated_activities = Vec::new();
    let mut subject_selectors = Vec::new();

    for component in components {
        if component.is_validation() {
            continue;
        }
        let applied = apply_to_component(component.title(), &store, implementation.all_settings())
            .map_err(|source| PlanError::ComponentResolution {
                component: component.title().to_string(),
                source,
            })?;

        let selector = SelectSubjectById {
            subject_uuid: component.uuid().to_string(),
            subject_type: DEFAULT_SUBJECT_TYPE.to_string(),
        };
        let subject = AssessmentSubject {
            subject_type: DEFAULT_SUBJECT_TYPE.to_string(),
            description: None,
            include_subjects: Some(vec![selector.clone()]),
        };
        subject_selectors.push(selector);

        for rule_set in &applied {
            let activity = rule_activity(rule_set, implementation)?;
            associated_activities.push(AssociatedActivity {
                activity_uuid: activity.uuid.clone(),
                subjects: vec![subject.clone()],
            });
            activities.push(activity);
        }
    }

    let task = Task {
        uuid: new_id(),
        task_type: DEFAULT_TASK_TYPE.to_string(),
        title: ASSESSMENT_TASK_TITLE.to_string(),
        description: Some(TASK_DESCRIPTION.to_string()),
        associated_activities: none_if_empty(associated_activities),
    };

    info!(
        activities = activities.len(),
        title = %options.title,
        "generated assessment plan"
    );

    Ok(AssessmentPlan {
        uuid: new_id(),
        metadata: generated_metadata(options.title),
        import_ssp: ImportSsp {
            href: options.import_href,
        },
        local_definitions: Some(LocalDefinitions {
            activities: none_if_empty(activities),
        }),
        reviewed_controls: all_reviewed_controls(implementation),
        assessment_subjects: Some(vec![AssessmentSubject {
            subject_type: DEFAULT_SUBJECT_TYPE.to_string(),
            description: None,
            include_subjects: none_if_empty(subject_selectors),
        }]),
        assessment_assets: Some(assessment_assets(components)),
        tasks: Some(vec![task]),
    })
}

/// Build the activity assessing one applied rule: a step per check, the
/// assessment method, and the resolved parameter value when one exists.
fn rule_activity(rule_set: &RuleSet, implementation: &ImplementationSettings) -> Result<Activity> {
    let mut props = vec![extension_property(METHOD_PROP, METHOD_TEST)];
    if let Some(parameter) = &rule_set.rule.parameter {
        if let Some(value) = &parameter.value {
            let mut parameter_prop = extension_property(&parameter.id, value);
            parameter_prop.class = Some(TEST_PARAMETER_CLASS.to_string());
            props.push(parameter_prop);
        }
    }

    let steps = rule_set
        .checks
        .iter()
        .map(|check| Step {
            uuid: new_id(),
            title: Some(check.id.clone()),
            description: check.description.clone(),
            props: None,
        })
        .collect();

    let include_controls = implementation
        .applicable_controls(&rule_set.rule.id)?
        .into_iter()
        .map(|control_id| SelectControlById { control_id })
        .collect();

    Ok(Activity {
        uuid: new_id(),
        title: Some(rule_set.rule.id.clone()),
        description: rule_set.rule.description.clone(),
        props: Some(props),
        steps: none_if_empty(steps),
        related_controls: Some(ReviewedControls {
            description: None,
            control_selections: vec![ControlSelection {
                description: None,
                include_controls: none_if_empty(include_controls),
            }],
        }),
    })
}

/// Every control materialized in the settings, as a single selection.
fn all_reviewed_controls(implementation: &ImplementationSettings) -> ReviewedControls {
    let include_controls = implementation
        .all_controls()
        .into_iter()
        .map(|control_id| SelectControlById { control_id })
        .collect();
    ReviewedControls {
        description: None,
        control_selections: vec![ControlSelection {
            description: None,
            include_controls: none_if_empty(include_controls),
        }],
    }
}

/// Project validation components into assessment assets, all used by one
/// generated assessment platform.
fn assessment_assets(components: &[Component]) -> AssessmentAssets {
    let mut system_components = Vec::new();
    let mut uses_components = Vec::new();
    for component in components {
        if component.is_validation() {
            let system_component = component.as_system();
            uses_components.push(UsesComponent {
                component_uuid: system_component.uuid.clone(),
            });
            system_components.push(system_component);
        }
    }
    AssessmentAssets {
        components: none_if_empty(system_components),
        assessment_platforms: vec![AssessmentPlatform {
            uuid: new_id(),
            title: Some(REPLACE_ME.to_string()),
            uses_components: none_if_empty(uses_components),
        }],
    }
}

/// Metadata stamped on every generated document.
pub(crate) fn generated_metadata(title: String) -> Metadata {
    Metadata {
        title,
        last_modified: Utc::now(),
        version: DEFAULT_VERSION.to_string(),
        oscal_version: OSCAL_VERSION.to_string(),
    }
}

/// Mint an identifier for a generated entity.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
