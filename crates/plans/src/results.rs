//! Assessment results generation from an assessment plan.
//!
//! Each plan task becomes one result entry: its activities' control
//! selections are carried over and every distinct check across the
//! activities' steps becomes an observation. Callers can supply their own
//! observations, matched to checks by the assessment-check-id prop or by
//! title; unmatched ones are dropped.

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{debug, info};

use attest_core::defaults::{DEFAULT_ACTOR_TYPE, OBSERVATION_METHOD, REPLACE_ME};
use attest_core::schema::{
    Activity, AssessmentPlan, AssessmentResults, ImportAp, Observation, Origin, OriginActor,
    RelatedTask, ResultEntry, ReviewedControls, Step, Task,
};
use attest_core::util::none_if_empty;
use attest_rules::extension::{in_extension_ns, ASSESSMENT_CHECK_ID_PROP};

use crate::error::{PlanError, Result};
use crate::generator::{generated_metadata, new_id};

/// Caller-tunable fields of generated results.
#[derive(Debug, Clone)]
pub struct ResultsOptions {
    title: String,
    import_href: String,
    observations: Vec<Observation>,
}

impl Default for ResultsOptions {
    fn default() -> Self {
        Self {
            title: REPLACE_ME.to_string(),
            import_href: REPLACE_ME.to_string(),
            observations: Vec::new(),
        }
    }
}

impl ResultsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the results' metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the href of the imported assessment plan.
    pub fn with_import_href(mut self, href: impl Into<String>) -> Self {
        self.import_href = href.into();
        self
    }

    /// Supplies collected observations to use in place of generated ones
    /// where they match a check.
    pub fn with_observations(mut self, observations: Vec<Observation>) -> Self {
        self.observations = observations;
        self
    }
}

/// Generate assessment results skeletons for every task in a plan.
pub fn generate_assessment_results(
    plan: &AssessmentPlan,
    options: ResultsOptions,
) -> Result<AssessmentResults> {
    let tasks = plan
        .tasks
        .as_deref()
        .filter(|tasks| !tasks.is_empty())
        .ok_or(PlanError::NoTasks)?;

    let activities = activities_by_uuid(plan);
    let platform_uuid = plan
        .assessment_assets
        .as_ref()
        .and_then(|assets| assets.assessment_platforms.first())
        .map(|platform| platform.uuid.as_str());

    let results = tasks
        .iter()
        .map(|task| result_for_task(task, &activities, platform_uuid, &options.observations))
        .collect();

    info!(results = tasks.len(), "generated assessment results");

    Ok(AssessmentResults {
        uuid: new_id(),
        metadata: generated_metadata(options.title),
        import_ap: ImportAp {
            href: options.import_href,
        },
        results,
    })
}

fn activities_by_uuid(plan: &AssessmentPlan) -> IndexMap<&str, &Activity> {
    plan.local_definitions
        .as_ref()
        .and_then(|defs| defs.activities.as_deref())
        .unwrap_or(&[])
        .iter()
        .map(|activity| (activity.uuid.as_str(), activity))
        .collect()
}

/// Build the result entry for one task: concatenated control selections
/// and one observation per distinct check, in first-seen order.
fn result_for_task(
    task: &Task,
    activities: &IndexMap<&str, &Activity>,
    platform_uuid: Option<&str>,
    user_observations: &[Observation],
) -> ResultEntry {
    let mut control_selections = Vec::new();
    let mut observations: IndexMap<String, Observation> = IndexMap::new();

    for associated in task.associated_activities.as_deref().unwrap_or(&[]) {
        let Some(activity) = activities.get(associated.activity_uuid.as_str()) else {
            debug!(
                activity = %associated.activity_uuid,
                "task references an activity missing from local definitions"
            );
            continue;
        };
        if let Some(related) = &activity.related_controls {
            control_selections.extend(related.control_selections.iter().cloned());
        }
        for step in activity.steps.as_deref().unwrap_or(&[]) {
            let Some(check_id) = step.title.as_deref() else {
                continue;
            };
            if observations.contains_key(check_id) {
                continue;
            }
            let mut observation = observation_for_check(check_id, step, user_observations);
            if let Some(platform_uuid) = platform_uuid {
                observation.origins = Some(vec![Origin {
                    actors: vec![OriginActor {
                        actor_uuid: platform_uuid.to_string(),
                        actor_type: DEFAULT_ACTOR_TYPE.to_string(),
                    }],
                    related_tasks: Some(vec![RelatedTask {
                        task_uuid: task.uuid.clone(),
                        subjects: none_if_empty(associated.subjects.clone()),
                    }]),
                }]);
            }
            observations.insert(check_id.to_string(), observation);
        }
    }

    ResultEntry {
        uuid: new_id(),
        title: format!("Result For Task {:?}", task.title),
        description: format!("Assessment Result For Task {:?}", task.title),
        start: Utc::now(),
        end: None,
        reviewed_controls: ReviewedControls {
            description: None,
            control_selections,
        },
        observations: none_if_empty(observations.into_values().collect()),
    }
}

/// A caller observation matching the check, or a fresh automated one.
fn observation_for_check(
    check_id: &str,
    step: &Step,
    user_observations: &[Observation],
) -> Observation {
    let matched = user_observations.iter().find(|observation| {
        names_check(observation, check_id) || observation.title.as_deref() == Some(check_id)
    });
    match matched {
        Some(observation) => observation.clone(),
        None => Observation {
            uuid: new_id(),
            title: Some(check_id.to_string()),
            description: step.description.clone(),
            methods: vec![OBSERVATION_METHOD.to_string()],
            collected: Utc::now(),
            expires: None,
            props: None,
            origins: None,
            subjects: None,
        },
    }
}

/// Whether an observation carries an assessment-check-id prop naming the
/// check.
fn names_check(observation: &Observation, check_id: &str) -> bool {
    observation
        .props
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .any(|prop| {
            prop.name == ASSESSMENT_CHECK_ID_PROP && in_extension_ns(prop) && prop.value == check_id
        })
}
