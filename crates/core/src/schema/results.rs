//! Assessment results documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Metadata, Property};
use super::plan::{AssessmentSubject, ReviewedControls};

/// An assessment results document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AssessmentResults {
    pub uuid: String,
    pub metadata: Metadata,
    pub import_ap: ImportAp,
    pub results: Vec<ResultEntry>,
}

/// Reference back to the plan the results were produced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ImportAp {
    pub href: String,
}

/// Outcome of one assessment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ResultEntry {
    pub uuid: String,
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    pub reviewed_controls: ReviewedControls,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<Vec<Observation>>,
}

/// Evidence collected for one check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Observation {
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    pub methods: Vec<String>,
    pub collected: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origins: Option<Vec<Origin>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<SubjectReference>>,
}

/// Where an observation came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Origin {
    pub actors: Vec<OriginActor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_tasks: Option<Vec<RelatedTask>>,
}

/// The actor that produced an observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OriginActor {
    pub actor_uuid: String,
    #[serde(rename = "type")]
    pub actor_type: String,
}

/// The task an observation was collected under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RelatedTask {
    pub task_uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<AssessmentSubject>>,
}

/// A subject an observation applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SubjectReference {
    pub subject_uuid: String,
    #[serde(rename = "type")]
    pub subject_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
