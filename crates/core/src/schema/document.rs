//! The single-key document envelope.

use serde::{Deserialize, Serialize};

use super::component::ComponentDefinition;
use super::plan::AssessmentPlan;
use super::results::AssessmentResults;
use super::ssp::SystemSecurityPlan;

/// Top-level envelope: exactly one model, keyed by its kind.
///
/// Serializes as `{"component-definition": {...}}` and so on; an
/// unrecognized key fails decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Document {
    ComponentDefinition(ComponentDefinition),
    SystemSecurityPlan(SystemSecurityPlan),
    AssessmentPlan(AssessmentPlan),
    AssessmentResults(AssessmentResults),
}

impl Document {
    /// The envelope key of this document.
    pub fn kind(&self) -> &'static str {
        match self {
            Document::ComponentDefinition(_) => "component-definition",
            Document::SystemSecurityPlan(_) => "system-security-plan",
            Document::AssessmentPlan(_) => "assessment-plan",
            Document::AssessmentResults(_) => "assessment-results",
        }
    }
}
