//! System security plan documents (the subset feeding plan generation).

use serde::{Deserialize, Serialize};

use super::common::{Link, Metadata, Property, SetParameter};
use super::component::ComponentType;

/// A system security plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemSecurityPlan {
    pub uuid: String,
    pub metadata: Metadata,
    pub import_profile: ImportProfile,
    pub system_implementation: SystemImplementation,
    pub control_implementation: SystemControlImplementation,
}

/// Reference to the profile the plan was resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ImportProfile {
    pub href: String,
}

/// The components that make up the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemImplementation {
    pub components: Vec<SystemComponent>,
}

/// A component deployed in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemComponent {
    pub uuid: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    pub status: ComponentStatus,
}

/// Operational status of a system component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ComponentStatus {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// How the system satisfies its controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemControlImplementation {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_parameters: Option<Vec<SetParameter>>,
    pub implemented_requirements: Vec<SystemImplementedRequirement>,
}

/// System-level implementation of a single control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemImplementedRequirement {
    pub uuid: String,
    pub control_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_parameters: Option<Vec<SetParameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statements: Option<Vec<SystemStatement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// System-level implementation detail scoped to one statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemStatement {
    pub statement_id: String,
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_parameters: Option<Vec<SetParameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}
