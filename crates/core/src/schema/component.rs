//! Component definition documents.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::common::{Link, Metadata, Property, SetParameter};

/// Closed set of component type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Software,
    Hardware,
    Service,
    Interconnection,
    Policy,
    Process,
    Procedure,
    Plan,
    Guidance,
    Standard,
    /// Check provider. Validation components contribute checks and are
    /// projected into assessment assets rather than assessed directly.
    Validation,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Software => "software",
            ComponentType::Hardware => "hardware",
            ComponentType::Service => "service",
            ComponentType::Interconnection => "interconnection",
            ComponentType::Policy => "policy",
            ComponentType::Process => "process",
            ComponentType::Procedure => "procedure",
            ComponentType::Plan => "plan",
            ComponentType::Guidance => "guidance",
            ComponentType::Standard => "standard",
            ComponentType::Validation => "validation",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component definition document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ComponentDefinition {
    pub uuid: String,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<DefinedComponent>>,
}

/// A component as described by a component definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DefinedComponent {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_implementations: Option<Vec<ControlImplementationSet>>,
}

/// Requirements a component claims to satisfy against one catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ControlImplementationSet {
    pub uuid: String,
    /// Reference to the catalog or profile the control ids resolve against.
    pub source: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_parameters: Option<Vec<SetParameter>>,
    pub implemented_requirements: Vec<ImplementedRequirement>,
}

/// Claimed implementation of a single control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ImplementedRequirement {
    pub uuid: String,
    pub control_id: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_parameters: Option<Vec<SetParameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statements: Option<Vec<Statement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Implementation detail scoped to one statement of a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Statement {
    pub statement_id: String,
    pub uuid: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}
