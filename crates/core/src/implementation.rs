//! Borrowed views over the two control-implementation flavors.
//!
//! Component definitions carry `ControlImplementationSet` (with a source
//! and optional framework property); system security plans carry a single
//! `SystemControlImplementation`. Settings construction reads both through
//! the same view.

use crate::schema::{
    ControlImplementationSet, ImplementedRequirement, Property, SetParameter, Statement,
    SystemControlImplementation, SystemImplementedRequirement, SystemStatement,
};

/// Either flavor of control implementation.
#[derive(Debug, Clone, Copy)]
pub enum ControlImplementation<'a> {
    Definition(&'a ControlImplementationSet),
    System(&'a SystemControlImplementation),
}

impl<'a> ControlImplementation<'a> {
    /// Catalog source reference. Only the definition flavor carries one.
    pub fn source(&self) -> Option<&'a str> {
        match self {
            ControlImplementation::Definition(implementation) => {
                Some(implementation.source.as_str())
            }
            ControlImplementation::System(_) => None,
        }
    }

    pub fn props(&self) -> &'a [Property] {
        match self {
            ControlImplementation::Definition(implementation) => {
                implementation.props.as_deref().unwrap_or(&[])
            }
            ControlImplementation::System(_) => &[],
        }
    }

    pub fn set_parameters(&self) -> &'a [SetParameter] {
        let parameters = match self {
            ControlImplementation::Definition(implementation) => &implementation.set_parameters,
            ControlImplementation::System(implementation) => &implementation.set_parameters,
        };
        parameters.as_deref().unwrap_or(&[])
    }

    pub fn requirements(&self) -> Vec<RequirementView<'a>> {
        match self {
            ControlImplementation::Definition(implementation) => implementation
                .implemented_requirements
                .iter()
                .map(RequirementView::Definition)
                .collect(),
            ControlImplementation::System(implementation) => implementation
                .implemented_requirements
                .iter()
                .map(RequirementView::System)
                .collect(),
        }
    }
}

impl<'a> From<&'a ControlImplementationSet> for ControlImplementation<'a> {
    fn from(implementation: &'a ControlImplementationSet) -> Self {
        ControlImplementation::Definition(implementation)
    }
}

impl<'a> From<&'a SystemControlImplementation> for ControlImplementation<'a> {
    fn from(implementation: &'a SystemControlImplementation) -> Self {
        ControlImplementation::System(implementation)
    }
}

/// Either flavor of implemented requirement.
#[derive(Debug, Clone, Copy)]
pub enum RequirementView<'a> {
    Definition(&'a ImplementedRequirement),
    System(&'a SystemImplementedRequirement),
}

impl<'a> RequirementView<'a> {
    pub fn control_id(&self) -> &'a str {
        match self {
            RequirementView::Definition(requirement) => &requirement.control_id,
            RequirementView::System(requirement) => &requirement.control_id,
        }
    }

    pub fn props(&self) -> &'a [Property] {
        let props = match self {
            RequirementView::Definition(requirement) => &requirement.props,
            RequirementView::System(requirement) => &requirement.props,
        };
        props.as_deref().unwrap_or(&[])
    }

    pub fn set_parameters(&self) -> &'a [SetParameter] {
        let parameters = match self {
            RequirementView::Definition(requirement) => &requirement.set_parameters,
            RequirementView::System(requirement) => &requirement.set_parameters,
        };
        parameters.as_deref().unwrap_or(&[])
    }

    pub fn statements(&self) -> Vec<StatementView<'a>> {
        match self {
            RequirementView::Definition(requirement) => requirement
                .statements
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .map(StatementView::Definition)
                .collect(),
            RequirementView::System(requirement) => requirement
                .statements
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .map(StatementView::System)
                .collect(),
        }
    }
}

/// Either flavor of statement.
#[derive(Debug, Clone, Copy)]
pub enum StatementView<'a> {
    Definition(&'a Statement),
    System(&'a SystemStatement),
}

impl<'a> StatementView<'a> {
    pub fn statement_id(&self) -> &'a str {
        match self {
            StatementView::Definition(statement) => &statement.statement_id,
            StatementView::System(statement) => &statement.statement_id,
        }
    }

    pub fn props(&self) -> &'a [Property] {
        let props = match self {
            StatementView::Definition(statement) => &statement.props,
            StatementView::System(statement) => &statement.props,
        };
        props.as_deref().unwrap_or(&[])
    }
}
