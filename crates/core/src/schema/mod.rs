//! Typed document structs, kebab-case JSON with strict field checking.
//!
//! Covers the subset of the assessment document family this workspace
//! reads and writes: component definitions, system security plans,
//! assessment plans, and assessment results.

mod common;
mod component;
mod document;
mod plan;
mod results;
mod ssp;

#[cfg(test)]
mod tests;

pub use common::{Link, Metadata, Property, SetParameter};
pub use component::{
    ComponentDefinition, ComponentType, ControlImplementationSet, DefinedComponent,
    ImplementedRequirement, Statement,
};
pub use document::Document;
pub use plan::{
    Activity, AssessmentAssets, AssessmentPlan, AssessmentPlatform, AssessmentSubject,
    AssociatedActivity, ControlSelection, ImportSsp, LocalDefinitions, ReviewedControls,
    SelectControlById, SelectSubjectById, Step, Task, UsesComponent,
};
pub use results::{
    AssessmentResults, ImportAp, Observation, Origin, OriginActor, RelatedTask, ResultEntry,
    SubjectReference,
};
pub use ssp::{
    ComponentStatus, ImportProfile, SystemComponent, SystemControlImplementation,
    SystemImplementation, SystemImplementedRequirement, SystemSecurityPlan, SystemStatement,
};
