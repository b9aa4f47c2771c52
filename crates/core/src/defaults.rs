//! Values stamped into generated documents.

/// Schema version written to generated metadata.
pub const OSCAL_VERSION: &str = "1.1.2";

/// Document version written to generated metadata.
pub const DEFAULT_VERSION: &str = "0.1.0";

/// Placeholder for required fields the caller is expected to fill in.
pub const REPLACE_ME: &str = "REPLACE_ME";

/// Subject type for generated assessment subjects.
pub const DEFAULT_SUBJECT_TYPE: &str = "component";

/// Task type for the generated assessment task.
pub const DEFAULT_TASK_TYPE: &str = "action";

/// Actor type recorded on observation origins.
pub const DEFAULT_ACTOR_TYPE: &str = "assessment-platform";

/// Title of the single generated assessment task.
pub const ASSESSMENT_TASK_TITLE: &str = "Automated Assessment";

/// Method recorded on generated observations.
pub const OBSERVATION_METHOD: &str = "AUTOMATED";
