//! Plan-to-results transform.

use attest_core::schema::{AssessmentPlan, AssessmentResults};
use attest_plans::{generate_assessment_results, ResultsOptions};

use crate::error::Result;

/// Transform an assessment plan into assessment results, one result per
/// plan task.
pub fn assessment_plan_to_assessment_results(
    plan: &AssessmentPlan,
    options: ResultsOptions,
) -> Result<AssessmentResults> {
    let results = generate_assessment_results(plan, options)?;
    Ok(results)
}
