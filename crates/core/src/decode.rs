//! Strict JSON decoding entry points.
//!
//! Every decoder rejects unknown fields, so documents written against a
//! newer or looser schema fail loudly instead of dropping data.

use std::io::Read;

use tracing::debug;

use crate::error::{CoreError, Result};
use crate::schema::{
    AssessmentPlan, AssessmentResults, ComponentDefinition, Document, SystemSecurityPlan,
};

/// Decode a document envelope from a reader.
pub fn from_json_reader<R: Read>(reader: R) -> Result<Document> {
    let document: Document = serde_json::from_reader(reader).map_err(|source| {
        CoreError::Decode {
            kind: "document",
            source,
        }
    })?;
    debug!(kind = document.kind(), "decoded document");
    Ok(document)
}

/// Decode a document envelope from a string.
pub fn from_json_str(json: &str) -> Result<Document> {
    from_json_reader(json.as_bytes())
}

/// Decode a component definition, rejecting other document kinds.
pub fn component_definition_from_json(json: &str) -> Result<ComponentDefinition> {
    match from_json_str(json)? {
        Document::ComponentDefinition(definition) => Ok(definition),
        other => Err(CoreError::WrongKind {
            expected: "component-definition",
            found: other.kind(),
        }),
    }
}

/// Decode a system security plan, rejecting other document kinds.
pub fn ssp_from_json(json: &str) -> Result<SystemSecurityPlan> {
    match from_json_str(json)? {
        Document::SystemSecurityPlan(plan) => Ok(plan),
        other => Err(CoreError::WrongKind {
            expected: "system-security-plan",
            found: other.kind(),
        }),
    }
}

/// Decode an assessment plan, rejecting other document kinds.
pub fn assessment_plan_from_json(json: &str) -> Result<AssessmentPlan> {
    match from_json_str(json)? {
        Document::AssessmentPlan(plan) => Ok(plan),
        other => Err(CoreError::WrongKind {
            expected: "assessment-plan",
            found: other.kind(),
        }),
    }
}

/// Decode assessment results, rejecting other document kinds.
pub fn assessment_results_from_json(json: &str) -> Result<AssessmentResults> {
    match from_json_str(json)? {
        Document::AssessmentResults(results) => Ok(results),
        other => Err(CoreError::WrongKind {
            expected: "assessment-results",
            found: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_DEFINITION: &str = r#"{
      "component-definition": {
        "uuid": "d63576a2-6865-4f8f-b2a9-6a3f4a458a6b",
        "metadata": {
          "title": "Test definition",
          "last-modified": "2024-03-01T12:00:00Z",
          "version": "0.1.0",
          "oscal-version": "1.1.2"
        }
      }
    }"#;

    #[test]
    fn decodes_component_definition() {
        let definition = component_definition_from_json(MINIMAL_DEFINITION)
            .unwrap_or_else(|err| panic!("decode failed: {err}"));
        assert_eq!(definition.metadata.title, "Test definition");
        assert!(definition.components.is_none());
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let err = ssp_from_json(MINIMAL_DEFINITION).unwrap_err();
        assert!(matches!(
            err,
            CoreError::WrongKind {
                expected: "system-security-plan",
                found: "component-definition",
            }
        ));
    }

    #[test]
    fn unknown_fields_fail_decoding() {
        let json = MINIMAL_DEFINITION.replace("\"version\"", "\"mystery\": 1, \"version\"");
        let err = from_json_str(&json).unwrap_err();
        assert!(matches!(err, CoreError::Decode { kind: "document", .. }));
    }

    #[test]
    fn unknown_envelope_key_fails_decoding() {
        let err = from_json_str(r#"{"catalog": {}}"#).unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
    }
}
