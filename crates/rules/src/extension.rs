//! Extension property catalog and the types extracted from it.
//!
//! Rules, checks, and parameters ride on ordinary document properties.
//! A property belongs to this catalog when its name matches one of the
//! constants below and its namespace contains [`EXTENSION_NAMESPACE`].

use serde::{Deserialize, Serialize};

use attest_core::schema::Property;

/// Namespace that qualifies extension properties. Matching is by
/// containment, so versioned namespaces still qualify.
pub const EXTENSION_NAMESPACE: &str = "https://attest.dev/schemas/oscal";

/// Class marking a generated test-parameter property.
pub const TEST_PARAMETER_CLASS: &str = "test-parameter";

// ── Property names ───────────────────────────────────────────────────

pub const RULE_ID_PROP: &str = "Rule_Id";
pub const RULE_DESCRIPTION_PROP: &str = "Rule_Description";
pub const CHECK_ID_PROP: &str = "Check_Id";
pub const CHECK_DESCRIPTION_PROP: &str = "Check_Description";
pub const PARAMETER_ID_PROP: &str = "Parameter_Id";
pub const PARAMETER_DESCRIPTION_PROP: &str = "Parameter_Description";
pub const PARAMETER_DEFAULT_PROP: &str = "Parameter_Value_Default";
/// Names the framework a control implementation belongs to.
pub const FRAMEWORK_PROP: &str = "Framework_Short_Name";
/// Generated on activities to record how a rule is assessed.
pub const METHOD_PROP: &str = "method";
pub const METHOD_TEST: &str = "TEST";
/// Carried by observations to link them back to rules and checks.
pub const ASSESSMENT_RULE_ID_PROP: &str = "assessment-rule-id";
pub const ASSESSMENT_CHECK_ID_PROP: &str = "assessment-check-id";

// ── Extracted types ──────────────────────────────────────────────────

/// A rule together with the checks that implement it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rule: Rule,
    pub checks: Vec<Check>,
}

/// A single compliance rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Parameter>,
}

/// An executable check implementing a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub id: String,
    pub description: String,
}

/// A tunable input of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    pub description: String,
    /// Default from extraction, or the selected override after settings
    /// are applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Whether a property's namespace marks it as part of this catalog.
pub fn in_extension_ns(prop: &Property) -> bool {
    prop.ns
        .as_deref()
        .is_some_and(|ns| ns.contains(EXTENSION_NAMESPACE))
}

/// Build a property in the extension namespace.
pub fn extension_property(name: &str, value: &str) -> Property {
    Property {
        name: name.to_string(),
        value: value.to_string(),
        ns: Some(EXTENSION_NAMESPACE.to_string()),
        class: None,
        remarks: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_matches_by_containment() {
        let mut prop = extension_property(RULE_ID_PROP, "etcd_cert_file");
        assert!(in_extension_ns(&prop));

        prop.ns = Some(format!("{EXTENSION_NAMESPACE}/v1"));
        assert!(in_extension_ns(&prop));

        prop.ns = Some("https://example.com/other".into());
        assert!(!in_extension_ns(&prop));

        prop.ns = None;
        assert!(!in_extension_ns(&prop));
    }
}
