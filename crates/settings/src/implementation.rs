//! Per-control and aggregate settings built from control implementations.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use attest_core::schema::SetParameter;
use attest_core::{ControlImplementation, RequirementView};
use attest_rules::extension::RULE_ID_PROP;
use attest_rules::grouper::find_props;

use crate::error::{Result, SettingsError};
use crate::settings::Settings;

/// Settings for one control implementation: a `Settings` per control, a
/// reverse rule → controls index, and the aggregate across all controls.
///
/// Construction is additive, so an implementation can be composed from
/// several fragments with [`ImplementationSettings::merge`].
#[derive(Debug, Clone, Default)]
pub struct ImplementationSettings {
    by_control: IndexMap<String, Settings>,
    controls_by_rule: IndexMap<String, IndexSet<String>>,
    aggregate: Settings,
}

impl ImplementationSettings {
    /// Build settings from a single control implementation.
    pub fn new(implementation: ControlImplementation<'_>) -> Self {
        let mut settings = Self::default();
        settings.merge(implementation);
        settings
    }

    /// Fold another control implementation into these settings.
    ///
    /// Implementation-level parameters overlay the aggregate. A new
    /// control is recorded as built by [`ImplementationSettings::new`];
    /// an existing control has its rule set unioned and its parameter
    /// map overlaid, incoming values winning per key. Nothing is ever
    /// removed.
    pub fn merge(&mut self, implementation: ControlImplementation<'_>) {
        for parameter in implementation.set_parameters() {
            if let Some(value) = single_value(parameter) {
                self.aggregate
                    .set_parameter(parameter.param_id.clone(), value.clone());
            }
        }
        for requirement in implementation.requirements() {
            self.merge_requirement(requirement);
        }
        debug!(controls = self.by_control.len(), "merged control implementation");
    }

    fn merge_requirement(&mut self, requirement: RequirementView<'_>) {
        let mut rule_ids: IndexSet<String> = IndexSet::new();
        for prop in find_props(RULE_ID_PROP, requirement.props()) {
            rule_ids.insert(prop.value.clone());
        }
        for statement in requirement.statements() {
            for prop in find_props(RULE_ID_PROP, statement.props()) {
                rule_ids.insert(prop.value.clone());
            }
        }
        // A requirement that maps no rules is not assessable; skip it.
        if rule_ids.is_empty() {
            debug!(
                control = %requirement.control_id(),
                "skipped requirement with no mapped rules"
            );
            return;
        }

        let control_id = requirement.control_id().to_string();
        let control_settings = self.by_control.entry(control_id.clone()).or_default();
        for rule_id in rule_ids {
            self.controls_by_rule
                .entry(rule_id.clone())
                .or_default()
                .insert(control_id.clone());
            self.aggregate.insert_rule(rule_id.clone());
            control_settings.insert_rule(rule_id);
        }
        for parameter in requirement.set_parameters() {
            if let Some(value) = single_value(parameter) {
                control_settings.set_parameter(parameter.param_id.clone(), value.clone());
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Aggregate settings across every control.
    pub fn all_settings(&self) -> &Settings {
        &self.aggregate
    }

    /// Every control id with settings, in the order first seen.
    pub fn all_controls(&self) -> Vec<String> {
        self.by_control.keys().cloned().collect()
    }

    /// The controls a rule contributes to.
    pub fn applicable_controls(&self, rule_id: &str) -> Result<Vec<String>> {
        let controls = self
            .controls_by_rule
            .get(rule_id)
            .ok_or_else(|| SettingsError::RuleNotMapped(rule_id.to_string()))?;
        Ok(controls.iter().cloned().collect())
    }

    /// Settings scoped to a single control.
    pub fn by_control_id(&self, control_id: &str) -> Result<&Settings> {
        self.by_control
            .get(control_id)
            .ok_or_else(|| SettingsError::ControlNotFound(control_id.to_string()))
    }
}

/// The parameter's single selected value. Multi-value selections are
/// ambiguous and dropped.
fn single_value(parameter: &SetParameter) -> Option<&String> {
    match parameter.values.as_slice() {
        [value] => Some(value),
        _ => {
            debug!(
                parameter = %parameter.param_id,
                values = parameter.values.len(),
                "ignored parameter without exactly one value"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use attest_core::schema::{
        ControlImplementationSet, ImplementedRequirement, Property, Statement,
        SystemControlImplementation, SystemImplementedRequirement,
    };
    use attest_rules::extension::extension_property;

    use super::*;

    fn rule_prop(rule_id: &str) -> Property {
        extension_property(RULE_ID_PROP, rule_id)
    }

    fn set_parameter(param_id: &str, values: &[&str]) -> SetParameter {
        SetParameter {
            param_id: param_id.into(),
            values: values.iter().map(|v| (*v).to_string()).collect(),
            remarks: None,
        }
    }

    fn cis_implementation() -> ControlImplementationSet {
        ControlImplementationSet {
            uuid: "16b2898a-a0a1-46cc-a40d-157b29bd0a17".into(),
            source: "profiles/cis/profile.json".into(),
            description: "CIS profile".into(),
            props: None,
            set_parameters: Some(vec![set_parameter("file_name", &["override.pem"])]),
            implemented_requirements: vec![ImplementedRequirement {
                uuid: "9f3ec677-a086-4dbe-a88f-77bd96213423".into(),
                control_id: "CIS-2.1".into(),
                description: "Ensure cert and key files are set".into(),
                props: Some(vec![rule_prop("etcd_cert_file")]),
                set_parameters: None,
                statements: Some(vec![Statement {
                    statement_id: "CIS-2.1_smt".into(),
                    uuid: "da886e3f-faa1-4b31-88b0-72c77b5b1c88".into(),
                    description: "key file statement".into(),
                    props: Some(vec![rule_prop("etcd_key_file")]),
                    remarks: None,
                }]),
                remarks: None,
            }],
        }
    }

    #[test]
    fn construction_maps_rules_and_controls() {
        let implementation = cis_implementation();
        let settings = ImplementationSettings::new((&implementation).into());

        assert_eq!(settings.all_controls(), ["CIS-2.1"]);
        assert!(settings.all_settings().contains_rule("etcd_cert_file"));
        assert!(settings.all_settings().contains_rule("etcd_key_file"));
        assert_eq!(
            settings.all_settings().selected_parameters().get("file_name"),
            Some(&"override.pem".to_string())
        );

        let control = settings.by_control_id("CIS-2.1").unwrap();
        let rules: Vec<&str> = control.mapped_rules().collect();
        assert_eq!(rules, ["etcd_cert_file", "etcd_key_file"]);

        assert_eq!(
            settings.applicable_controls("etcd_key_file").unwrap(),
            ["CIS-2.1"]
        );
    }

    #[test]
    fn requirement_parameters_stay_scoped_to_their_control() {
        let mut implementation = cis_implementation();
        implementation.implemented_requirements[0].set_parameters =
            Some(vec![set_parameter("scoped_param", &["scoped_value"])]);
        let settings = ImplementationSettings::new((&implementation).into());

        let control = settings.by_control_id("CIS-2.1").unwrap();
        assert_eq!(
            control.selected_parameters().get("scoped_param"),
            Some(&"scoped_value".to_string())
        );
        assert!(settings
            .all_settings()
            .selected_parameters()
            .get("scoped_param")
            .is_none());
    }

    #[test]
    fn requirements_without_rules_are_skipped() {
        let mut implementation = cis_implementation();
        implementation.implemented_requirements[0].props = None;
        implementation.implemented_requirements[0].statements = None;
        let settings = ImplementationSettings::new((&implementation).into());

        assert!(settings.all_controls().is_empty());
        assert!(matches!(
            settings.by_control_id("CIS-2.1").unwrap_err(),
            SettingsError::ControlNotFound(_)
        ));
    }

    #[test]
    fn multi_value_parameters_are_dropped() {
        let mut implementation = cis_implementation();
        implementation.set_parameters =
            Some(vec![set_parameter("file_name", &["a.pem", "b.pem"])]);
        let settings = ImplementationSettings::new((&implementation).into());
        assert!(settings
            .all_settings()
            .selected_parameters()
            .get("file_name")
            .is_none());
    }

    #[test]
    fn merge_unions_rules_and_overlays_parameters() {
        let first = cis_implementation();
        let mut settings = ImplementationSettings::new((&first).into());

        let mut second = cis_implementation();
        second.set_parameters = Some(vec![
            set_parameter("file_name", &["merged.pem"]),
            set_parameter("timeout", &["30"]),
        ]);
        second.implemented_requirements[0].props = Some(vec![rule_prop("etcd_peer_cert_file")]);
        second.implemented_requirements[0].statements = None;
        settings.merge((&second).into());

        let control = settings.by_control_id("CIS-2.1").unwrap();
        let rules: Vec<&str> = control.mapped_rules().collect();
        assert_eq!(rules, ["etcd_cert_file", "etcd_key_file", "etcd_peer_cert_file"]);

        let parameters = settings.all_settings().selected_parameters();
        assert_eq!(parameters.get("file_name"), Some(&"merged.pem".to_string()));
        assert_eq!(parameters.get("timeout"), Some(&"30".to_string()));

        assert_eq!(
            settings.applicable_controls("etcd_peer_cert_file").unwrap(),
            ["CIS-2.1"]
        );
    }

    #[test]
    fn merge_records_new_controls() {
        let first = cis_implementation();
        let mut settings = ImplementationSettings::new((&first).into());

        let mut second = cis_implementation();
        second.implemented_requirements[0].control_id = "CIS-2.2".into();
        settings.merge((&second).into());

        assert_eq!(settings.all_controls(), ["CIS-2.1", "CIS-2.2"]);
        assert_eq!(
            settings.applicable_controls("etcd_cert_file").unwrap(),
            ["CIS-2.1", "CIS-2.2"]
        );
    }

    #[test]
    fn unmapped_rules_are_reported() {
        let implementation = cis_implementation();
        let settings = ImplementationSettings::new((&implementation).into());
        let err = settings.applicable_controls("ghost_rule").unwrap_err();
        assert_eq!(err.to_string(), "rule \"ghost_rule\" is not mapped to any control");
    }

    #[test]
    fn system_flavor_builds_the_same_settings() {
        let implementation = SystemControlImplementation {
            description: "system implementation".into(),
            set_parameters: Some(vec![set_parameter("file_name", &["ssp.pem"])]),
            implemented_requirements: vec![SystemImplementedRequirement {
                uuid: "7e0f4b29-4a2b-40f8-83b8-62c1d5ea3046".into(),
                control_id: "CIS-2.1".into(),
                props: Some(vec![rule_prop("etcd_cert_file")]),
                set_parameters: None,
                statements: None,
                remarks: None,
            }],
        };
        let settings = ImplementationSettings::new((&implementation).into());
        assert_eq!(settings.all_controls(), ["CIS-2.1"]);
        assert!(settings.all_settings().contains_rule("etcd_cert_file"));
        assert_eq!(
            settings.all_settings().selected_parameters().get("file_name"),
            Some(&"ssp.pem".to_string())
        );
    }
}
