//! Rule selection and parameter overrides for one scope.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use attest_rules::{RuleSet, RuleStore};

use crate::error::{Result, SettingsError};

/// Which rules apply and which parameter values override their defaults.
///
/// A `Settings` value is either scoped to a single control or is the
/// aggregate across every control of an implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    mapped_rules: IndexSet<String>,
    selected_parameters: IndexMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the rule is selected by this scope.
    pub fn contains_rule(&self, rule_id: &str) -> bool {
        self.mapped_rules.contains(rule_id)
    }

    /// Selected rule ids, in the order they were mapped.
    pub fn mapped_rules(&self) -> impl Iterator<Item = &str> + '_ {
        self.mapped_rules.iter().map(String::as_str)
    }

    /// Parameter overrides selected for this scope.
    pub fn selected_parameters(&self) -> &IndexMap<String, String> {
        &self.selected_parameters
    }

    /// Copy of the rule set with its parameter value overridden when this
    /// scope selects one. The input is never mutated.
    pub fn apply_parameter_settings(&self, rule_set: &RuleSet) -> RuleSet {
        let mut applied = rule_set.clone();
        if let Some(parameter) = applied.rule.parameter.as_mut() {
            if let Some(value) = self.selected_parameters.get(&parameter.id) {
                parameter.value = Some(value.clone());
            }
        }
        applied
    }

    pub(crate) fn insert_rule(&mut self, rule_id: String) {
        self.mapped_rules.insert(rule_id);
    }

    pub(crate) fn set_parameter(&mut self, parameter_id: String, value: String) {
        self.selected_parameters.insert(parameter_id, value);
    }
}

/// Resolve a component's rules through the store, keep those the settings
/// select, and apply parameter overrides to each.
pub fn apply_to_component(
    component_title: &str,
    store: &impl RuleStore,
    settings: &Settings,
) -> Result<Vec<RuleSet>> {
    let rule_sets = store.find_by_component(component_title)?;
    let mut applied = Vec::new();
    for rule_set in &rule_sets {
        if settings.contains_rule(&rule_set.rule.id) {
            applied.push(settings.apply_parameter_settings(rule_set));
        }
    }
    if applied.is_empty() {
        return Err(SettingsError::NoApplicableRules(component_title.to_string()));
    }
    debug!(
        component = %component_title,
        rules = applied.len(),
        "applied settings to component"
    );
    Ok(applied)
}
