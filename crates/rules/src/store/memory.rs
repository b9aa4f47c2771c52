//! In-memory rule index.
//!
//! Indexing walks each component's properties grouped by remarks and
//! maintains four maps: rule id → rule set, check id → owning rule id,
//! component title → rule ids, and validation component title → check
//! ids. Repeated indexing merges: rule fields present in a group
//! overwrite, checks upsert by id, per-component sets grow additively.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use attest_core::Component;

use crate::extension::{
    Check, Parameter, RuleSet, CHECK_DESCRIPTION_PROP, CHECK_ID_PROP, PARAMETER_DEFAULT_PROP,
    PARAMETER_DESCRIPTION_PROP, PARAMETER_ID_PROP, RULE_DESCRIPTION_PROP, RULE_ID_PROP,
};
use crate::grouper::{find_prop, group_by_remarks};
use crate::store::{RuleStore, StoreError};

/// In-memory bidirectional rule index.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rules: IndexMap<String, RuleSet>,
    rule_by_check: IndexMap<String, String>,
    rules_by_component: IndexMap<String, IndexSet<String>>,
    checks_by_validation_component: IndexMap<String, IndexSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract and index every component's rules, merging into any
    /// existing indices.
    pub fn index_all(&mut self, components: &[Component]) -> Result<(), StoreError> {
        if components.is_empty() {
            return Err(StoreError::NoComponents);
        }
        for component in components {
            let extracted = self.index_component(component);
            if !extracted.is_empty() {
                self.rules_by_component
                    .entry(component.title().to_string())
                    .or_default()
                    .extend(extracted);
            }
        }
        info!(
            components = components.len(),
            rules = self.rules.len(),
            "indexed components"
        );
        Ok(())
    }

    /// The rule ids touched by one component's property groups.
    fn index_component(&mut self, component: &Component) -> IndexSet<String> {
        let mut extracted = IndexSet::new();
        let mut check_ids = IndexSet::new();
        for (_, group) in group_by_remarks(component.props()) {
            let Some(rule_id_prop) = find_prop(RULE_ID_PROP, &group) else {
                continue;
            };
            let rule_id = rule_id_prop.value.clone();
            let rule_set = self.rules.entry(rule_id.clone()).or_default();
            rule_set.rule.id = rule_id.clone();
            if let Some(description) = find_prop(RULE_DESCRIPTION_PROP, &group) {
                rule_set.rule.description = description.value.clone();
            }
            if let Some(parameter_id) = find_prop(PARAMETER_ID_PROP, &group) {
                let parameter = rule_set.rule.parameter.get_or_insert_with(Parameter::default);
                parameter.id = parameter_id.value.clone();
            }
            if let Some(parameter_description) = find_prop(PARAMETER_DESCRIPTION_PROP, &group) {
                let parameter = rule_set.rule.parameter.get_or_insert_with(Parameter::default);
                parameter.description = parameter_description.value.clone();
            }
            if let Some(default_value) = find_prop(PARAMETER_DEFAULT_PROP, &group) {
                let parameter = rule_set.rule.parameter.get_or_insert_with(Parameter::default);
                parameter.value = Some(default_value.value.clone());
            }
            if let Some(check_id_prop) = find_prop(CHECK_ID_PROP, &group) {
                let check = Check {
                    id: check_id_prop.value.clone(),
                    description: find_prop(CHECK_DESCRIPTION_PROP, &group)
                        .map(|prop| prop.value.clone())
                        .unwrap_or_default(),
                };
                match rule_set.checks.iter_mut().find(|c| c.id == check.id) {
                    Some(existing) => *existing = check,
                    None => rule_set.checks.push(check),
                }
                self.rule_by_check
                    .insert(check_id_prop.value.clone(), rule_id.clone());
                check_ids.insert(check_id_prop.value.clone());
            }
            extracted.insert(rule_id);
        }
        if component.is_validation() && !check_ids.is_empty() {
            self.checks_by_validation_component
                .entry(component.title().to_string())
                .or_default()
                .extend(check_ids);
        }
        debug!(
            component = %component.title(),
            rules = extracted.len(),
            "indexed component"
        );
        extracted
    }
}

impl RuleStore for MemoryStore {
    fn get_by_rule_id(&self, rule_id: &str) -> Result<RuleSet, StoreError> {
        self.rules
            .get(rule_id)
            .cloned()
            .ok_or_else(|| StoreError::RuleNotFound(rule_id.to_string()))
    }

    fn get_by_check_id(&self, check_id: &str) -> Result<RuleSet, StoreError> {
        let rule_id = self
            .rule_by_check
            .get(check_id)
            .ok_or_else(|| StoreError::CheckNotFound(check_id.to_string()))?;
        self.rules
            .get(rule_id)
            .cloned()
            .ok_or_else(|| StoreError::CheckNotFound(check_id.to_string()))
    }

    fn find_by_component(&self, component_title: &str) -> Result<Vec<RuleSet>, StoreError> {
        let rule_ids = self
            .rules_by_component
            .get(component_title)
            .ok_or_else(|| StoreError::ComponentNotFound(component_title.to_string()))?;

        let mut rule_sets = Vec::with_capacity(rule_ids.len());
        let mut errors = Vec::new();
        for rule_id in rule_ids {
            match self.get_by_rule_id(rule_id) {
                Ok(rule_set) => rule_sets.push(rule_set),
                Err(err) => errors.push(err),
            }
        }

        // A validation component only ever sees the checks it registered.
        if let Some(check_ids) = self.checks_by_validation_component.get(component_title) {
            for rule_set in &mut rule_sets {
                rule_set
                    .checks
                    .retain(|check| check_ids.contains(check.id.as_str()));
            }
        }

        if errors.is_empty() {
            Ok(rule_sets)
        } else {
            Err(StoreError::Partial {
                component: component_title.to_string(),
                rule_sets,
                errors,
            })
        }
    }

    fn all(&self) -> Vec<RuleSet> {
        self.rules.values().cloned().collect()
    }
}
