//! Property grouping by remarks key.
//!
//! Properties that share a remarks value describe one logical object.
//! Properties with no remarks belong to no group and are dropped.

use indexmap::IndexMap;

use attest_core::schema::Property;

use crate::extension::in_extension_ns;

/// Cluster properties by their remarks value, preserving document order.
pub fn group_by_remarks(props: &[Property]) -> IndexMap<String, Vec<Property>> {
    let mut grouped: IndexMap<String, Vec<Property>> = IndexMap::new();
    for prop in props {
        let Some(remarks) = prop.remarks.as_deref() else {
            continue;
        };
        if remarks.is_empty() {
            continue;
        }
        grouped
            .entry(remarks.to_string())
            .or_default()
            .push(prop.clone());
    }
    grouped
}

/// First property with the given name that sits in the extension namespace.
pub fn find_prop<'a>(name: &str, props: &'a [Property]) -> Option<&'a Property> {
    props
        .iter()
        .find(|prop| prop.name == name && in_extension_ns(prop))
}

/// Every property with the given name in the extension namespace.
pub fn find_props<'a>(name: &str, props: &'a [Property]) -> Vec<&'a Property> {
    props
        .iter()
        .filter(|prop| prop.name == name && in_extension_ns(prop))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{extension_property, RULE_DESCRIPTION_PROP, RULE_ID_PROP};

    fn prop(name: &str, value: &str, remarks: Option<&str>) -> Property {
        let mut prop = extension_property(name, value);
        prop.remarks = remarks.map(str::to_string);
        prop
    }

    #[test]
    fn clusters_by_remarks_in_document_order() {
        let props = vec![
            prop(RULE_ID_PROP, "rule_a", Some("rule_set_0")),
            prop(RULE_DESCRIPTION_PROP, "first rule", Some("rule_set_0")),
            prop(RULE_ID_PROP, "rule_b", Some("rule_set_1")),
        ];
        let grouped = group_by_remarks(&props);
        assert_eq!(grouped.len(), 2);
        let keys: Vec<&String> = grouped.keys().collect();
        assert_eq!(keys, ["rule_set_0", "rule_set_1"]);
        assert_eq!(grouped["rule_set_0"].len(), 2);
        assert_eq!(grouped["rule_set_1"].len(), 1);
    }

    #[test]
    fn props_without_remarks_are_dropped() {
        let props = vec![
            prop(RULE_ID_PROP, "rule_a", None),
            prop(RULE_ID_PROP, "rule_b", Some("")),
            prop(RULE_ID_PROP, "rule_c", Some("rule_set_0")),
        ];
        let grouped = group_by_remarks(&props);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["rule_set_0"][0].value, "rule_c");
    }

    #[test]
    fn lookup_requires_the_extension_namespace() {
        let mut foreign = prop(RULE_ID_PROP, "rule_a", Some("rule_set_0"));
        foreign.ns = Some("https://example.com/other".into());
        let native = prop(RULE_ID_PROP, "rule_b", Some("rule_set_0"));
        let props = vec![foreign, native];

        let found = find_prop(RULE_ID_PROP, &props);
        assert_eq!(found.map(|p| p.value.as_str()), Some("rule_b"));
        assert_eq!(find_props(RULE_ID_PROP, &props).len(), 1);
    }
}
