//! One surface over the two component flavors.
//!
//! Components appear in two document kinds with slightly different shapes:
//! defined components (component definitions) and system components
//! (system security plans). Downstream code that only cares about
//! identity, type, and properties works against this tagged union.

use crate::schema::{ComponentStatus, ComponentType, DefinedComponent, Property, SystemComponent};

/// State recorded when a defined component is projected into a system.
const OPERATIONAL_STATE: &str = "operational";

/// Either flavor of component.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Defined(DefinedComponent),
    System(SystemComponent),
}

impl Component {
    pub fn uuid(&self) -> &str {
        match self {
            Component::Defined(component) => &component.uuid,
            Component::System(component) => &component.uuid,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Component::Defined(component) => &component.title,
            Component::System(component) => &component.title,
        }
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            Component::Defined(component) => component.component_type,
            Component::System(component) => component.component_type,
        }
    }

    /// Whether this component provides checks rather than being assessed.
    pub fn is_validation(&self) -> bool {
        self.component_type() == ComponentType::Validation
    }

    pub fn props(&self) -> &[Property] {
        let props = match self {
            Component::Defined(component) => &component.props,
            Component::System(component) => &component.props,
        };
        props.as_deref().unwrap_or(&[])
    }

    /// Project into the defined-component flavor. System components lose
    /// their status; defined components pass through with their
    /// control implementations intact.
    pub fn as_defined(&self) -> DefinedComponent {
        match self {
            Component::Defined(component) => component.clone(),
            Component::System(component) => DefinedComponent {
                uuid: component.uuid.clone(),
                component_type: component.component_type,
                title: component.title.clone(),
                description: component.description.clone(),
                purpose: component.purpose.clone(),
                props: component.props.clone(),
                links: component.links.clone(),
                control_implementations: None,
            },
        }
    }

    /// Project into the system-component flavor. Defined components gain
    /// an operational status and drop their control implementations.
    pub fn as_system(&self) -> SystemComponent {
        match self {
            Component::System(component) => component.clone(),
            Component::Defined(component) => SystemComponent {
                uuid: component.uuid.clone(),
                component_type: component.component_type,
                title: component.title.clone(),
                description: component.description.clone(),
                purpose: component.purpose.clone(),
                props: component.props.clone(),
                links: component.links.clone(),
                status: ComponentStatus {
                    state: OPERATIONAL_STATE.to_string(),
                    remarks: None,
                },
            },
        }
    }
}

impl From<DefinedComponent> for Component {
    fn from(component: DefinedComponent) -> Self {
        Component::Defined(component)
    }
}

impl From<SystemComponent> for Component {
    fn from(component: SystemComponent) -> Self {
        Component::System(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defined() -> DefinedComponent {
        DefinedComponent {
            uuid: "6cb6ba48-fb29-4ab6-9e51-3a0dbcbed055".into(),
            component_type: ComponentType::Service,
            title: "TestService".into(),
            description: "A service under test".into(),
            purpose: None,
            props: Some(vec![Property {
                name: "note".into(),
                value: "x".into(),
                ..Property::default()
            }]),
            links: None,
            control_implementations: None,
        }
    }

    #[test]
    fn shared_accessors_cover_both_flavors() {
        let component = Component::from(defined());
        assert_eq!(component.title(), "TestService");
        assert_eq!(component.component_type(), ComponentType::Service);
        assert_eq!(component.props().len(), 1);
        assert!(!component.is_validation());
    }

    #[test]
    fn defined_to_system_gains_operational_status() {
        let component = Component::from(defined());
        let system = component.as_system();
        assert_eq!(system.status.state, "operational");
        assert_eq!(system.title, "TestService");
        assert_eq!(system.props.as_deref().map(<[Property]>::len), Some(1));
    }

    #[test]
    fn system_to_defined_drops_status() {
        let system = Component::from(defined()).as_system();
        let round_tripped = Component::from(system).as_defined();
        assert_eq!(round_tripped.title, "TestService");
        assert!(round_tripped.control_implementations.is_none());
    }

    #[test]
    fn missing_props_read_as_empty() {
        let mut component = defined();
        component.props = None;
        assert!(Component::from(component).props().is_empty());
    }
}
