//! Framework identification over control implementations.

use tracing::debug;

use attest_core::schema::ControlImplementationSet;
use attest_core::ControlImplementation;
use attest_rules::extension::FRAMEWORK_PROP;
use attest_rules::grouper::find_prop;

use crate::error::{Result, SettingsError};
use crate::implementation::ImplementationSettings;

/// Resolve a control implementation's framework short name.
///
/// The framework property wins; otherwise a three-segment source path
/// `<dir>/<framework>/<file>.json` yields its middle segment.
pub fn framework_short_name(implementation: &ControlImplementationSet) -> Option<String> {
    if let Some(prop) = find_prop(FRAMEWORK_PROP, implementation.props.as_deref().unwrap_or(&[])) {
        return Some(prop.value.clone());
    }
    short_name_from_source(&implementation.source)
}

fn short_name_from_source(source: &str) -> Option<String> {
    let cleaned = source.strip_prefix("./").unwrap_or(source);
    let segments: Vec<&str> = cleaned.split('/').collect();
    match segments.as_slice() {
        [_, framework, file] if file.ends_with(".json") => Some((*framework).to_string()),
        _ => None,
    }
}

/// Build settings for the named framework: the first implementation
/// whose short name matches wins.
pub fn framework(
    name: &str,
    implementations: &[ControlImplementationSet],
) -> Result<ImplementationSettings> {
    for implementation in implementations {
        let Some(short_name) = framework_short_name(implementation) else {
            continue;
        };
        if short_name == name {
            debug!(
                framework = %name,
                source = %implementation.source,
                "matched control implementation"
            );
            return Ok(ImplementationSettings::new(ControlImplementation::from(
                implementation,
            )));
        }
    }
    Err(SettingsError::FrameworkNotFound(name.to_string()))
}
