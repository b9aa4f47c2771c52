//! Rule storage and retrieval.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use crate::extension::RuleSet;

/// Read interface over indexed rule sets.
///
/// Every getter hands back a fresh copy; mutating a returned rule set
/// never touches the index.
pub trait RuleStore {
    /// Look up a rule set by its rule id.
    fn get_by_rule_id(&self, rule_id: &str) -> Result<RuleSet, StoreError>;

    /// Look up the rule set owning a check id.
    fn get_by_check_id(&self, check_id: &str) -> Result<RuleSet, StoreError>;

    /// All rule sets recorded for a component. Validation components see
    /// only the checks they registered.
    fn find_by_component(&self, component_title: &str) -> Result<Vec<RuleSet>, StoreError>;

    /// Every indexed rule set, in extraction order.
    fn all(&self) -> Vec<RuleSet>;
}
