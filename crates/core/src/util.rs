//! Small helpers shared across the workspace.

/// `None` when the list is empty, so optional lists serialize compactly.
pub fn none_if_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
