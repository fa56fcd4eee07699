use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::EventId;

/// Ids of the events the user marked as selected, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    ids: IndexSet<EventId>,
}

impl SelectionSet {
    /// Adds `id` when absent, removes it when present.
    ///
    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: impl Into<EventId>) -> bool {
        let id = id.into();
        if self.ids.shift_remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventId> {
        self.ids.iter()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keeps only ids for which `keep` returns `true`; returns how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&EventId) -> bool) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| keep(id));
        before - self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_the_set() {
        let mut selection = SelectionSet::default();
        assert!(selection.toggle("a"));
        assert!(selection.contains("a"));
        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn retain_reports_dropped_ids() {
        let mut selection = SelectionSet::default();
        selection.toggle("a");
        selection.toggle("b");
        selection.toggle("c");

        let dropped = selection.retain(|id| id.as_str() != "b");
        assert_eq!(dropped, 1);
        let remaining: Vec<&str> = selection.iter().map(EventId::as_str).collect();
        assert_eq!(remaining, vec!["a", "c"]);
    }
}
