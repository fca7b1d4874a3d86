//! Set of entity ids picked for a bulk action

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use venuedesk_core::EntityId;

/// Ordered set of selected ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: BTreeSet<EntityId>,
}

impl SelectionSet {
    /// Empty selection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, returning whether it was newly added
    pub fn insert(&mut self, id: impl Into<EntityId>) -> bool {
        self.ids.insert(id.into())
    }

    /// Flip `id`, returning whether it is selected afterwards
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Whether `id` is selected
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop every id `keep` rejects
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    /// Selected ids in ascending order
    #[must_use]
    pub fn to_vec(&self) -> Vec<EntityId> {
        self.ids.iter().cloned().collect()
    }

    /// Iterate selected ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<EntityId>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_toggle() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle("a"));
        assert!(selection.contains("a"));
        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut selection: SelectionSet = ["3", "1"].into_iter().collect();
        assert!(!selection.insert("3"));
        assert!(selection.insert("2"));
        assert_eq!(selection.to_vec(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_retain() {
        let mut selection: SelectionSet = ["1", "2", "3"].into_iter().collect();
        selection.retain(|id| id != "2");
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["1", "3"]);
    }

    #[test]
    fn test_len_and_clear() {
        let mut selection: SelectionSet = ["1", "2", "2"].into_iter().collect();
        assert_eq!(selection.len(), 2);
        assert!(!selection.is_empty());
        selection.clear();
        assert_eq!(selection.len(), 0);
        assert!(selection.is_empty());
    }
}
