//! In-memory copy of a remote collection plus the user's selection.

use std::fmt::Debug;
use std::hash::Hash;

use rh_core::entities::{Paper, Workspace, WorkspaceOverview};
use rh_core::{PaperId, WorkspaceId};

/// An entity with a stable identity inside its collection.
pub trait Identified {
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;
}

impl Identified for Workspace {
    type Id = WorkspaceId;

    fn id(&self) -> &WorkspaceId {
        &self.id
    }
}

impl Identified for WorkspaceOverview {
    type Id = WorkspaceId;

    fn id(&self) -> &WorkspaceId {
        &self.workspace.id
    }
}

impl Identified for Paper {
    type Id = PaperId;

    fn id(&self) -> &PaperId {
        &self.id
    }
}

/// Ordered set of selected ids, in the order they were selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id> {
    ids: Vec<Id>,
}

impl<Id> Default for Selection<Id> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<Id: Eq + Clone> Selection<Id> {
    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn insert(&mut self, id: Id) {
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    fn remove(&mut self, id: &Id) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| s != id);
        self.ids.len() != before
    }

    fn retain(&mut self, keep: impl Fn(&Id) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    fn clear(&mut self) {
        self.ids.clear();
    }
}

/// The client's belief about a remote collection.
///
/// Ids are unique: inserting an id that is already present replaces the
/// entry in place. The selection only ever references ids present in the
/// mirror; every removal prunes it.
#[derive(Debug, Clone)]
pub struct LocalMirror<T: Identified> {
    items: Vec<T>,
    selection: Selection<T::Id>,
}

impl<T: Identified> Default for LocalMirror<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selection: Selection::default(),
        }
    }
}

impl<T: Identified + Clone> LocalMirror<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        let mut mirror = Self::default();
        mirror.replace_all(items);
        mirror
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn ids(&self) -> Vec<T::Id> {
        self.items.iter().map(|item| item.id().clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Append an item, or replace the entry that already has its id.
    pub fn upsert(&mut self, item: T) {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Remove an item and drop it from the selection.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        self.selection.remove(id);
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Replace the contents wholesale, keeping the first of any duplicate
    /// ids and pruning selected ids that disappeared.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items.clear();
        for item in items {
            if !self.contains(item.id()) {
                self.items.push(item);
            }
        }
        let items = &self.items;
        self.selection
            .retain(|id| items.iter().any(|item| item.id() == id));
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection<T::Id> {
        &self.selection
    }

    /// Selected items in selection order.
    #[must_use]
    pub fn selected_items(&self) -> Vec<&T> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Select an item. Returns `false` if the id isn't in the mirror.
    pub fn select(&mut self, id: &T::Id) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selection.insert(id.clone());
        true
    }

    pub fn deselect(&mut self, id: &T::Id) -> bool {
        self.selection.remove(id)
    }

    /// Flip an item's selection. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &T::Id) -> bool {
        if self.selection.remove(id) {
            return false;
        }
        self.select(id)
    }

    pub fn select_all(&mut self) {
        for item in &self.items {
            self.selection.insert(item.id().clone());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paper(id: &str, title: &str) -> Paper {
        Paper::new(id, title)
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let mirror = LocalMirror::from_items(vec![paper("a", "1"), paper("b", "2"), paper("a", "3")]);
        assert_eq!(mirror.ids(), vec![PaperId::new("a"), PaperId::new("b")]);
        assert_eq!(mirror.get(&PaperId::new("a")).unwrap().title, "1");
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut mirror = LocalMirror::from_items(vec![paper("a", "1"), paper("b", "2")]);
        mirror.upsert(paper("a", "new"));
        mirror.upsert(paper("c", "3"));
        let titles: Vec<_> = mirror.items().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["new", "2", "3"]);
    }

    #[test]
    fn remove_prunes_selection() {
        let mut mirror = LocalMirror::from_items(vec![paper("a", "1"), paper("b", "2")]);
        mirror.select(&PaperId::new("a"));
        mirror.select(&PaperId::new("b"));
        mirror.remove(&PaperId::new("a"));
        assert_eq!(mirror.selection().ids(), [PaperId::new("b")]);
    }

    #[test]
    fn replace_all_prunes_vanished_selection() {
        let mut mirror = LocalMirror::from_items(vec![paper("a", "1"), paper("b", "2")]);
        mirror.select_all();
        mirror.replace_all(vec![paper("b", "2"), paper("c", "3")]);
        assert_eq!(mirror.selection().ids(), [PaperId::new("b")]);
    }

    #[test]
    fn absent_ids_cannot_be_selected() {
        let mut mirror: LocalMirror<Paper> = LocalMirror::new();
        assert!(!mirror.select(&PaperId::new("ghost")));
        assert!(!mirror.toggle(&PaperId::new("ghost")));
        assert!(mirror.selection().is_empty());
    }

    #[test]
    fn toggle_flips_and_keeps_order() {
        let mut mirror =
            LocalMirror::from_items(vec![paper("a", "1"), paper("b", "2"), paper("c", "3")]);
        assert!(mirror.toggle(&PaperId::new("c")));
        assert!(mirror.toggle(&PaperId::new("a")));
        assert!(!mirror.toggle(&PaperId::new("c")));
        assert!(mirror.toggle(&PaperId::new("c")));
        let selected: Vec<_> = mirror.selected_items().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(selected, ["1", "3"]);
    }
}
