// SPDX-License-Identifier: Apache-2.0

//! Deduplicated working set of fetched items.
//!
//! Overlapping queries feed the same set; items are keyed by canonical URL
//! so a re-fetch overwrites instead of duplicating.

use std::collections::HashMap;

use crate::item::Item;

/// Id-keyed collection a report run populates and then drains.
#[derive(Debug, Default)]
pub struct WorkingSet {
    items: HashMap<String, Item>,
}

impl WorkingSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one item, replacing any existing entry with the same id.
    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    /// Merge a batch of items, last write winning per id.
    pub fn merge(&mut self, batch: impl IntoIterator<Item = Item>) {
        for item in batch {
            self.insert(item);
        }
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Mutable access to every item, for enrichment passes.
    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.values_mut()
    }

    /// Extract the items ordered by creation time, then id, ready for the
    /// classifier's arena. The map itself has no iteration order; sorting
    /// here keeps section contents stable run to run.
    #[must_use]
    pub fn into_arena(self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.into_values().collect();
        items.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemKind, ItemState, ReactionCounts};
    use chrono::{DateTime, Utc};

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().expect("valid RFC3339 instant")
    }

    fn item(id: &str, title: &str, created_at: &str) -> Item {
        Item {
            id: id.to_string(),
            html_url: String::new(),
            number: 1,
            title: title.to_string(),
            author: "octocat".to_string(),
            kind: ItemKind::Issue,
            state: ItemState::Open,
            state_reason: None,
            merged: false,
            created_at: instant(created_at),
            closed_at: None,
            reactions: ReactionCounts::default(),
        }
    }

    #[test]
    fn merging_the_same_id_twice_keeps_one_entry() {
        let mut set = WorkingSet::new();
        set.merge(vec![
            item("a", "first fetch", "2026-08-01T00:00:00Z"),
            item("a", "second fetch", "2026-08-01T00:00:00Z"),
        ]);

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a").map(|i| i.title.as_str()), Some("second fetch"));
    }

    #[test]
    fn later_batches_overwrite_earlier_ones() {
        let mut set = WorkingSet::new();
        set.merge(vec![item("a", "from created query", "2026-08-01T00:00:00Z")]);
        set.merge(vec![
            item("a", "from updated query", "2026-08-01T00:00:00Z"),
            item("b", "only updated", "2026-08-02T00:00:00Z"),
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get("a").map(|i| i.title.as_str()),
            Some("from updated query")
        );
    }

    #[test]
    fn arena_is_ordered_by_creation_then_id() {
        let mut set = WorkingSet::new();
        set.merge(vec![
            item("b", "tie later id", "2026-08-01T00:00:00Z"),
            item("c", "newest", "2026-08-03T00:00:00Z"),
            item("a", "tie earlier id", "2026-08-01T00:00:00Z"),
        ]);

        let ids: Vec<String> = set.into_arena().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
