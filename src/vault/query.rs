//! Read-only views over the item collection: filtering and statistics.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::item::{ItemType, VaultItem};

/// Criteria for `VaultStore::list_items`.  Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Case-insensitive substring of the name or the stored content.
    pub search: Option<String>,
    pub category: Option<String>,
    pub item_type: Option<ItemType>,
    pub encrypted_only: bool,
}

impl ItemFilter {
    pub fn matches(&self, item: &VaultItem) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !item.name.to_lowercase().contains(&needle)
                && !item.content.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if item.category != category {
                return false;
            }
        }
        if self.item_type.is_some_and(|t| t != item.item_type) {
            return false;
        }
        !self.encrypted_only || item.encrypted
    }
}

/// Counts over the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VaultStats {
    pub total_items: usize,
    pub encrypted_items: usize,
    pub by_type: BTreeMap<String, usize>,
    /// Tiers 1-5 are always present, possibly with a zero count.
    pub by_level: BTreeMap<u8, usize>,
    pub categories: BTreeMap<String, usize>,
}

impl VaultStats {
    pub fn collect(items: &[VaultItem]) -> Self {
        let mut stats = Self {
            total_items: items.len(),
            by_type: ItemType::ALL
                .iter()
                .map(|t| (t.as_str().to_string(), 0))
                .collect(),
            by_level: (1..=5).map(|level| (level, 0)).collect(),
            ..Self::default()
        };

        for item in items {
            if item.encrypted {
                stats.encrypted_items += 1;
            }
            *stats
                .by_type
                .entry(item.item_type.as_str().to_string())
                .or_default() += 1;
            if let Some(count) = stats.by_level.get_mut(&item.level) {
                *count += 1;
            }
            *stats.categories.entry(item.category.clone()).or_default() += 1;
        }

        stats
    }
}

/// Distinct non-empty categories, sorted.
pub fn categories(items: &[VaultItem]) -> Vec<String> {
    items
        .iter()
        .filter(|i| !i.category.is_empty())
        .map(|i| i.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::item::NewItem;

    fn item(name: &str, item_type: ItemType, category: &str, content: &str) -> VaultItem {
        VaultItem::new(NewItem {
            name: name.into(),
            item_type,
            content: content.into(),
            category: category.into(),
            tags: Vec::new(),
        })
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_content() {
        let a = item("Bank PIN", ItemType::Password, "finance", "1234");
        let b = item("shopping", ItemType::Note, "", "Buy BREAD");

        let by_name = ItemFilter {
            search: Some("bank".into()),
            ..ItemFilter::default()
        };
        assert!(by_name.matches(&a));
        assert!(!by_name.matches(&b));

        let by_content = ItemFilter {
            search: Some("bread".into()),
            ..ItemFilter::default()
        };
        assert!(by_content.matches(&b));
    }

    #[test]
    fn category_type_and_encrypted_filters_combine() {
        let mut a = item("a", ItemType::Password, "work", "x");
        let b = item("b", ItemType::Password, "home", "y");
        a.encrypted = true;
        a.level = 1;

        let filter = ItemFilter {
            category: Some("work".into()),
            item_type: Some(ItemType::Password),
            encrypted_only: true,
            ..ItemFilter::default()
        };
        assert!(filter.matches(&a));
        assert!(!filter.matches(&b));
    }

    #[test]
    fn stats_count_types_levels_and_categories() {
        let mut a = item("a", ItemType::Text, "work", "x");
        a.encrypted = true;
        a.level = 5;
        let b = item("b", ItemType::File, "work", "");
        let c = item("c", ItemType::Note, "", "");

        let stats = VaultStats::collect(&[a, b, c]);
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.encrypted_items, 1);
        assert_eq!(stats.by_type["file"], 1);
        assert_eq!(stats.by_type["password"], 0);
        assert_eq!(stats.by_level[&5], 1);
        assert_eq!(stats.by_level[&1], 0);
        assert_eq!(stats.categories["work"], 2);
        assert_eq!(stats.categories[""], 1);
    }

    #[test]
    fn categories_are_distinct_sorted_and_non_empty() {
        let items = [
            item("a", ItemType::Text, "zeta", ""),
            item("b", ItemType::Text, "alpha", ""),
            item("c", ItemType::Text, "zeta", ""),
            item("d", ItemType::Text, "", ""),
        ];
        assert_eq!(categories(&items), vec!["alpha", "zeta"]);
    }
}
