//! Catalog Store: the ordered set of playable entries sourced from one feed.
//!
//! Entries are keyed by a synthetic id equal to their source ordinal; the
//! title is a display field only and never identifies an entry, so duplicate
//! titles are legal. A catalog is rebuilt wholesale on every source load and
//! swapped atomically — it is never patched in place.

use chrono::{DateTime, Utc};

use crate::errors::{AppError, AppResult};
use crate::feed::FeedItem;

#[derive(Clone, Debug)]
pub struct CatalogEntry {
    /// Synthetic id, equal to the entry's 0-based position in source order.
    pub id: usize,
    pub title: String,
    pub locator: String,
    pub summary: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_feed(items: Vec<FeedItem>) -> Self {
        let entries = items
            .into_iter()
            .enumerate()
            .map(|(id, item)| CatalogEntry {
                id,
                title: item.title,
                locator: item.locator,
                summary: item.content,
                published_at: item.published_at,
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.title.clone()).collect()
    }

    /// Every locator from `id` through the end of the catalog, in source
    /// order. Supports "play this and everything after it".
    pub fn locators_from(&self, id: usize) -> AppResult<Vec<String>> {
        if id >= self.entries.len() {
            return Err(AppError::NotFound);
        }
        Ok(self
            .entries
            .iter()
            .filter(|e| e.id >= id)
            .map(|e| e.locator.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, locator: &str) -> FeedItem {
        FeedItem {
            title: title.to_string(),
            content: format!("about {title}"),
            locator: locator.to_string(),
            published_at: None,
        }
    }

    fn sample() -> Catalog {
        Catalog::from_feed(vec![
            item("A", "loc1"),
            item("B", "loc2"),
            item("C", "loc3"),
        ])
    }

    #[test]
    fn ids_follow_source_order() {
        let catalog = sample();
        for (i, entry) in (0..catalog.len()).filter_map(|i| catalog.get(i).map(|e| (i, e))) {
            assert_eq!(entry.id, i);
        }
    }

    #[test]
    fn range_runs_from_entry_to_end() {
        let catalog = sample();
        assert_eq!(catalog.locators_from(0).unwrap(), vec!["loc1", "loc2", "loc3"]);
        assert_eq!(catalog.locators_from(1).unwrap(), vec!["loc2", "loc3"]);
        assert_eq!(catalog.locators_from(2).unwrap(), vec!["loc3"]);
    }

    #[test]
    fn out_of_range_id_is_not_found() {
        let catalog = sample();
        assert!(matches!(catalog.locators_from(3), Err(AppError::NotFound)));
        assert!(matches!(Catalog::default().locators_from(0), Err(AppError::NotFound)));
    }

    #[test]
    fn duplicate_titles_stay_distinct() {
        let catalog = Catalog::from_feed(vec![item("Same", "first"), item("Same", "second")]);
        assert_eq!(catalog.get(0).unwrap().locator, "first");
        assert_eq!(catalog.get(1).unwrap().locator, "second");
    }
}
