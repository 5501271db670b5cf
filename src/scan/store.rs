//! Categorized result collections for a scan

use std::collections::HashSet;

use crate::types::LookupOutcome;

/// Result category, also the filename prefix of checkpoint documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Checked,
    Available,
    Unavailable,
    Error,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Checked,
        Category::Available,
        Category::Unavailable,
        Category::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Checked => "checked",
            Category::Available => "available",
            Category::Unavailable => "unavailable",
            Category::Error => "error",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered result collections with a membership index over `checked`.
///
/// `checked` is a superset of the three outcome categories, and a resolved
/// domain lives in exactly one of them. Both invariants hold by
/// construction: [`ResultStore::mark_checked`] is the only way in, and
/// [`ResultStore::classify`] files each new domain once.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    checked: Vec<String>,
    checked_index: HashSet<String>,
    available: Vec<String>,
    unavailable: Vec<String>,
    error: Vec<String>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from loaded checkpoint documents.
    ///
    /// Categorized domains missing from `checked` (a hand-edited or
    /// partially written snapshot) are folded back in so the superset
    /// invariant holds after load.
    pub fn from_parts(
        checked: Vec<String>,
        available: Vec<String>,
        unavailable: Vec<String>,
        error: Vec<String>,
    ) -> Self {
        let mut store = Self {
            checked_index: checked.iter().cloned().collect(),
            checked,
            available,
            unavailable,
            error,
        };

        let categorized: Vec<String> = store
            .available
            .iter()
            .chain(store.unavailable.iter())
            .chain(store.error.iter())
            .cloned()
            .collect();
        for domain in categorized {
            if store.checked_index.insert(domain.clone()) {
                store.checked.push(domain);
            }
        }

        store
    }

    pub fn is_checked(&self, domain: &str) -> bool {
        self.checked_index.contains(domain)
    }

    /// Record a domain as checked. Returns false (and changes nothing) if
    /// it was already present; such domains are never looked up again.
    pub fn mark_checked(&mut self, domain: &str) -> bool {
        if !self.checked_index.insert(domain.to_string()) {
            return false;
        }
        self.checked.push(domain.to_string());
        true
    }

    /// File a freshly checked domain under its outcome category.
    pub fn classify(&mut self, domain: &str, outcome: LookupOutcome) {
        debug_assert!(self.is_checked(domain), "classify before mark_checked");

        let list = match outcome {
            LookupOutcome::Available => &mut self.available,
            LookupOutcome::Unavailable => &mut self.unavailable,
            LookupOutcome::Indeterminate => &mut self.error,
        };
        list.push(domain.to_string());
    }

    pub fn category(&self, category: Category) -> &[String] {
        match category {
            Category::Checked => &self.checked,
            Category::Available => &self.available,
            Category::Unavailable => &self.unavailable,
            Category::Error => &self.error,
        }
    }

    pub fn checked_count(&self) -> usize {
        self.checked.len()
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn unavailable_count(&self) -> usize {
        self.unavailable.len()
    }

    pub fn error_count(&self) -> usize {
        self.error.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_checked_dedups() {
        let mut store = ResultStore::new();
        assert!(store.mark_checked("test.co"));
        assert!(!store.mark_checked("test.co"));
        assert_eq!(store.checked_count(), 1);
    }

    #[test]
    fn test_classification_is_exclusive() {
        let mut store = ResultStore::new();
        for (domain, outcome) in [
            ("a.co", LookupOutcome::Available),
            ("b.co", LookupOutcome::Unavailable),
            ("c.co", LookupOutcome::Indeterminate),
        ] {
            store.mark_checked(domain);
            store.classify(domain, outcome);
        }

        assert_eq!(store.available_count(), 1);
        assert_eq!(store.unavailable_count(), 1);
        assert_eq!(store.error_count(), 1);
        assert_eq!(
            store.checked_count(),
            store.available_count() + store.unavailable_count() + store.error_count()
        );
    }

    #[test]
    fn test_from_parts_repairs_superset() {
        let store = ResultStore::from_parts(
            vec!["a.co".into()],
            vec!["a.co".into()],
            vec!["b.io".into()],
            vec![],
        );

        assert!(store.is_checked("a.co"));
        assert!(store.is_checked("b.io"));
        assert_eq!(store.checked_count(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = ResultStore::new();
        for domain in ["z.co", "a.co", "m.co"] {
            store.mark_checked(domain);
        }
        assert_eq!(store.category(Category::Checked), ["z.co", "a.co", "m.co"]);
    }
}
