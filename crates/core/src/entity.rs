//! Entity trait: identity + continuity across state changes.

use std::collections::HashSet;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Identifiers that occur more than once in `items`, in first-repeat order.
pub fn duplicate_ids<E: Entity>(items: &[E]) -> Vec<E::Id> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for item in items {
        let id = item.id();
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id.clone());
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(u32);

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.0
        }
    }

    #[test]
    fn reports_each_duplicate_once() {
        let rows = [Row(1), Row(2), Row(1), Row(3), Row(1), Row(2)];
        assert_eq!(duplicate_ids(&rows), vec![1, 2]);
    }

    #[test]
    fn unique_items_have_no_duplicates() {
        let rows = [Row(1), Row(2), Row(3)];
        assert!(duplicate_ids(&rows).is_empty());
    }
}
