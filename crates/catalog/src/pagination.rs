//! Fixed-size page slicing.

use serde::Serialize;

/// Products shown per catalog page.
pub const PAGE_SIZE: usize = 16;

/// One page of a derived list.
#[derive(Debug, PartialEq, Serialize)]
pub struct Page<'a, T> {
    /// Items on the requested page; empty when the page is out of range.
    pub items: &'a [T],
    /// Total number of pages (0 for an empty list).
    pub page_count: usize,
}

/// Number of pages needed for `len` items. A zero page size yields no pages.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Slice `items` into its 1-based `page`.
///
/// Pages outside `1..=page_count` produce an empty slice rather than an error.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_count = page_count(items.len(), page_size);

    let start = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size))
        .filter(|start| *start < items.len());

    let items: &[T] = match start {
        Some(start) => {
            let end = start.saturating_add(page_size).min(items.len());
            &items[start..end]
        }
        None => &[],
    };

    Page { items, page_count }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_seven_items_make_three_pages() {
        let items: Vec<u32> = (0..37).collect();

        let first = paginate(&items, 1, PAGE_SIZE);
        assert_eq!(first.page_count, 3);
        assert_eq!(first.items.len(), 16);
        assert_eq!(first.items[0], 0);

        let second = paginate(&items, 2, PAGE_SIZE);
        assert_eq!(second.items.len(), 16);
        assert_eq!(second.items[0], 16);

        let third = paginate(&items, 3, PAGE_SIZE);
        assert_eq!(third.items, &[32, 33, 34, 35, 36]);

        let fourth = paginate(&items, 4, PAGE_SIZE);
        assert!(fourth.items.is_empty());
        assert_eq!(fourth.page_count, 3);
    }

    #[test]
    fn empty_list_has_zero_pages() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 1, PAGE_SIZE);
        assert_eq!(page.page_count, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn page_zero_and_huge_pages_are_empty() {
        let items: Vec<u32> = (0..5).collect();
        assert!(paginate(&items, 0, PAGE_SIZE).items.is_empty());
        assert!(paginate(&items, usize::MAX, PAGE_SIZE).items.is_empty());
    }

    #[test]
    fn zero_page_size_yields_nothing() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(&items, 1, 0);
        assert_eq!(page.page_count, 0);
        assert!(page.items.is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: concatenating every page reproduces the list.
            #[test]
            fn pages_cover_list_exactly(len in 0usize..200, page_size in 1usize..40) {
                let items: Vec<usize> = (0..len).collect();
                let count = page_count(len, page_size);
                let mut joined = Vec::with_capacity(len);
                for page in 1..=count {
                    let slice = paginate(&items, page, page_size);
                    prop_assert!(!slice.items.is_empty());
                    prop_assert!(slice.items.len() <= page_size);
                    joined.extend_from_slice(slice.items);
                }
                prop_assert_eq!(joined, items.clone());
                prop_assert!(paginate(&items, count + 1, page_size).items.is_empty());
            }
        }
    }
}
