//! Generic windowing over ordered sequences
//!
//! One pagination primitive is shared by child listings, relationship
//! listings, and type-children listings; there are no kind-specific
//! variants. The window arithmetic is:
//!
//! - effective skip = `max(0, skip_count or 0)`
//! - effective max = `max_items or unbounded`; negative also means unbounded
//! - returned items = `sequence[skip .. skip+max]` clipped to the sequence
//! - `has_more` = `(skip + max) < len`

use serde::{Deserialize, Serialize};

/// A windowed result: a subsequence plus the total count and a has-more flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in this window
    pub items: Vec<T>,
    /// Total number of items in the underlying sequence
    pub num_items: usize,
    /// Whether unreturned items remain past this window
    pub has_more: bool,
}

impl<T> Page<T> {
    /// An empty page over an empty sequence
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            num_items: 0,
            has_more: false,
        }
    }
}

/// Window an ordered sequence by skip count and maximum item count
pub fn window<T>(items: Vec<T>, max_items: Option<i64>, skip_count: Option<i64>) -> Page<T> {
    let num_items = items.len();
    let skip = skip_count.unwrap_or(0).max(0) as usize;
    let max = match max_items {
        Some(m) if m >= 0 => m as usize,
        _ => usize::MAX,
    };

    let windowed: Vec<T> = items.into_iter().skip(skip).take(max).collect();
    let has_more = skip.saturating_add(max) < num_items;

    Page {
        items: windowed,
        num_items,
        has_more,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_window_basic() {
        let page = window(vec![1, 2, 3, 4, 5], Some(2), Some(1));
        assert_eq!(page.items, vec![2, 3]);
        assert_eq!(page.num_items, 5);
        assert!(page.has_more);
    }

    #[test]
    fn test_window_defaults_are_unbounded() {
        let page = window(vec![1, 2, 3], None, None);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.num_items, 3);
        assert!(!page.has_more);
    }

    #[test]
    fn test_negative_values_are_defaults() {
        let page = window(vec![1, 2, 3], Some(-1), Some(-5));
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(!page.has_more);
    }

    #[test]
    fn test_skip_past_end_is_empty() {
        let page = window(vec![1, 2, 3], Some(10), Some(3));
        assert!(page.items.is_empty());
        assert_eq!(page.num_items, 3);
        assert!(!page.has_more);
    }

    #[test]
    fn test_exact_boundary_has_no_more() {
        let page = window(vec![1, 2, 3], Some(2), Some(1));
        assert_eq!(page.items, vec![2, 3]);
        assert!(!page.has_more);
    }

    proptest! {
        #[test]
        fn prop_window_size_and_has_more(
            len in 0usize..200,
            skip in -10i64..250,
            max in -10i64..250,
        ) {
            let items: Vec<usize> = (0..len).collect();
            let page = window(items, Some(max), Some(skip));

            let eff_skip = skip.max(0) as usize;
            let eff_max = if max < 0 { usize::MAX } else { max as usize };

            let expected_len = eff_max.min(len.saturating_sub(eff_skip));
            prop_assert_eq!(page.items.len(), expected_len);
            prop_assert_eq!(page.num_items, len);
            prop_assert_eq!(page.has_more, eff_skip.saturating_add(eff_max) < len);

            // The window is the contiguous run starting at the skip offset
            for (i, v) in page.items.iter().enumerate() {
                prop_assert_eq!(*v, eff_skip + i);
            }
        }
    }
}
