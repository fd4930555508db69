//! Insertion-ordered grouping.
//!
//! Groups keep the order in which their key was first seen, and members keep
//! their input order within a group. Members sharing a key coalesce into one
//! group even when they are not adjacent in the input.

use indexmap::IndexMap;

/// Group `items` by `key`, preserving first-seen order at both levels.
pub(crate) fn group_by_key<'a, T, I, F>(items: I, key: F) -> IndexMap<&'a str, Vec<&'a T>>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> &'a str,
    T: 'a,
{
    let mut groups: IndexMap<&'a str, Vec<&'a T>> = IndexMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_keep_first_seen_order() {
        let items = [("b", 1), ("a", 2), ("b", 3), ("c", 4), ("a", 5)];

        let groups = group_by_key(&items, |item| item.0);

        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);

        let members: Vec<i32> = groups["b"].iter().map(|item| item.1).collect();
        assert_eq!(members, vec![1, 3]);
        let members: Vec<i32> = groups["a"].iter().map(|item| item.1).collect();
        assert_eq!(members, vec![2, 5]);
    }

    #[test]
    fn test_empty_input() {
        let items: [(&str, i32); 0] = [];
        assert!(group_by_key(&items, |item| item.0).is_empty());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn keyed_items_strategy() -> impl Strategy<Value = Vec<(String, usize)>> {
        prop::collection::vec("[a-d]", 0..40).prop_map(|keys| {
            keys.into_iter()
                .enumerate()
                .map(|(index, key)| (key, index))
                .collect()
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Grouping neither drops nor reorders members, and keys are distinct.
    fn check_grouping_preserves_members(
        items: Vec<(String, usize)>,
    ) -> Result<(), TestCaseError> {
        let groups = group_by_key(&items, |item| item.0.as_str());

        let total: usize = groups.values().map(Vec::len).sum();
        prop_assert_eq!(total, items.len());

        for (key, members) in &groups {
            prop_assert!(!members.is_empty());
            prop_assert!(members.iter().all(|item| item.0 == *key));
            prop_assert!(members.windows(2).all(|pair| pair[0].1 < pair[1].1));
        }

        let firsts: Vec<usize> = groups.values().map(|members| members[0].1).collect();
        prop_assert!(firsts.windows(2).all(|pair| pair[0] < pair[1]));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn grouping_preserves_members(items in keyed_items_strategy()) {
            check_grouping_preserves_members(items)?;
        }
    }
}
