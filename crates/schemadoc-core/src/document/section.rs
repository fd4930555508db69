//! Hierarchical section numbers.
//!
//! A [`SectionNumber`] is the positional path of a heading (`4.1.2`). A
//! [`SectionCounter`] hands out consecutive child numbers under a parent.
//! Numbers are only allocated for sections that are actually emitted, which
//! keeps every level contiguous when empty groups are skipped.

use std::fmt;

/// Positional path of a section. An empty path means "unnumbered".
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionNumber(Vec<u32>);

impl SectionNumber {
    pub fn new(parts: Vec<u32>) -> Self {
        Self(parts)
    }

    /// Returns the top-level section number `index`.
    pub fn top(index: u32) -> Self {
        Self(vec![index])
    }

    /// Returns the path extended by `index`.
    pub fn child(&self, index: u32) -> Self {
        let mut parts = self.0.clone();
        parts.push(index);
        Self(parts)
    }

    pub fn parts(&self) -> &[u32] {
        &self.0
    }

    /// Number of components in the path.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_numbered(&self) -> bool {
        !self.0.is_empty()
    }

    /// Last component of the path, if any.
    pub fn last(&self) -> Option<u32> {
        self.0.last().copied()
    }

    /// Renders only the last `count` components, dot-joined.
    ///
    /// Table headings show `{module}.{table}` without the leading section.
    pub fn display_tail(&self, count: usize) -> String {
        let skip = self.0.len().saturating_sub(count);
        join(&self.0[skip..])
    }
}

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.0))
    }
}

fn join(parts: &[u32]) -> String {
    parts
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Allocates consecutive child numbers below a parent section.
#[derive(Debug, Clone)]
pub struct SectionCounter {
    parent: SectionNumber,
    last: u32,
}

impl SectionCounter {
    /// Counter for top-level sections (`1`, `2`, ...).
    pub fn root() -> Self {
        Self::under(SectionNumber::default())
    }

    /// Counter for the children of `parent`.
    pub fn under(parent: SectionNumber) -> Self {
        Self { parent, last: 0 }
    }

    /// Allocates the next number.
    pub fn next_number(&mut self) -> SectionNumber {
        self.last += 1;
        self.parent.child(self.last)
    }

    /// Number of sections allocated so far.
    pub fn allocated(&self) -> u32 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SectionNumber::new(vec![4, 1, 2]).to_string(), "4.1.2");
        assert_eq!(SectionNumber::default().to_string(), "");
    }

    #[test]
    fn test_display_tail() {
        let number = SectionNumber::new(vec![4, 2, 3]);
        assert_eq!(number.display_tail(2), "2.3");
        assert_eq!(number.display_tail(5), "4.2.3");
        assert_eq!(number.display_tail(0), "");
    }

    #[test]
    fn test_counter_allocates_children() {
        let mut counter = SectionCounter::under(SectionNumber::top(4));
        assert_eq!(counter.next_number(), SectionNumber::new(vec![4, 1]));
        assert_eq!(counter.next_number(), SectionNumber::new(vec![4, 2]));
        assert_eq!(counter.allocated(), 2);
    }

    #[test]
    fn test_root_counter() {
        let mut counter = SectionCounter::root();
        assert_eq!(counter.next_number().to_string(), "1");
        assert_eq!(counter.next_number().to_string(), "2");
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn parent_strategy() -> impl Strategy<Value = SectionNumber> {
        prop::collection::vec(1u32..20, 0..4).prop_map(SectionNumber::new)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Consecutive allocations differ by exactly one in the last component.
    fn check_counter_is_contiguous(
        parent: SectionNumber,
        count: usize,
    ) -> Result<(), TestCaseError> {
        let mut counter = SectionCounter::under(parent.clone());
        let numbers: Vec<SectionNumber> = (0..count).map(|_| counter.next_number()).collect();

        for (index, number) in numbers.iter().enumerate() {
            prop_assert_eq!(number.depth(), parent.depth() + 1);
            prop_assert_eq!(&number.parts()[..parent.depth()], parent.parts());
            prop_assert_eq!(number.last(), Some(index as u32 + 1));
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn counter_is_contiguous(parent in parent_strategy(), count in 0usize..50) {
            check_counter_is_contiguous(parent, count)?;
        }
    }
}
