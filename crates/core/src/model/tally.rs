use serde::{Deserialize, Serialize};

use crate::model::Category;

/// Running answer count per learning-style category.
///
/// Counters start at zero and only ever move up by one, so `total()` is
/// always the number of answers recorded so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTally {
    visual: u32,
    auditory: u32,
    logical: u32,
}

impl ScoreTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tally snapshot directly from counts.
    ///
    /// Useful for resolving a result outside of a quiz run.
    #[must_use]
    pub fn from_counts(visual: u32, auditory: u32, logical: u32) -> Self {
        Self {
            visual,
            auditory,
            logical,
        }
    }

    #[must_use]
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Visual => self.visual,
            Category::Auditory => self.auditory,
            Category::Logical => self.logical,
        }
    }

    pub(crate) fn increment(&mut self, category: Category) {
        let slot = match category {
            Category::Visual => &mut self.visual,
            Category::Auditory => &mut self.auditory,
            Category::Logical => &mut self.logical,
        };
        *slot = slot.saturating_add(1);
    }

    /// Sum of all counters, capped at `u32::MAX`.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.visual
            .saturating_add(self.auditory)
            .saturating_add(self.logical)
    }

    /// Categories ordered by count, highest first.
    ///
    /// Equal counts keep rank order (visual, auditory, logical).
    #[must_use]
    pub fn ranked(&self) -> [(Category, u32); 3] {
        let mut entries = Category::ALL.map(|category| (category, self.get(category)));
        // stable: ties stay in rank order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_one_category_at_a_time() {
        let mut tally = ScoreTally::new();
        tally.increment(Category::Logical);
        tally.increment(Category::Logical);
        tally.increment(Category::Visual);

        assert_eq!(tally.get(Category::Visual), 1);
        assert_eq!(tally.get(Category::Auditory), 0);
        assert_eq!(tally.get(Category::Logical), 2);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        assert_eq!(ScoreTally::from_counts(u32::MAX, 1, 0).total(), u32::MAX);
        assert_eq!(ScoreTally::from_counts(2, 2, 1).total(), 5);
    }

    #[test]
    fn ranked_sorts_descending() {
        let tally = ScoreTally::from_counts(1, 0, 4);
        let ranked = tally.ranked();
        assert_eq!(ranked[0], (Category::Logical, 4));
        assert_eq!(ranked[1], (Category::Visual, 1));
        assert_eq!(ranked[2], (Category::Auditory, 0));
    }

    #[test]
    fn ranked_keeps_rank_order_on_ties() {
        let tally = ScoreTally::from_counts(0, 2, 2);
        let ranked = tally.ranked();
        assert_eq!(ranked[0].0, Category::Auditory);
        assert_eq!(ranked[1].0, Category::Logical);
        assert_eq!(ranked[2].0, Category::Visual);
    }
}
