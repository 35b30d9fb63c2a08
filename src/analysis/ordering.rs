//! Sprint ordering: ranks sprints by their position in the board listing.
//!
//! Sprint dates are optional in most trackers and sprint ids do not follow
//! manual reordering, so the listing order a board returns is the only order
//! trusted here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ports::SprintId;

/// Zero-based position of a sprint in the processing order.
pub type Rank = u32;

/// How rank sequences relate across boards within one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankScope {
    /// One counter for the whole project scan; ranks keep increasing from
    /// board to board and are comparable across boards.
    #[default]
    Project,
    /// Every board restarts at rank 0 and ranks only its own listing.
    Board,
}

/// Request-scoped rank accumulator threaded through the per-board calls.
#[derive(Debug, Default)]
pub struct RankCounter {
    next: Rank,
}

impl RankCounter {
    /// Creates a counter starting at rank 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn take(&mut self) -> Rank {
        let rank = self.next;
        self.next += 1;
        rank
    }

    fn reset(&mut self) {
        self.next = 0;
    }
}

/// `sprint_id -> rank` for every sprint seen during a run.
#[derive(Debug, Default)]
pub struct SprintRanks {
    scope: RankScope,
    ranks: HashMap<SprintId, Rank>,
}

impl SprintRanks {
    /// Creates an empty rank table for the given scope.
    #[must_use]
    pub fn new(scope: RankScope) -> Self {
        Self { scope, ranks: HashMap::new() }
    }

    /// Ranks one board's sprints in listing order, drawing from `counter`.
    ///
    /// Under [`RankScope::Project`] a sprint id seen before (on this board or
    /// an earlier one) keeps its first rank. Under [`RankScope::Board`] only
    /// repeats within this board keep their first rank; a sprint carried over
    /// from an earlier board is re-ranked by its position here, so ranks on one
    /// board never collide. Returns the ranks of `sprint_ids`, positionally.
    pub fn rank_board<I>(&mut self, counter: &mut RankCounter, sprint_ids: I) -> Vec<Rank>
    where
        I: IntoIterator<Item = SprintId>,
    {
        match self.scope {
            RankScope::Project => sprint_ids
                .into_iter()
                .map(|id| *self.ranks.entry(id).or_insert_with(|| counter.take()))
                .collect(),
            RankScope::Board => {
                counter.reset();
                let mut board: HashMap<SprintId, Rank> = HashMap::new();
                let assigned: Vec<Rank> = sprint_ids
                    .into_iter()
                    .map(|id| *board.entry(id).or_insert_with(|| counter.take()))
                    .collect();
                self.ranks.extend(board);
                assigned
            }
        }
    }

    /// Rank of a sprint, if it has been ranked.
    #[must_use]
    pub fn get(&self, sprint_id: SprintId) -> Option<Rank> {
        self.ranks.get(&sprint_id).copied()
    }

    /// Number of ranked sprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if no sprint has been ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ranks_follow_listing_order_not_ids() {
        let mut counter = RankCounter::new();
        let mut ranks = SprintRanks::new(RankScope::Project);

        let assigned = ranks.rank_board(&mut counter, [30, 10, 20]);

        assert_eq!(assigned, vec![0, 1, 2]);
        assert_eq!(ranks.get(30), Some(0));
        assert_eq!(ranks.get(10), Some(1));
        assert_eq!(ranks.get(20), Some(2));
    }

    #[test]
    fn project_scope_shares_counter_across_boards() {
        let mut counter = RankCounter::new();
        let mut ranks = SprintRanks::new(RankScope::Project);

        ranks.rank_board(&mut counter, [1, 2]);
        let second = ranks.rank_board(&mut counter, [3, 4]);

        assert_eq!(second, vec![2, 3]);
        assert_eq!(ranks.rank_board(&mut counter, [5]), vec![4]);
    }

    #[test]
    fn board_scope_restarts_each_board() {
        let mut counter = RankCounter::new();
        let mut ranks = SprintRanks::new(RankScope::Board);

        ranks.rank_board(&mut counter, [1, 2]);
        let second = ranks.rank_board(&mut counter, [3, 4]);

        assert_eq!(second, vec![0, 1]);
    }

    #[test]
    fn empty_board_contributes_nothing() {
        let mut counter = RankCounter::new();
        let mut ranks = SprintRanks::new(RankScope::Project);

        assert!(ranks.rank_board(&mut counter, Vec::<SprintId>::new()).is_empty());
        assert!(ranks.is_empty());
        assert_eq!(ranks.rank_board(&mut counter, [7]), vec![0]);
    }

    #[test]
    fn repeated_sprint_keeps_first_rank() {
        let mut counter = RankCounter::new();
        let mut ranks = SprintRanks::new(RankScope::Project);

        ranks.rank_board(&mut counter, [5, 6]);
        let shared = ranks.rank_board(&mut counter, [6, 7]);

        assert_eq!(shared, vec![1, 2]);
        assert_eq!(ranks.len(), 3);
    }

    #[test]
    fn board_scope_reranks_sprint_carried_from_earlier_board() {
        let mut counter = RankCounter::new();
        let mut ranks = SprintRanks::new(RankScope::Board);

        ranks.rank_board(&mut counter, [5, 6]);
        let second = ranks.rank_board(&mut counter, [6, 7, 8]);

        assert_eq!(second, vec![0, 1, 2]);
        assert_eq!(ranks.get(6), Some(0));
        assert_eq!(ranks.get(5), Some(0));
    }

    #[test]
    fn board_scope_keeps_first_rank_for_repeat_within_board() {
        let mut counter = RankCounter::new();
        let mut ranks = SprintRanks::new(RankScope::Board);

        assert_eq!(ranks.rank_board(&mut counter, [3, 4, 3, 9]), vec![0, 1, 0, 2]);
    }

    proptest! {
        #[test]
        fn project_ranks_strictly_increase_across_boards(
            boards in proptest::collection::vec(1usize..6, 0..6)
        ) {
            let mut counter = RankCounter::new();
            let mut ranks = SprintRanks::new(RankScope::Project);
            let mut next_id: SprintId = 0;
            let mut all = Vec::new();

            for size in boards {
                let ids: Vec<SprintId> = (next_id..next_id + size as SprintId).collect();
                next_id += size as SprintId;
                all.extend(ranks.rank_board(&mut counter, ids));
            }

            prop_assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert_eq!(all.first().copied().unwrap_or(0), 0);
        }

        #[test]
        fn board_ranks_strictly_increase_within_each_board(
            boards in proptest::collection::vec(proptest::collection::hash_set(0u64..12, 0..6), 0..6)
        ) {
            let mut counter = RankCounter::new();
            let mut ranks = SprintRanks::new(RankScope::Board);

            for ids in boards {
                let assigned = ranks.rank_board(&mut counter, ids);
                let expected: Vec<Rank> = (0..).take(assigned.len()).collect();
                prop_assert_eq!(assigned, expected);
            }
        }
    }
}
