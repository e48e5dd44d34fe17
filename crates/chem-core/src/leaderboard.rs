//! Leaderboard ranking.
//!
//! Ranking is a stable ascending sort on IC50: equal scores keep the order in
//! which they were submitted, so repeated renders never shuffle ties.
//! Positions are 1-based; the first three carry a [`Medal`].

use serde::Serialize;

use crate::entities::CompoundEntry;
use crate::enums::Medal;

/// One row of the ranked leaderboard, borrowing the underlying entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedEntry<'a> {
    /// 1-based position.
    pub position: usize,
    pub medal: Option<Medal>,
    pub entry: &'a CompoundEntry,
}

/// Rank entries by ascending IC50, keeping insertion order for ties.
///
/// Total: never fails, including for empty input. Non-finite scores (which
/// valid entries never carry) sort after every finite score.
#[must_use]
pub fn rank(entries: &[CompoundEntry]) -> Vec<RankedEntry<'_>> {
    let mut ordered: Vec<&CompoundEntry> = entries.iter().collect();
    // `sort_by` is stable.
    ordered.sort_by(|a, b| a.ic50.total_cmp(&b.ic50));
    ordered
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let position = index + 1;
            RankedEntry {
                position,
                medal: Medal::for_position(position),
                entry,
            }
        })
        .collect()
}

/// Entries in ranked order, without positions.
#[must_use]
pub fn rank_order(entries: &[CompoundEntry]) -> Vec<CompoundEntry> {
    rank(entries)
        .into_iter()
        .map(|ranked| ranked.entry.clone())
        .collect()
}
