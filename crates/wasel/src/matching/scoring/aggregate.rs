use std::cmp::Ordering;

use super::super::domain::MatchResult;
use super::config::ScoreWeights;
use super::factors::{to_percent, FactorScores};

/// Weighted sum of the unrounded factor scores, rounded once at the end.
pub fn aggregate(scores: &FactorScores, weights: &ScoreWeights) -> u8 {
    let total = scores.route * weights.route()
        + scores.preferences * weights.preferences()
        + scores.rating * weights.rating()
        + scores.price * weights.price()
        + scores.timing * weights.timing();

    to_percent(total)
}

/// A scored result together with the keys used to order it.
#[derive(Debug, Clone)]
pub(crate) struct RankedEntry {
    pub(crate) result: MatchResult,
    pub(crate) price_per_seat: f64,
}

/// Orders by aggregate score (highest first), then cheaper seats first. The sort is stable,
/// so entries that still tie keep their input order.
pub(crate) fn sort_ranked(entries: &mut [RankedEntry]) {
    entries.sort_by(compare_entries);
}

fn compare_entries(left: &RankedEntry, right: &RankedEntry) -> Ordering {
    right
        .result
        .score
        .cmp(&left.result.score)
        .then_with(|| left.price_per_seat.total_cmp(&right.price_per_seat))
}
