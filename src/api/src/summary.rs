//! Entry ordering by recent form.
//!
//! Entries are listed with the horses that placed most often first, ties
//! broken by the summed grade score of their past races.

use std::cmp::Ordering;

use crate::types::{Entry, Horse};

/// Number of past starts finishing 1st to 3rd
pub fn win_place_count(horse: &Horse) -> usize {
    horse
        .past_races
        .iter()
        .filter(|r| matches!(r.rank, Some(1..=3)))
        .count()
}

/// Summed past-race grade score.
///
/// Uses the precomputed total when the export carries one.
pub fn grade_score_total(entry: &Entry) -> f64 {
    entry.horse_past_race_grade_score_total.unwrap_or_else(|| {
        entry
            .horse
            .past_races
            .iter()
            .filter_map(|r| r.race_grade_score)
            .sum()
    })
}

/// Entries ordered by win/place count, then grade score, both descending.
///
/// Stable: entries that tie keep their original order.
pub fn sort_entries_by_form(entries: &[Entry]) -> Vec<&Entry> {
    let mut keyed: Vec<_> = entries
        .iter()
        .map(|e| (win_place_count(&e.horse), grade_score_total(e), e))
        .collect();

    keyed.sort_by(|a, b| match b.0.cmp(&a.0) {
        Ordering::Equal => b.1.total_cmp(&a.1),
        other => other,
    });

    keyed.into_iter().map(|(_, _, e)| e).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{entry, past_race};

    fn with_ranks(id: &str, ranks: &[Option<u8>]) -> Entry {
        let races = ranks
            .iter()
            .map(|&r| past_race("2023-05-01", "東京", r))
            .collect();
        entry(id, races, None)
    }

    #[test]
    fn test_win_place_count() {
        let e = with_ranks("a", &[Some(1), Some(3), Some(4), None, Some(2), Some(0)]);
        assert_eq!(win_place_count(&e.horse), 3);
    }

    #[test]
    fn test_grade_score_total_prefers_precomputed() {
        let mut e = with_ranks("a", &[Some(1), Some(2)]);
        e.horse.past_races[0].race_grade_score = Some(3.0);
        e.horse.past_races[1].race_grade_score = Some(1.5);
        assert_eq!(grade_score_total(&e), 4.5);

        e.horse_past_race_grade_score_total = Some(10.0);
        assert_eq!(grade_score_total(&e), 10.0);
    }

    #[test]
    fn test_sort_entries_by_form() {
        let mut tie_low = with_ranks("tie_low", &[Some(1), Some(9)]);
        tie_low.horse_past_race_grade_score_total = Some(1.0);
        let mut tie_high = with_ranks("tie_high", &[Some(2), Some(9)]);
        tie_high.horse_past_race_grade_score_total = Some(5.0);
        let best = with_ranks("best", &[Some(1), Some(2), Some(3)]);
        let none = with_ranks("none", &[Some(10)]);

        let entries = vec![none, tie_low, best, tie_high];
        let sorted: Vec<_> = sort_entries_by_form(&entries)
            .into_iter()
            .map(|e| e.horse.horse_id.as_str())
            .collect();

        assert_eq!(sorted, vec!["best", "tie_high", "tie_low", "none"]);
        // Source order untouched
        assert_eq!(entries[0].horse.horse_id, "none");
    }

    #[test]
    fn test_sort_is_stable_on_full_tie() {
        let entries = vec![with_ranks("x", &[Some(5)]), with_ranks("y", &[Some(6)])];
        let sorted = sort_entries_by_form(&entries);
        assert_eq!(sorted[0].horse.horse_id, "x");
        assert_eq!(sorted[1].horse.horse_id, "y");
    }
}
