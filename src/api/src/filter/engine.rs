//! Past-performance filtering.
//!
//! Steps run in a fixed order: the recent-race window is cut first and
//! every predicate only sees what survived it. Survivors keep their input
//! order; nothing is re-sorted.

use crate::types::{Entry, PastRace};

use super::criteria::{FilterCriteria, MAX_RANK, VENUE_ALL};

/// Filter a horse's past races (newest first) by `criteria`.
///
/// The jockey-match flag is ignored here since it needs the entry's
/// current rider; see [`filter_entry`].
pub fn filter_past_races<'a>(races: &'a [PastRace], criteria: &FilterCriteria) -> Vec<&'a PastRace> {
    races
        .iter()
        .take(criteria.recent_races)
        .filter(|r| venue_matches(r, criteria))
        .filter(|r| rank_matches(r, criteria))
        .filter(|r| distance_matches(r, criteria))
        .filter(|r| weather_matches(r, criteria))
        .filter(|r| ground_matches(r, criteria))
        .collect()
}

/// Filter an entry's past races, including the jockey step.
///
/// With `jockey_match` set, only starts ridden by the entry's current
/// jockey survive. An entry without an announced jockey is left as is.
pub fn filter_entry<'a>(entry: &'a Entry, criteria: &FilterCriteria) -> Vec<&'a PastRace> {
    let mut races = filter_past_races(&entry.horse.past_races, criteria);

    if criteria.jockey_match {
        if let Some(jockey) = &entry.jockey {
            races.retain(|r| r.jockey_id == jockey.jockey_id);
        }
    }

    races
}

/// True if any entry has a jockey, i.e. the jockey-match control is usable
pub fn has_jockey(entries: &[Entry]) -> bool {
    entries.iter().any(|e| e.jockey.is_some())
}

fn venue_matches(race: &PastRace, criteria: &FilterCriteria) -> bool {
    criteria.venue == VENUE_ALL || race.venue_name == criteria.venue
}

fn rank_matches(race: &PastRace, criteria: &FilterCriteria) -> bool {
    if criteria.rank >= MAX_RANK {
        return true;
    }
    matches!(race.rank, Some(rank) if rank <= criteria.rank)
}

fn distance_matches(race: &PastRace, criteria: &FilterCriteria) -> bool {
    // Plain substring: "2000" matches "芝2000" and "ダ2000"
    criteria.distance.is_empty() || race.distance.contains(criteria.distance.as_str())
}

fn weather_matches(race: &PastRace, criteria: &FilterCriteria) -> bool {
    if criteria.weather.is_empty() {
        return true;
    }
    match race.weather {
        Some(w) => criteria.weather.contains(&w),
        None => false,
    }
}

fn ground_matches(race: &PastRace, criteria: &FilterCriteria) -> bool {
    if criteria.ground_condition.is_empty() {
        return true;
    }
    match race.ground_condition {
        Some(g) => criteria.ground_condition.contains(&g),
        None => false,
    }
}
