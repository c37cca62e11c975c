//! Option lists offered by the filter controls.

use std::collections::HashSet;
use std::sync::{Arc, Weak};

use crate::types::{GroundCondition, PastRace, RaceData, Weather};

use super::criteria::VENUE_ALL;

/// Weather checkboxes, in display order
pub const WEATHER_OPTIONS: [Weather; 3] = [Weather::Clear, Weather::Overcast, Weather::Rain];

/// Ground-condition checkboxes, in display order
pub const GROUND_OPTIONS: [GroundCondition; 3] = [
    GroundCondition::Good,
    GroundCondition::SlightlyHeavy,
    GroundCondition::Heavy,
];

/// All past races of every entry, in entry order
pub fn all_past_races(race: &RaceData) -> impl Iterator<Item = &PastRace> {
    race.entries.iter().flat_map(|e| e.horse.past_races.iter())
}

/// "all" followed by each distinct venue in first-seen order
pub fn venue_options<'a, I>(races: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a PastRace>,
{
    let mut seen = HashSet::new();
    let mut options = vec![VENUE_ALL.to_string()];

    for race in races {
        if seen.insert(race.venue_name.as_str()) {
            options.push(race.venue_name.clone());
        }
    }

    options
}

/// Venue options memoized on the identity of the loaded race.
///
/// Holds only a weak reference, so a discarded race is not kept alive.
#[derive(Debug, Default)]
pub struct VenueFacets {
    source: Weak<RaceData>,
    options: Vec<String>,
}

impl VenueFacets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for `race`, recomputed only when a different race is passed
    pub fn options_for(&mut self, race: &Arc<RaceData>) -> &[String] {
        if !std::ptr::eq(self.source.as_ptr(), Arc::as_ptr(race)) {
            tracing::debug!("Recomputing venue options for race {}", race.race_id);
            self.options = venue_options(all_past_races(race));
            self.source = Arc::downgrade(race);
        }
        &self.options
    }
}
