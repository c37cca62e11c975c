//! Filter criteria value and its pure update operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{GroundCondition, Weather};

/// Venue selector meaning "no venue constraint"
pub const VENUE_ALL: &str = "all";

/// Largest selectable finish rank; selecting it disables the rank filter
pub const MAX_RANK: u8 = 18;

/// Largest and default recent-race window
pub const MAX_RECENT_RACES: usize = 10;

/// Error returned when a field update is out of range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    RankOutOfRange(u8),
    RecentRacesOutOfRange(usize),
}

impl fmt::Display for CriteriaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriteriaError::RankOutOfRange(v) => {
                write!(f, "Rank must be between 1 and {}, got {}", MAX_RANK, v)
            }
            CriteriaError::RecentRacesOutOfRange(v) => write!(
                f,
                "Recent races must be between 1 and {}, got {}",
                MAX_RECENT_RACES, v
            ),
        }
    }
}

impl std::error::Error for CriteriaError {}

/// Current filter selection for one race view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub venue: String,
    pub rank: u8,
    pub distance: String,
    pub weather: Vec<Weather>,
    pub ground_condition: Vec<GroundCondition>,
    pub recent_races: usize,
    pub jockey_match: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            venue: VENUE_ALL.to_string(),
            rank: MAX_RANK,
            distance: String::new(),
            weather: Vec::new(),
            ground_condition: Vec::new(),
            recent_races: MAX_RECENT_RACES,
            jockey_match: false,
        }
    }
}

/// Whole-value replacement for a single field
#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaField {
    Venue(String),
    Rank(u8),
    Distance(String),
    Weather(Vec<Weather>),
    GroundCondition(Vec<GroundCondition>),
    RecentRaces(usize),
    JockeyMatch(bool),
}

/// Member of one of the set-valued fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMember {
    Weather(Weather),
    GroundCondition(GroundCondition),
}

impl FilterCriteria {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Next criteria with one field replaced.
    ///
    /// Range violations leave `self` as the current value and return an error.
    pub fn with_field(&self, field: CriteriaField) -> Result<Self, CriteriaError> {
        let mut next = self.clone();
        match field {
            CriteriaField::Venue(v) => next.venue = v,
            CriteriaField::Rank(v) => {
                if !(1..=MAX_RANK).contains(&v) {
                    return Err(CriteriaError::RankOutOfRange(v));
                }
                next.rank = v;
            }
            CriteriaField::Distance(v) => next.distance = v,
            CriteriaField::Weather(v) => next.weather = dedup(v),
            CriteriaField::GroundCondition(v) => next.ground_condition = dedup(v),
            CriteriaField::RecentRaces(v) => {
                if !(1..=MAX_RECENT_RACES).contains(&v) {
                    return Err(CriteriaError::RecentRacesOutOfRange(v));
                }
                next.recent_races = v;
            }
            CriteriaField::JockeyMatch(v) => next.jockey_match = v,
        }
        Ok(next)
    }

    /// Next criteria with `member` added if absent, or removed if present
    pub fn with_toggled(&self, member: SetMember) -> Self {
        let mut next = self.clone();
        match member {
            SetMember::Weather(w) => toggle(&mut next.weather, w),
            SetMember::GroundCondition(g) => toggle(&mut next.ground_condition, g),
        }
        next
    }
}

fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) {
    match values.iter().position(|v| *v == value) {
        Some(idx) => {
            values.remove(idx);
        }
        None => values.push(value),
    }
}

/// Drop repeated values, keeping the first occurrence
fn dedup<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
