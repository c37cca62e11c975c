//! Per-entry filtered output handed to the renderer.

use serde::Serialize;

use crate::filter::{filter_entry, has_jockey, FilterCriteria};
use crate::summary::sort_entries_by_form;
use crate::types::{Entry, PastRace, RaceData};

/// One starter with the past races left after filtering
#[derive(Debug, Serialize)]
pub struct EntryView<'a> {
    pub horse_id: &'a str,
    pub horse_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jockey_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub umaban: Option<u8>,
    /// Number of records shown
    pub shown: usize,
    pub past_races: Vec<&'a PastRace>,
}

impl<'a> EntryView<'a> {
    pub fn new(entry: &'a Entry, criteria: &FilterCriteria) -> Self {
        let past_races = filter_entry(entry, criteria);
        Self {
            horse_id: &entry.horse.horse_id,
            horse_name: &entry.horse.horse_name,
            jockey_name: entry.jockey.as_ref().map(|j| j.jockey_name.as_str()),
            odds: entry.odds,
            popularity: entry.popularity,
            umaban: entry.umaban,
            shown: past_races.len(),
            past_races,
        }
    }
}

/// Whole race as displayed under one criteria value
#[derive(Debug, Serialize)]
pub struct RaceView<'a> {
    pub race_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_name: Option<&'a str>,
    /// Whether the jockey-match control should be offered
    pub jockey_control: bool,
    pub criteria: FilterCriteria,
    pub entries: Vec<EntryView<'a>>,
}

/// Entry ordering for the composed view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryOrder {
    /// As listed in the race data
    #[default]
    AsListed,
    /// Most top-3 finishes first
    Form,
}

pub fn compose_race_view<'a>(
    race: &'a RaceData,
    criteria: &FilterCriteria,
    order: EntryOrder,
) -> RaceView<'a> {
    let entries: Vec<&Entry> = match order {
        EntryOrder::AsListed => race.entries.iter().collect(),
        EntryOrder::Form => sort_entries_by_form(&race.entries),
    };

    RaceView {
        race_id: &race.race_id,
        race_name: race.race_name.as_deref(),
        jockey_control: has_jockey(&race.entries),
        criteria: criteria.clone(),
        entries: entries
            .into_iter()
            .map(|e| EntryView::new(e, criteria))
            .collect(),
    }
}
