//! Keiba filter - past-performance filtering for horse race entries
//!
//! This library provides:
//! - Race data types matching the race-detail JSON export
//! - Filter criteria with whole-value updates and a single-slot store
//! - The filter engine that narrows each horse's past races
//! - Facet option lists (venues, weather, ground condition)
//! - Entry ordering by recent form and race ID extraction
//!
//! # Example
//!
//! ```no_run
//! use keiba_filter::filter::{CriteriaField, CriteriaStore};
//! use keiba_filter::loader::RaceLoader;
//! use keiba_filter::view::{compose_race_view, EntryOrder};
//!
//! let race = RaceLoader::new("JSONfiles").load("202305050811").unwrap();
//! let store = CriteriaStore::new();
//! store.set_field(CriteriaField::Distance("2000".to_string())).unwrap();
//!
//! let view = compose_race_view(&race, &store.snapshot(), EntryOrder::AsListed);
//! for entry in &view.entries {
//!     println!("{}: {} records shown", entry.horse_name, entry.shown);
//! }
//! ```

pub mod config;
pub mod filter;
pub mod loader;
pub mod race_id;
pub mod summary;
pub mod types;
pub mod view;

pub use filter::{filter_entry, filter_past_races, CriteriaStore, FilterCriteria};
pub use loader::{LoadError, RaceLoader};
pub use types::{Entry, GroundCondition, Horse, Jockey, PastRace, RaceData, Weather};
