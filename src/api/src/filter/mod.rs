//! Filter and facet engine for past-performance records.
//!
//! - `criteria`: the selection value and its pure updates
//! - `store`: the single-slot holder a view mutates
//! - `engine`: (past races, criteria) -> displayed subset
//! - `facets`: option lists derived from the loaded race

pub mod criteria;
pub mod engine;
pub mod facets;
pub mod store;

pub use criteria::{
    CriteriaError, CriteriaField, FilterCriteria, SetMember, MAX_RANK, MAX_RECENT_RACES,
    VENUE_ALL,
};
pub use engine::{filter_entry, filter_past_races, has_jockey};
pub use facets::{all_past_races, venue_options, VenueFacets, GROUND_OPTIONS, WEATHER_OPTIONS};
pub use store::CriteriaStore;
