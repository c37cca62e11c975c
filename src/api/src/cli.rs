//! CLI commands for keiba-filter.
//!
//! `show` prints each entry's past races under a set of filters,
//! `facets` prints the options the filter controls would offer.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use keiba_filter::config::AppConfig;
use keiba_filter::filter::{
    CriteriaError, CriteriaField, CriteriaStore, FilterCriteria, VenueFacets, GROUND_OPTIONS,
    MAX_RANK, WEATHER_OPTIONS,
};
use keiba_filter::loader::RaceLoader;
use keiba_filter::race_id::extract_race_id;
use keiba_filter::types::{GroundCondition, PastRace, RaceData, Weather};
use keiba_filter::view::{compose_race_view, EntryOrder, RaceView};

#[derive(Parser)]
#[command(name = "keiba-filter")]
#[command(version, about = "Keiba filter: narrow past performances of race entries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show entries with their filtered past races
    Show {
        /// Race export file, race URL or race id
        #[arg(value_name = "RACE")]
        race: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// List entries with the most top-3 finishes first
        #[arg(long)]
        sort_by_form: bool,

        /// Output format (json, table)
        #[arg(short, long)]
        format: Option<String>,

        /// Directory holding <race_id>.json exports
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// List the filter options available for a race
    Facets {
        /// Race export file, race URL or race id
        #[arg(value_name = "RACE")]
        race: String,

        /// Output format (json, table)
        #[arg(short, long)]
        format: Option<String>,

        /// Directory holding <race_id>.json exports
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

/// Filter flags; anything omitted stays at its default
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Venue name (default: all)
    #[arg(long)]
    pub venue: Option<String>,

    /// Keep finishes at or better than this rank (1-18)
    #[arg(long)]
    pub rank: Option<u8>,

    /// Course substring, e.g. 2000 or 芝
    #[arg(long)]
    pub distance: Option<String>,

    /// Weather (晴, 曇, 雨 or clear, overcast, rain)
    #[arg(long, value_delimiter = ',')]
    pub weather: Vec<Weather>,

    /// Ground condition (良, 稍重, 重, 不良 or good, slightly-heavy, heavy, bad)
    #[arg(long = "ground", value_delimiter = ',')]
    pub ground: Vec<GroundCondition>,

    /// Number of most recent starts considered (1-10)
    #[arg(long)]
    pub recent: Option<usize>,

    /// Only starts ridden by the entry's current jockey
    #[arg(long)]
    pub jockey_match: bool,
}

impl FilterArgs {
    /// Feed the flags through the store and return the resulting criteria
    pub fn apply(&self, store: &CriteriaStore) -> Result<Arc<FilterCriteria>, CriteriaError> {
        if let Some(venue) = &self.venue {
            store.set_field(CriteriaField::Venue(venue.clone()))?;
        }
        if let Some(rank) = self.rank {
            store.set_field(CriteriaField::Rank(rank))?;
        }
        if let Some(distance) = &self.distance {
            store.set_field(CriteriaField::Distance(distance.clone()))?;
        }
        if !self.weather.is_empty() {
            store.set_field(CriteriaField::Weather(self.weather.clone()))?;
        }
        if !self.ground.is_empty() {
            store.set_field(CriteriaField::GroundCondition(self.ground.clone()))?;
        }
        if let Some(recent) = self.recent {
            store.set_field(CriteriaField::RecentRaces(recent))?;
        }
        if self.jockey_match {
            store.set_field(CriteriaField::JockeyMatch(true))?;
        }
        Ok(store.snapshot())
    }
}

/// Resolve a file path, URL or race id to loaded race data
fn load_race(input: &str, data_dir: &Path) -> anyhow::Result<RaceData> {
    let path = Path::new(input);
    if path.is_file() {
        return Ok(RaceLoader::load_file(path)?);
    }

    let race_id = extract_race_id(input)
        .with_context(|| format!("No race id found in {:?}", input))?;
    tracing::debug!("Resolved race id {} from {:?}", race_id, input);

    Ok(RaceLoader::new(data_dir).load(&race_id)?)
}

fn resolve_data_dir(config: &AppConfig, data_dir: Option<PathBuf>) -> PathBuf {
    data_dir.unwrap_or_else(|| PathBuf::from(&config.data.dir))
}

/// Run `show`.
pub fn run_show(
    config: &AppConfig,
    race: String,
    filters: FilterArgs,
    sort_by_form: bool,
    format: Option<String>,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let data_dir = resolve_data_dir(config, data_dir);
    let race = load_race(&race, &data_dir)?;

    let store = CriteriaStore::new();
    let criteria = filters.apply(&store).context("Invalid filter")?;

    let order = if sort_by_form || config.display.sort_by_form {
        EntryOrder::Form
    } else {
        EntryOrder::AsListed
    };
    let view = compose_race_view(&race, &criteria, order);

    if !view.jockey_control && criteria.jockey_match {
        tracing::warn!("No entry has a jockey yet; --jockey-match has no effect");
    }

    match format.as_deref().unwrap_or(&config.display.format) {
        "json" => println!("{}", serde_json::to_string_pretty(&view)?),
        _ => print_race_table(&view),
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct FacetsOutput<'a> {
    race_id: &'a str,
    venues: &'a [String],
    weather: Vec<&'static str>,
    ground_condition: Vec<&'static str>,
    max_rank: u8,
    jockey_control: bool,
}

/// Run `facets`.
pub fn run_facets(
    config: &AppConfig,
    race: String,
    format: Option<String>,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let data_dir = resolve_data_dir(config, data_dir);
    let race = Arc::new(load_race(&race, &data_dir)?);

    let mut facets = VenueFacets::new();
    let output = FacetsOutput {
        race_id: &race.race_id,
        venues: facets.options_for(&race),
        weather: WEATHER_OPTIONS.iter().map(|w| w.label()).collect(),
        ground_condition: GROUND_OPTIONS.iter().map(|g| g.label()).collect(),
        max_rank: MAX_RANK,
        jockey_control: keiba_filter::filter::has_jockey(&race.entries),
    };

    match format.as_deref().unwrap_or(&config.display.format) {
        "json" => println!("{}", serde_json::to_string_pretty(&output)?),
        _ => {
            println!("=== Filter Options: {} ===", output.race_id);
            println!("  Venues:      {}", output.venues.join(", "));
            println!("  Weather:     {}", output.weather.join(", "));
            println!("  Ground:      {}", output.ground_condition.join(", "));
            println!("  Max Rank:    {}", output.max_rank);
            println!(
                "  Jockey Match: {}",
                if output.jockey_control { "available" } else { "unavailable" }
            );
        }
    }

    Ok(())
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn describe_criteria(c: &FilterCriteria) -> String {
    let mut parts = vec![
        format!("venue={}", c.venue),
        format!("rank<={}", c.rank),
        format!("recent={}", c.recent_races),
    ];
    if !c.distance.is_empty() {
        parts.push(format!("distance~{}", c.distance));
    }
    if !c.weather.is_empty() {
        let labels: Vec<_> = c.weather.iter().map(|w| w.label()).collect();
        parts.push(format!("weather={}", labels.join("/")));
    }
    if !c.ground_condition.is_empty() {
        let labels: Vec<_> = c.ground_condition.iter().map(|g| g.label()).collect();
        parts.push(format!("ground={}", labels.join("/")));
    }
    if c.jockey_match {
        parts.push("jockey-match".to_string());
    }
    parts.join(" ")
}

fn print_past_race(r: &PastRace) {
    println!(
        "    {:10} {:8} {:20} {:4} {:8} {:4} {:>5} {:>4} {:>6} {:>6} {:>4} {:>4} {}",
        r.race_date.format("%Y-%m-%d").to_string(),
        r.venue_name,
        r.race_name,
        r.weather.map(|w| w.label()).unwrap_or("-"),
        r.distance,
        r.ground_condition.map(|g| g.label()).unwrap_or("-"),
        opt(r.head_count),
        opt(r.rank),
        opt(r.last_3f),
        opt(r.odds),
        opt(r.popularity),
        opt(r.umaban),
        r.jockey_name
    );
}

/// Print race view as a table
pub fn print_race_table(view: &RaceView) {
    println!(
        "=== {} {} ===",
        view.race_id,
        view.race_name.unwrap_or_default()
    );
    println!("Filters: {}", describe_criteria(&view.criteria));
    println!();

    for entry in &view.entries {
        println!(
            "[{}] {}  Jockey: {}  Odds: {}  Popularity: {}",
            opt(entry.umaban),
            entry.horse_name,
            entry.jockey_name.unwrap_or("TBD"),
            opt(entry.odds),
            opt(entry.popularity)
        );
        println!("  Past races ({} shown)", entry.shown);
        if entry.past_races.is_empty() {
            println!();
            continue;
        }
        println!(
            "    {:10} {:8} {:20} {:4} {:8} {:4} {:>5} {:>4} {:>6} {:>6} {:>4} {:>4} {}",
            "Date", "Venue", "Race", "Wx", "Course", "Grnd", "Heads", "Rank", "3F", "Odds", "Pop",
            "No", "Jockey"
        );
        println!("    {}", "-".repeat(110));
        for r in &entry.past_races {
            print_past_race(r);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_apply() {
        let args = FilterArgs {
            venue: Some("東京".to_string()),
            rank: Some(3),
            weather: vec![Weather::Clear, Weather::Rain],
            recent: Some(5),
            ..Default::default()
        };
        let store = CriteriaStore::new();
        let c = args.apply(&store).unwrap();

        assert_eq!(c.venue, "東京");
        assert_eq!(c.rank, 3);
        assert_eq!(c.weather, vec![Weather::Clear, Weather::Rain]);
        assert_eq!(c.recent_races, 5);
        assert_eq!(c.distance, "");
        assert!(!c.jockey_match);
    }

    #[test]
    fn test_filter_args_rejects_out_of_range() {
        let args = FilterArgs {
            recent: Some(11),
            ..Default::default()
        };
        assert!(args.apply(&CriteriaStore::new()).is_err());
    }

    #[test]
    fn test_empty_args_yield_default() {
        let c = FilterArgs::default().apply(&CriteriaStore::new()).unwrap();
        assert!(c.is_default());
    }

    #[test]
    fn test_parse_show_command() {
        let cli = Cli::try_parse_from([
            "keiba-filter",
            "show",
            "202305050811",
            "--weather",
            "晴,rain",
            "--ground",
            "稍",
            "--rank",
            "3",
            "--jockey-match",
        ])
        .unwrap();

        match cli.command {
            Commands::Show { race, filters, .. } => {
                assert_eq!(race, "202305050811");
                assert_eq!(filters.weather, vec![Weather::Clear, Weather::Rain]);
                assert_eq!(filters.ground, vec![GroundCondition::SlightlyHeavy]);
                assert_eq!(filters.rank, Some(3));
                assert!(filters.jockey_match);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_describe_criteria() {
        let c = FilterCriteria::default()
            .with_field(CriteriaField::Distance("2000".to_string()))
            .unwrap();
        let text = describe_criteria(&c);
        assert!(text.contains("venue=all"));
        assert!(text.contains("distance~2000"));
        assert!(!text.contains("weather"));
    }
}
