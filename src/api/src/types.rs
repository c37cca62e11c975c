//! Race data types as exported by the race-detail endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Weather at the time of a past start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    Clear,
    Overcast,
    Rain,
}

impl Weather {
    /// Label used on the wire and in the UI (晴, 曇, 雨)
    pub fn label(&self) -> &'static str {
        match self {
            Weather::Clear => "晴",
            Weather::Overcast => "曇",
            Weather::Rain => "雨",
        }
    }
}

impl FromStr for Weather {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "晴" | "clear" => Ok(Weather::Clear),
            "曇" | "overcast" => Ok(Weather::Overcast),
            "雨" | "小雨" | "rain" => Ok(Weather::Rain),
            other => Err(format!("unknown weather: {:?}", other)),
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Track surface state (良, 稍重, 重, 不良)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroundCondition {
    Good,
    SlightlyHeavy,
    Heavy,
    Bad,
}

impl GroundCondition {
    pub fn label(&self) -> &'static str {
        match self {
            GroundCondition::Good => "良",
            GroundCondition::SlightlyHeavy => "稍重",
            GroundCondition::Heavy => "重",
            GroundCondition::Bad => "不良",
        }
    }
}

impl FromStr for GroundCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "良" | "good" => Ok(GroundCondition::Good),
            // The UI checkbox uses the one-character form
            "稍重" | "稍" | "slightly-heavy" => Ok(GroundCondition::SlightlyHeavy),
            "重" | "heavy" => Ok(GroundCondition::Heavy),
            "不良" | "bad" => Ok(GroundCondition::Bad),
            other => Err(format!("unknown ground condition: {:?}", other)),
        }
    }
}

impl fmt::Display for GroundCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

macro_rules! label_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

label_serde!(Weather);
label_serde!(GroundCondition);

/// Optional label: null, blank or unrecognized text becomes `None`.
///
/// Weather and ground columns are nullable upstream and netkeiba reports
/// conditions outside the filterable set (雪, 小雪), so one odd start
/// must not reject the whole race.
fn lenient_label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = String>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse() {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!("Treating {} as unset", e);
            Ok(None)
        }
    }
}

/// Null becomes an empty string
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a number, a numeric string, an empty string or null.
///
/// Sectional times are stored as text by the scraper ("34.5"), so they
/// arrive as strings while odds arrive as numbers.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrText {
        Num(f64),
        Text(String),
    }

    match Option::<NumOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumOrText::Num(n)) => Ok(Some(n)),
        Some(NumOrText::Text(t)) => {
            let t = t.trim();
            if t.is_empty() {
                Ok(None)
            } else {
                t.parse().map(Some).map_err(serde::de::Error::custom)
            }
        }
    }
}

/// One historical start of a horse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastRace {
    #[serde(default)]
    pub past_race_id: Option<String>,
    pub race_date: NaiveDate,
    pub venue_name: String,
    pub race_name: String,
    #[serde(default)]
    pub race_grade_score: Option<f64>,
    /// None when not recorded or outside 晴/曇/雨
    #[serde(default, deserialize_with = "lenient_label")]
    pub weather: Option<Weather>,
    /// Surface-prefixed course, e.g. "芝2000" or "ダ1800"
    #[serde(default, deserialize_with = "null_as_empty")]
    pub distance: String,
    #[serde(default)]
    pub head_count: Option<u8>,
    /// Finish position; None when there was no official finish
    #[serde(default)]
    pub rank: Option<u8>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last_3f: Option<f64>,
    #[serde(default)]
    pub last_3f_rank: Option<u8>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub odds: Option<f64>,
    #[serde(default)]
    pub popularity: Option<u8>,
    #[serde(default)]
    pub umaban: Option<u8>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub ground_condition: Option<GroundCondition>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub jockey_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub jockey_id: String,
    #[serde(default)]
    pub time: Option<String>,
}

/// Horse with its past starts, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horse {
    pub horse_id: String,
    pub horse_name: String,
    #[serde(default)]
    pub past_races: Vec<PastRace>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jockey {
    pub jockey_id: String,
    pub jockey_name: String,
}

/// Starter in the current race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub horse: Horse,
    /// None until the rider is announced
    #[serde(default)]
    pub jockey: Option<Jockey>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub odds: Option<f64>,
    #[serde(default)]
    pub popularity: Option<u8>,
    #[serde(default)]
    pub umaban: Option<u8>,
    #[serde(default)]
    pub waku: Option<u8>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weight_carried: Option<f64>,
    #[serde(default)]
    pub horse_past_race_grade_score_total: Option<f64>,
}

/// Race detail aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceData {
    pub race_id: String,
    #[serde(default)]
    pub race_name: Option<String>,
    #[serde(default)]
    pub race_date: Option<NaiveDate>,
    #[serde(default)]
    pub race_number: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub course_details: Option<String>,
    /// Raw condition text from the race card
    #[serde(default)]
    pub ground_condition: Option<String>,
    #[serde(default)]
    pub head_count: Option<u8>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter_past_races, FilterCriteria};

    const SAMPLE_JSON: &str = r#"{
        "race_id": "202305050811",
        "race_name": "ジャパンカップ",
        "race_date": "2023-11-26",
        "venue": "東京",
        "course_details": "芝2400m",
        "ground_condition": "良",
        "entries": [
            {
                "waku": 1,
                "umaban": 2,
                "weight_carried": 58.0,
                "odds": 1.3,
                "popularity": 1,
                "horse": {
                    "horse_id": "2019105219",
                    "horse_name": "イクイノックス",
                    "past_races": [
                        {
                            "past_race_id": "202305040911",
                            "race_date": "2023-10-29",
                            "venue_name": "東京",
                            "race_name": "天皇賞(秋)",
                            "weather": "晴",
                            "distance": "芝2000",
                            "head_count": 11,
                            "rank": 1,
                            "last_3f": "34.2",
                            "odds": 1.3,
                            "popularity": 1,
                            "umaban": 7,
                            "ground_condition": "良",
                            "jockey_name": "ルメール",
                            "jockey_id": "05339",
                            "time": "1:55.2"
                        },
                        {
                            "race_date": "2023-06-25",
                            "venue_name": "阪神",
                            "race_name": "宝塚記念",
                            "weather": "曇",
                            "distance": "芝2200",
                            "rank": null,
                            "last_3f": "",
                            "ground_condition": null,
                            "jockey_name": "ルメール",
                            "jockey_id": "05339"
                        }
                    ]
                },
                "jockey": {"jockey_id": "05339", "jockey_name": "ルメール"}
            }
        ]
    }"#;

    #[test]
    fn test_parse_race_data() {
        let race: RaceData = serde_json::from_str(SAMPLE_JSON).unwrap();

        assert_eq!(race.race_id, "202305050811");
        assert_eq!(race.entries.len(), 1);

        let horse = &race.entries[0].horse;
        assert_eq!(horse.horse_name, "イクイノックス");
        assert_eq!(horse.past_races.len(), 2);

        let latest = &horse.past_races[0];
        assert_eq!(latest.weather, Some(Weather::Clear));
        assert_eq!(latest.ground_condition, Some(GroundCondition::Good));
        assert_eq!(latest.last_3f, Some(34.2));
        assert_eq!(latest.rank, Some(1));

        let second = &horse.past_races[1];
        assert_eq!(second.rank, None);
        assert_eq!(second.last_3f, None);
        assert_eq!(second.ground_condition, None);
    }

    #[test]
    fn test_unknown_weather_label_is_unset() {
        let json = SAMPLE_JSON.replace("\"晴\"", "\"雪\"");
        let race: RaceData = serde_json::from_str(&json).unwrap();
        assert_eq!(race.entries[0].horse.past_races[0].weather, None);
    }

    const NULLABLE_JSON: &str = r#"{
        "race_id": "202406050811",
        "entries": [
            {
                "horse": {
                    "horse_id": "2020104567",
                    "horse_name": "テストホース",
                    "past_races": [
                        {
                            "race_date": "2024-03-10",
                            "venue_name": "中山",
                            "race_name": "弥生賞",
                            "weather": null,
                            "distance": null,
                            "rank": 2,
                            "ground_condition": "",
                            "jockey_name": null,
                            "jockey_id": null
                        }
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn test_nullable_past_race_fields_load() {
        let race: RaceData = serde_json::from_str(NULLABLE_JSON).unwrap();

        let races = &race.entries[0].horse.past_races;
        assert_eq!(races[0].weather, None);
        assert_eq!(races[0].ground_condition, None);
        assert_eq!(races[0].distance, "");
        assert_eq!(races[0].jockey_name, "");
        assert_eq!(races[0].jockey_id, "");

        // Unset values never exclude anything under the default criteria
        let kept = filter_past_races(races, &FilterCriteria::default());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_light_rain_counts_as_rain() {
        let json = SAMPLE_JSON.replace("\"晴\"", "\"小雨\"");
        let race: RaceData = serde_json::from_str(&json).unwrap();
        assert_eq!(race.entries[0].horse.past_races[0].weather, Some(Weather::Rain));
    }

    #[test]
    fn test_condition_aliases() {
        assert_eq!("稍".parse::<GroundCondition>(), Ok(GroundCondition::SlightlyHeavy));
        assert_eq!("稍重".parse::<GroundCondition>(), Ok(GroundCondition::SlightlyHeavy));
        assert_eq!("heavy".parse::<GroundCondition>(), Ok(GroundCondition::Heavy));
        assert_eq!("rain".parse::<Weather>(), Ok(Weather::Rain));
        assert!("".parse::<Weather>().is_err());
    }

    #[test]
    fn test_labels_serialize_as_japanese() {
        let json = serde_json::to_string(&GroundCondition::SlightlyHeavy).unwrap();
        assert_eq!(json, "\"稍重\"");
        assert_eq!(Weather::Overcast.to_string(), "曇");
    }
}
