//! Race data loading from exported JSON files.
//!
//! The backend export writes one `<race_id>.json` per race; this reads
//! them back into [`RaceData`].

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::types::RaceData;

/// Why a race could not be loaded
#[derive(Debug)]
pub enum LoadError {
    /// No export exists for the race
    NotFound { race_id: String, path: PathBuf },
    Io { path: PathBuf, source: std::io::Error },
    /// File exists but does not match the race data schema
    Malformed { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound { race_id, path } => {
                write!(f, "Race not found: {} ({})", race_id, path.display())
            }
            LoadError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            LoadError::Malformed { path, source } => {
                write!(f, "Malformed race data in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::NotFound { .. } => None,
            LoadError::Io { source, .. } => Some(source),
            LoadError::Malformed { source, .. } => Some(source),
        }
    }
}

/// Loads race exports from a directory
pub struct RaceLoader {
    data_dir: PathBuf,
}

impl RaceLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Export path for a race id
    pub fn path_for(&self, race_id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", race_id))
    }

    /// Load a race by id
    pub fn load(&self, race_id: &str) -> Result<RaceData, LoadError> {
        let path = self.path_for(race_id);
        if !path.exists() {
            return Err(LoadError::NotFound {
                race_id: race_id.to_string(),
                path,
            });
        }
        Self::load_file(&path)
    }

    /// Load a race from an explicit file
    pub fn load_file(path: &Path) -> Result<RaceData, LoadError> {
        debug!("Reading race data from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let race: RaceData =
            serde_json::from_str(&content).map_err(|source| LoadError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        warn_unsorted(&race);
        info!(
            "Loaded race {} with {} entries",
            race.race_id,
            race.entries.len()
        );

        Ok(race)
    }
}

/// Past races are expected newest first; they are never re-sorted here.
fn warn_unsorted(race: &RaceData) {
    for entry in &race.entries {
        let races = &entry.horse.past_races;
        if races.windows(2).any(|w| w[0].race_date < w[1].race_date) {
            warn!(
                "Past races of {} are not newest first; recent-race window may be off",
                entry.horse.horse_id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"{
        "race_id": "202305050811",
        "entries": [
            {
                "horse": {"horse_id": "2019105219", "horse_name": "イクイノックス", "past_races": []},
                "jockey": null
            }
        ]
    }"#;

    #[test]
    fn test_load_by_id() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("202305050811.json"), MINIMAL).unwrap();

        let loader = RaceLoader::new(dir.path());
        let race = loader.load("202305050811").unwrap();

        assert_eq!(race.race_id, "202305050811");
        assert_eq!(race.entries.len(), 1);
        assert!(race.entries[0].jockey.is_none());
    }

    #[test]
    fn test_missing_race_is_not_found() {
        let dir = TempDir::new().unwrap();
        let loader = RaceLoader::new(dir.path());

        let err = loader.load("202305050812").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(err.to_string().contains("202305050812"));
    }

    #[test]
    fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"race_id": 1}"#).unwrap();

        let err = RaceLoader::load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn test_path_for() {
        let loader = RaceLoader::new("JSONfiles");
        assert_eq!(
            loader.path_for("202305050811"),
            PathBuf::from("JSONfiles/202305050811.json")
        );
    }
}
