//! Saved game state: the roster, the encounter ledger and the evolution counter.
//!
//! JSON is the save-file format. The same snapshot also has a compact postcard
//! encoding for hosts that keep state in memory or ship it over a wire.

use crate::errors::{PersistenceError, PersistenceResult};
use schema::{CreatureTemplate, PokedexEntry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

const SAVE_PREFIX: &str = "save_";
const SAVE_EXTENSION: &str = ".json";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveData {
    pub pokedex: Vec<PokedexEntry>,
    pub pokemon_list: Vec<CreatureTemplate>,
    #[serde(default)]
    pub evolution_count: u32,
}

fn io_error(path: &Path, err: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

impl SaveData {
    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_bytes(&self) -> PersistenceResult<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> PersistenceResult<Self> {
        Ok(postcard::from_bytes(bytes)?)
    }

    pub fn save_to_path(&self, path: &Path) -> PersistenceResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        fs::write(path, self.to_json()?).map_err(|e| io_error(path, e))?;
        info!(
            path = %path.display(),
            creatures = self.pokemon_list.len(),
            pokedex = self.pokedex.len(),
            "game saved"
        );
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> PersistenceResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        let data = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            creatures = data.pokemon_list.len(),
            pokedex = data.pokedex.len(),
            "game loaded"
        );
        Ok(data)
    }
}

/// A save file found in a `SaveStore` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub filename: String,
    pub path: PathBuf,
    /// The stamp between the `save_` prefix and the extension.
    pub stamp: String,
}

/// A directory of timestamped save files (`save_<unix seconds>.json`).
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a new save file and return its path. Never overwrites an existing save.
    pub fn save_new(&self, data: &SaveData) -> PersistenceResult<PathBuf> {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let mut stamp = format!("{:012}", seconds);
        let mut suffix = 1;
        while self.path_for(&stamp).exists() {
            stamp = format!("{:012}_{}", seconds, suffix);
            suffix += 1;
        }

        let path = self.path_for(&stamp);
        data.save_to_path(&path)?;
        Ok(path)
    }

    fn path_for(&self, stamp: &str) -> PathBuf {
        self.dir.join(format!("{}{}{}", SAVE_PREFIX, stamp, SAVE_EXTENSION))
    }

    /// Saves in the directory, newest first. A missing directory has no saves.
    pub fn list(&self) -> PersistenceResult<Vec<SaveSlot>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let mut slots = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(&self.dir, e))?;
            let filename = entry.file_name().to_string_lossy().into_owned();
            let Some(stamp) = filename
                .strip_prefix(SAVE_PREFIX)
                .and_then(|rest| rest.strip_suffix(SAVE_EXTENSION))
            else {
                continue;
            };
            slots.push(SaveSlot {
                stamp: stamp.to_string(),
                path: entry.path(),
                filename,
            });
        }
        slots.sort_by(|a, b| b.stamp.cmp(&a.stamp));
        Ok(slots)
    }

    /// Delete a save. Deleting a file that is already gone is not an error.
    pub fn delete(&self, path: &Path) -> PersistenceResult<()> {
        if path.is_file() {
            fs::remove_file(path).map_err(|e| io_error(path, e))?;
            info!(path = %path.display(), "save deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{ElementType, MoveTemplate};
    use tempfile::tempdir;

    fn sample() -> SaveData {
        let mut charmander = CreatureTemplate::basic("Charmander", 39, 52, 43, vec![ElementType::Fire]);
        charmander.evolution_level = Some(16);
        charmander.evolution_target = Some("Charmeleon".to_string());
        charmander.xp = 12;
        charmander.moves = vec![MoveTemplate {
            name: "Ember".to_string(),
            move_type: ElementType::Fire,
            power: 40,
            accuracy: 100,
        }];
        let mut mew = CreatureTemplate::basic("Mew", 100, 100, 100, vec![ElementType::Psychic]);
        mew.locked = true;

        SaveData {
            pokedex: vec![PokedexEntry {
                name: "Rattata".to_string(),
                types: vec![ElementType::Normal],
                hp: 30,
                attack: 56,
                defense: 35,
            }],
            pokemon_list: vec![charmander, mew],
            evolution_count: 3,
        }
    }

    #[test]
    fn test_json_round_trip() {
        let data = sample();
        let json = data.to_json().unwrap();
        assert!(json.contains("\"pokemon_list\""));
        assert!(json.contains("\"fire\""));
        assert_eq!(SaveData::from_json(&json).unwrap(), data);
    }

    #[test]
    fn test_binary_round_trip() {
        let data = sample();
        let bytes = data.to_bytes().unwrap();
        assert_eq!(SaveData::from_bytes(&bytes).unwrap(), data);
    }

    #[test]
    fn test_missing_evolution_count_defaults_to_zero() {
        let json = r#"{"pokedex": [], "pokemon_list": [{"name": "Pidgey", "hp": 40, "attack": 45, "defense": 40}]}"#;
        let data = SaveData::from_json(json).unwrap();
        assert_eq!(data.evolution_count, 0);
        assert_eq!(data.pokemon_list[0].level, 5);
        assert_eq!(data.pokemon_list[0].types, vec![ElementType::Normal]);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            SaveData::from_json("{\"pokedex\": 3}"),
            Err(PersistenceError::Json(_))
        ));
        assert!(matches!(
            SaveData::from_bytes(&[0xff, 0xff, 0xff]),
            Err(PersistenceError::Binary(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("game.json");
        let data = sample();

        data.save_to_path(&path).unwrap();
        assert_eq!(SaveData::load_from_path(&path).unwrap(), data);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = SaveData::load_from_path(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
    }

    #[test]
    fn test_save_store_lists_newest_first_and_deletes() {
        let dir = tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("saves"));
        assert!(store.list().unwrap().is_empty());

        let first = store.save_new(&sample()).unwrap();
        let second = store.save_new(&SaveData::default()).unwrap();
        assert_ne!(first, second);
        fs::write(store.dir().join("notes.txt"), "ignored").unwrap();

        let slots = store.list().unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].path, second);
        assert_eq!(slots[1].path, first);
        assert!(slots[1].filename.starts_with("save_"));

        store.delete(&second).unwrap();
        store.delete(&second).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(SaveData::load_from_path(&first).unwrap(), sample());
    }
}
