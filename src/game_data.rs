//! Static game data: the bundled roster plus optional on-disk overrides.

use crate::errors::{GameResult, PersistenceError, PersistenceResult};
use crate::type_chart::TypeChart;
use schema::CreatureTemplate;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

pub const ROSTER_FILE: &str = "roster.ron";
pub const ROSTER_JSON_FILE: &str = "roster.json";
pub const TYPE_CHART_FILE: &str = "type_chart.json";

const EMBEDDED_ROSTER: &str = include_str!("../data/roster.ron");

static DEFAULT_ROSTER: LazyLock<PersistenceResult<Vec<CreatureTemplate>>> =
    LazyLock::new(|| parse_roster_ron(EMBEDDED_ROSTER));

/// The roster shipped with the crate.
pub fn default_roster() -> PersistenceResult<Vec<CreatureTemplate>> {
    DEFAULT_ROSTER.clone()
}

pub fn parse_roster_ron(content: &str) -> PersistenceResult<Vec<CreatureTemplate>> {
    Ok(ron::from_str(content)?)
}

pub fn parse_roster_json(content: &str) -> PersistenceResult<Vec<CreatureTemplate>> {
    Ok(serde_json::from_str(content)?)
}

fn read(path: &Path) -> PersistenceResult<String> {
    fs::read_to_string(path).map_err(|e| PersistenceError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Source data a session is built from.
#[derive(Debug, Clone)]
pub struct GameData {
    pub roster: Vec<CreatureTemplate>,
    pub type_chart: TypeChart,
}

impl GameData {
    pub fn embedded() -> GameResult<Self> {
        Ok(Self {
            roster: default_roster()?,
            type_chart: TypeChart::standard(),
        })
    }

    /// Load from `data_dir`, falling back to the bundled data for any file
    /// that is not there.
    pub fn load(data_dir: Option<&Path>) -> GameResult<Self> {
        let Some(dir) = data_dir else {
            return Self::embedded();
        };
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "data directory not found, using bundled data");
            return Self::embedded();
        }

        let ron_path = dir.join(ROSTER_FILE);
        let json_path = dir.join(ROSTER_JSON_FILE);
        let roster = if ron_path.is_file() {
            info!(path = %ron_path.display(), "loading roster");
            parse_roster_ron(&read(&ron_path)?)?
        } else if json_path.is_file() {
            info!(path = %json_path.display(), "loading roster");
            parse_roster_json(&read(&json_path)?)?
        } else {
            debug!(dir = %dir.display(), "no roster override, using bundled roster");
            default_roster()?
        };

        let chart_path = dir.join(TYPE_CHART_FILE);
        let type_chart = if chart_path.is_file() {
            info!(path = %chart_path.display(), "loading type chart");
            TypeChart::from_json_str(&read(&chart_path)?)?
        } else {
            TypeChart::standard()
        };

        Ok(Self { roster, type_chart })
    }
}
