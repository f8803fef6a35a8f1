use crate::ElementType;
use serde::{Deserialize, Serialize};

fn default_accuracy() -> u8 {
    100
}

fn default_level() -> u32 {
    5
}

fn default_types() -> Vec<ElementType> {
    vec![ElementType::Normal]
}

/// A move as it appears in roster data and save files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTemplate {
    pub name: String,
    pub move_type: ElementType,
    pub power: u16,
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
}

/// Stat block a creature takes on when it evolves, if the data provides one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolvedForm {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub types: Vec<ElementType>,
    #[serde(default)]
    pub sprite_path: Option<String>,
}

/// Per-creature record shared by the static roster description and the
/// persisted roster state. `hp` is the maximum: creatures are stored healed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureTemplate {
    pub name: String,
    pub hp: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    pub attack: u32,
    pub defense: u32,
    #[serde(default = "default_types")]
    pub types: Vec<ElementType>,
    #[serde(default)]
    pub sprite_path: Option<String>,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub xp_to_next_level: Option<u32>,
    #[serde(default)]
    pub evolution_level: Option<u32>,
    #[serde(default)]
    pub evolution_target: Option<String>,
    #[serde(default)]
    pub evolution_form: Option<EvolvedForm>,
    #[serde(default)]
    pub moves: Vec<MoveTemplate>,
    #[serde(default)]
    pub locked: bool,
}

impl CreatureTemplate {
    /// Bare template with default level, no moves and no evolution.
    pub fn basic(name: &str, hp: u32, attack: u32, defense: u32, types: Vec<ElementType>) -> Self {
        Self {
            name: name.to_string(),
            hp,
            level: default_level(),
            attack,
            defense,
            types,
            sprite_path: None,
            xp: 0,
            xp_to_next_level: None,
            evolution_level: None,
            evolution_target: None,
            evolution_form: None,
            moves: Vec::new(),
            locked: false,
        }
    }
}

/// Snapshot stored in the encounter ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokedexEntry {
    pub name: String,
    pub types: Vec<ElementType>,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
}
