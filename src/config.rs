use crate::battle::ai::{Behavior, RandomBehavior, ScoringBehavior};
use crate::battle::state::TurnRng;
use crate::errors::{PersistenceError, PersistenceResult};
use crate::progression::unlocks::{
    UnlockCondition, UnlockRule, MEWTWO_EVOLUTIONS_REQUIRED, MEW_POKEDEX_ENTRIES_REQUIRED,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpponentPolicy {
    #[default]
    Random,
    Scoring,
}

impl OpponentPolicy {
    pub fn behavior(self) -> Box<dyn Behavior> {
        match self {
            OpponentPolicy::Random => Box::new(RandomBehavior),
            OpponentPolicy::Scoring => Box::new(ScoringBehavior::new()),
        }
    }
}

/// Game settings, read from RON. Every field is optional in the file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
    /// Directory holding `roster.ron` / `type_chart.json` overrides.
    pub data_dir: Option<PathBuf>,
    pub mewtwo_evolutions: u32,
    pub mew_pokedex_entries: usize,
    /// Opponent team size. `None` matches the player's team.
    pub opponent_team_size: Option<usize>,
    pub opponent_policy: OpponentPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            data_dir: None,
            mewtwo_evolutions: MEWTWO_EVOLUTIONS_REQUIRED,
            mew_pokedex_entries: MEW_POKEDEX_ENTRIES_REQUIRED,
            opponent_team_size: None,
            opponent_policy: OpponentPolicy::default(),
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(ron: &str) -> PersistenceResult<Self> {
        Ok(ron::from_str(ron)?)
    }

    pub fn load(path: &Path) -> PersistenceResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| PersistenceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_ron_str(&content)
    }

    pub fn to_ron_string(&self) -> PersistenceResult<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn unlock_rules(&self) -> Vec<UnlockRule> {
        vec![
            UnlockRule::new("Mewtwo", UnlockCondition::Evolutions(self.mewtwo_evolutions)),
            UnlockRule::new("Mew", UnlockCondition::PokedexEntries(self.mew_pokedex_entries)),
        ]
    }

    pub fn rng(&self) -> TurnRng {
        match self.seed {
            Some(seed) => TurnRng::seeded(seed),
            None => TurnRng::new_random(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_game_rules() {
        let config = GameConfig::default();
        assert_eq!(config.unlock_rules(), UnlockRule::default_rules());
        assert_eq!(config.opponent_policy, OpponentPolicy::Random);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = GameConfig::from_ron_str("(seed: Some(42), opponent_policy: Scoring)").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.opponent_policy, OpponentPolicy::Scoring);
        assert_eq!(config.mewtwo_evolutions, 10);
        assert_eq!(config.mew_pokedex_entries, 151);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = GameConfig {
            seed: Some(7),
            data_dir: Some(PathBuf::from("assets/data")),
            mewtwo_evolutions: 3,
            mew_pokedex_entries: 20,
            opponent_team_size: Some(2),
            opponent_policy: OpponentPolicy::Scoring,
        };
        let ron = config.to_ron_string().unwrap();
        assert_eq!(GameConfig::from_ron_str(&ron).unwrap(), config);
    }

    #[test]
    fn test_invalid_ron_is_an_error() {
        assert!(matches!(
            GameConfig::from_ron_str("(seed: \"abc\")"),
            Err(PersistenceError::Ron(_))
        ));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = GameConfig {
            seed: Some(99),
            ..GameConfig::default()
        };
        let mut a = config.rng();
        let mut b = config.rng();
        assert_eq!(a.next_outcome("a"), b.next_outcome("b"));
    }
}
