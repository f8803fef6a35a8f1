use serde::{Deserialize, Serialize};

pub const MEWTWO_EVOLUTIONS_REQUIRED: u32 = 10;
pub const MEW_POKEDEX_ENTRIES_REQUIRED: usize = 151;

/// Progress counters that unlock rules are evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnlockProgress {
    pub evolution_count: u32,
    pub pokedex_entries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockCondition {
    /// Cumulative evolutions across all sessions.
    Evolutions(u32),
    /// Entries registered in the encounter ledger.
    PokedexEntries(usize),
}

/// Gate on a locked roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRule {
    pub creature: String,
    pub condition: UnlockCondition,
}

impl UnlockRule {
    pub fn new(creature: impl Into<String>, condition: UnlockCondition) -> Self {
        Self {
            creature: creature.into(),
            condition,
        }
    }

    pub fn is_met(&self, progress: &UnlockProgress) -> bool {
        match self.condition {
            UnlockCondition::Evolutions(required) => progress.evolution_count >= required,
            UnlockCondition::PokedexEntries(required) => progress.pokedex_entries >= required,
        }
    }

    pub fn applies_to(&self, name: &str) -> bool {
        self.creature.eq_ignore_ascii_case(name)
    }

    pub fn unlock_message(&self) -> String {
        format!("{} has been unlocked!", self.creature)
    }

    /// The legendary gates: Mewtwo after ten evolutions, Mew once the ledger is complete.
    pub fn default_rules() -> Vec<UnlockRule> {
        vec![
            UnlockRule::new(
                "Mewtwo",
                UnlockCondition::Evolutions(MEWTWO_EVOLUTIONS_REQUIRED),
            ),
            UnlockRule::new(
                "Mew",
                UnlockCondition::PokedexEntries(MEW_POKEDEX_ENTRIES_REQUIRED),
            ),
        ]
    }
}
