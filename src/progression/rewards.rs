use crate::creature::Creature;

// Constants for reward calculations
pub const BASE_XP_REWARD: u32 = 20;
pub const XP_PER_DEFEATED_LEVEL: u32 = 2;

/// Calculator for experience awarded at the end of a battle
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardCalculator;

impl RewardCalculator {
    /// XP for defeating a single creature: base reward plus two per level.
    pub fn xp_for_defeating(&self, loser: &Creature) -> u32 {
        BASE_XP_REWARD + XP_PER_DEFEATED_LEVEL * loser.level()
    }

    /// Total XP for a team battle: every opponent that ended the battle
    /// fainted contributes its reward; survivors contribute nothing.
    pub fn team_reward<'a>(&self, opponents: impl IntoIterator<Item = &'a Creature>) -> u32 {
        opponents
            .into_iter()
            .filter(|creature| !creature.is_alive())
            .map(|creature| self.xp_for_defeating(creature))
            .sum()
    }
}
