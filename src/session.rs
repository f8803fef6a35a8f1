//! One player's game: roster, encounter ledger, type chart and settings,
//! plus the glue that turns a finished battle into lasting progress.

use crate::battle::runner::{BattleOutcome, RewardReport, TeamBattle};
use crate::battle::state::{Side, TurnRng};
use crate::config::GameConfig;
use crate::errors::{BattleStateError, GameResult};
use crate::game_data::GameData;
use crate::persistence::SaveData;
use crate::pokedex::Pokedex;
use crate::roster::{Roster, SyncReport};
use crate::type_chart::TypeChart;
use schema::CreatureTemplate;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Everything `finish_team_battle` changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleSummary {
    pub outcome: BattleOutcome,
    pub reward: Option<RewardReport>,
    /// Opponents seen for the first time.
    pub new_pokedex_entries: Vec<String>,
    pub sync: SyncReport,
    /// Messages from unlock rules that fired.
    pub unlocks: Vec<String>,
}

impl BattleSummary {
    pub fn player_won(&self) -> bool {
        self.outcome.winner == Side::Player
    }

    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if let Some(reward) = &self.reward {
            messages.push(format!("{} gained {} XP!", reward.recipient, reward.amount));
        }
        messages.extend(self.sync.messages());
        messages.extend(self.unlocks.iter().cloned());
        messages
    }
}

#[derive(Debug)]
pub struct GameSession {
    chart: Arc<TypeChart>,
    source: Vec<CreatureTemplate>,
    roster: Roster,
    pokedex: Pokedex,
    config: GameConfig,
}

impl GameSession {
    pub fn new(data: GameData, config: GameConfig) -> GameResult<Self> {
        let roster = Roster::from_templates(data.roster.clone())?.with_unlock_rules(config.unlock_rules());
        Ok(Self {
            chart: Arc::new(data.type_chart),
            source: data.roster,
            roster,
            pokedex: Pokedex::new(),
            config,
        })
    }

    /// Build a session from the data directory named in `config`, or the
    /// bundled data.
    pub fn from_config(config: GameConfig) -> GameResult<Self> {
        let data = GameData::load(config.data_dir.as_deref())?;
        Self::new(data, config)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn type_chart(&self) -> &Arc<TypeChart> {
        &self.chart
    }

    /// Copy the chosen roster entries into a battle against a random
    /// opponent team sized to their average level.
    pub fn start_team_battle(&self, team_indices: &[usize], rng: &mut TurnRng) -> GameResult<TeamBattle> {
        let player = self.roster.battle_team(team_indices)?;
        let level = self.roster.average_level(team_indices).unwrap_or(1);
        let size = self
            .config
            .opponent_team_size
            .unwrap_or(team_indices.len())
            .max(1);

        let opponents = (0..size)
            .map(|_| self.roster.random_opponent(rng, level))
            .collect::<Option<Vec<_>>>()
            .ok_or(BattleStateError::EmptyTeam)?;

        info!(
            team = ?player.iter().map(|c| c.name()).collect::<Vec<_>>(),
            opponents = ?opponents.iter().map(|c| c.name()).collect::<Vec<_>>(),
            level,
            "starting team battle"
        );

        Ok(TeamBattle::new(player, opponents, Arc::clone(&self.chart))?
            .with_behavior(self.config.opponent_policy.behavior())
            .with_roster_indices(team_indices.to_vec()))
    }

    /// Apply a finished battle: XP to the player's active creature, roster
    /// reconciliation, ledger registration of the whole opponent team, and
    /// unlock checks. The roster is validated before anything is written.
    pub fn finish_team_battle(&mut self, mut battle: TeamBattle) -> GameResult<BattleSummary> {
        if !battle.is_finished() {
            return Err(BattleStateError::NotAllowedInPhase {
                action: "FinishBattle",
                phase: battle.phase().name(),
            }
            .into());
        }
        let reward = battle.award_xp()?;
        let outcome = battle
            .outcome()
            .ok_or(BattleStateError::BattleFinished)?;
        let indices = battle.roster_indices().to_vec();
        let (player, opponent) = battle.into_teams();

        let sync = self.roster.sync_from_battle(player.members(), &indices)?;

        let new_pokedex_entries = opponent
            .members()
            .iter()
            .filter(|creature| self.pokedex.register(creature))
            .map(|creature| creature.name().to_string())
            .collect();

        let unlocks = self.roster.check_unlocks(self.pokedex.len());

        info!(
            winner = %outcome.winner_name,
            xp = outcome.xp_reward,
            evolutions = sync.evolutions.len(),
            pokedex = self.pokedex.len(),
            "battle results applied"
        );

        Ok(BattleSummary {
            outcome,
            reward,
            new_pokedex_entries,
            sync,
            unlocks,
        })
    }

    pub fn add_creature(&mut self, template: CreatureTemplate) -> GameResult<bool> {
        Ok(self.roster.add_creature(template)?)
    }

    /// Back to the source roster with an empty ledger and no evolutions.
    pub fn new_game(&mut self) -> GameResult<()> {
        self.roster.new_game(self.source.clone())?;
        self.pokedex.reset();
        Ok(())
    }

    pub fn snapshot(&self) -> SaveData {
        SaveData {
            pokedex: self.pokedex.entries().to_vec(),
            pokemon_list: self.roster.to_templates(),
            evolution_count: self.roster.evolution_count(),
        }
    }

    /// Replace roster, ledger and counter with saved state. Invalid data
    /// leaves the session as it was.
    pub fn restore(&mut self, data: SaveData) -> GameResult<()> {
        let roster = Roster::from_templates(data.pokemon_list)?
            .with_unlock_rules(self.config.unlock_rules())
            .with_evolution_count(data.evolution_count);
        self.roster = roster;
        self.pokedex = data.pokedex.into_iter().collect();
        Ok(())
    }

    pub fn save(&self, path: &Path) -> GameResult<()> {
        Ok(self.snapshot().save_to_path(path)?)
    }

    pub fn load(&mut self, path: &Path) -> GameResult<()> {
        let data = SaveData::load_from_path(path)?;
        self.restore(data)
    }
}
