//! Creature Arena
//!
//! Turn-based combat and progression core for a creature-collecting game:
//! typed moves and damage, team battles against a policy-driven opponent,
//! experience and evolution, a persistent roster with unlockable entries,
//! and an encounter ledger.

pub mod battle;
pub mod config;
pub mod creature;
pub mod errors;
pub mod game_data;
pub mod moves;
pub mod persistence;
pub mod pokedex;
pub mod progression;
pub mod roster;
pub mod session;
pub mod type_chart;

// Static data definitions shared with data files.
pub use schema::{CreatureTemplate, ElementType, EvolvedForm, MoveTemplate, PokedexEntry};

// Battle engine.
pub use battle::ai::{Behavior, RandomBehavior, ScoringBehavior};
pub use battle::calculators::Effectiveness;
pub use battle::engine::{resolve_attack, AttackResult, Combat, XpAward};
pub use battle::runner::{BattleOutcome, PlayerAction, RewardReport, TeamBattle};
pub use battle::state::{BattleEvent, BattlePhase, EventBus, Side, TurnRng};
pub use battle::team::BattleTeam;

// Domain objects and bookkeeping.
pub use config::{GameConfig, OpponentPolicy};
pub use creature::{Creature, LevelUpReport};
pub use game_data::GameData;
pub use moves::Move;
pub use persistence::{SaveData, SaveSlot, SaveStore};
pub use pokedex::Pokedex;
pub use progression::{EvolutionRecord, PendingEvolution, RewardCalculator, UnlockCondition, UnlockRule};
pub use roster::{Roster, SyncReport};
pub use session::{BattleSummary, GameSession};
pub use type_chart::TypeChart;

pub use errors::{
    ActionError, BattleResult, BattleStateError, ConstructionError, ConstructionResult, GameError,
    GameResult, PersistenceError, PersistenceResult, RosterError, RosterResult,
};
