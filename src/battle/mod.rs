pub mod ai;
pub mod calculators;
pub mod engine;
pub mod runner;
pub mod state;
pub mod team;

pub use ai::{Behavior, RandomBehavior, ScoringBehavior};
pub use calculators::Effectiveness;
pub use engine::{resolve_attack, AttackResult, Combat, XpAward};
pub use runner::{BattleOutcome, PlayerAction, RewardReport, TeamBattle};
pub use state::{BattleEvent, BattlePhase, EventBus, Side, TurnRng};
pub use team::BattleTeam;

#[cfg(test)]
pub(crate) mod tests;
