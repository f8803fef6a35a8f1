use crate::battle::engine::AttackResult;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a battle a creature fights for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    PlayerTurn,
    OpponentTurn,
    ForcedSwitch, // Player's active creature fainted and a teammate is still standing
    Finished { winner: Side, forfeited: bool },
}

impl BattlePhase {
    pub fn name(&self) -> &'static str {
        match self {
            BattlePhase::PlayerTurn => "PlayerTurn",
            BattlePhase::OpponentTurn => "OpponentTurn",
            BattlePhase::ForcedSwitch => "ForcedSwitch",
            BattlePhase::Finished { .. } => "Finished",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, BattlePhase::Finished { .. })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted {
        player: String,
        opponent: String,
    },
    AttackResolved {
        side: Side,
        attacker: String,
        defender: String,
        result: AttackResult,
    },
    CreatureFainted {
        side: Side,
        name: String,
    },
    CreatureSwitched {
        side: Side,
        from: String,
        to: String,
        forced: bool,
    },
    PhaseChanged {
        from: BattlePhase,
        to: BattlePhase,
    },
    Forfeited {
        side: Side,
    },
    BattleEnded {
        winner: Side,
        winner_name: String,
        loser_name: String,
    },
}

impl BattleEvent {
    /// Player-facing text for this event. Bookkeeping events return `None`.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { player, opponent } => {
                Some(format!("{} vs {}!", player, opponent))
            }
            BattleEvent::AttackResolved { result, .. } => Some(result.message.clone()),
            // The attack message already reports the faint.
            BattleEvent::CreatureFainted { .. } => None,
            BattleEvent::CreatureSwitched {
                side: Side::Player,
                to,
                ..
            } => Some(format!("Go, {}!", to)),
            BattleEvent::CreatureSwitched {
                side: Side::Opponent,
                to,
                ..
            } => Some(format!("Opponent sent out {}!", to)),
            BattleEvent::PhaseChanged { .. } => None,
            BattleEvent::Forfeited { side } => Some(format!("The {} forfeited the battle.", side)),
            BattleEvent::BattleEnded {
                winner_name,
                loser_name,
                ..
            } => Some(format!("{} defeated {}!", winner_name, loser_name)),
        }
    }
}

/// Ordered log of everything that happened in a battle.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The player-facing lines of the log, in order.
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }
}

impl fmt::Display for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<u8>, index: usize },
    Seeded(ChaCha8Rng),
}

/// Source of every random decision in a battle: hit rolls and opponent choices.
///
/// Tests script the exact outcomes; games use a seeded ChaCha stream so a
/// seed fully reproduces a run.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    /// Outcomes are consumed in order. Running out is a test bug and panics.
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self::seeded(rand::random())
    }

    /// A roll in `1..=100`.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        match &mut self.source {
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                }
                let outcome = outcomes[*index];

                #[cfg(test)]
                println!("[RNG] Consumed {} for: {}", outcome, reason);

                *index += 1;
                outcome
            }
            RngSource::Seeded(rng) => rng.random_range(1..=100),
        }
    }

    /// Uniform index into a collection of `len` items; `None` when empty.
    /// Scripted outcomes map as `(outcome - 1) % len`.
    pub fn choose_index(&mut self, len: usize, reason: &str) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if let RngSource::Seeded(rng) = &mut self.source {
            return Some(rng.random_range(0..len));
        }
        let outcome = self.next_outcome(reason).max(1);
        Some((outcome as usize - 1) % len)
    }
}
