use crate::battle::ai::{Behavior, RandomBehavior};
use crate::battle::engine::resolve_attack;
use crate::battle::state::{BattleEvent, BattlePhase, EventBus, Side, TurnRng};
use crate::battle::team::BattleTeam;
use crate::creature::{Creature, LevelUpReport};
use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::progression::RewardCalculator;
use crate::type_chart::TypeChart;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    UseMove { move_index: usize },
    SwitchCreature { team_index: usize },
    Forfeit,
}

impl PlayerAction {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerAction::UseMove { .. } => "UseMove",
            PlayerAction::SwitchCreature { .. } => "SwitchCreature",
            PlayerAction::Forfeit => "Forfeit",
        }
    }
}

/// How a finished battle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOutcome {
    pub winner: Side,
    pub winner_name: String,
    pub loser_name: String,
    pub forfeited: bool,
    /// XP owed to the player's active creature; zero unless the player won.
    pub xp_reward: u32,
    /// Opposing creatures that ended the battle fainted, in team order.
    pub defeated: Vec<String>,
}

/// XP actually granted by `TeamBattle::award_xp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardReport {
    pub recipient: String,
    pub amount: u32,
    pub level_up: LevelUpReport,
}

/// Team-vs-team battle driven one player action at a time.
///
/// The player acts in `PlayerTurn` (or `ForcedSwitch` after a faint); the
/// opponent answers in `OpponentTurn` through its `Behavior`. Every
/// transition is appended to the event log.
#[derive(Debug)]
pub struct TeamBattle {
    player: BattleTeam,
    opponent: BattleTeam,
    chart: Arc<TypeChart>,
    behavior: Box<dyn Behavior>,
    phase: BattlePhase,
    events: EventBus,
    turn_number: u32,
    roster_indices: Vec<usize>,
    rewards_applied: bool,
}

impl TeamBattle {
    /// Start a battle with the default (uniform random) opponent policy.
    pub fn new(
        player: Vec<Creature>,
        opponent: Vec<Creature>,
        chart: Arc<TypeChart>,
    ) -> Result<Self, BattleStateError> {
        let player = BattleTeam::new(player)?;
        let opponent = BattleTeam::new(opponent)?;

        let mut events = EventBus::new();
        events.push(BattleEvent::BattleStarted {
            player: player.active().name().to_string(),
            opponent: opponent.active().name().to_string(),
        });
        debug!(
            player = %player.active().name(),
            opponent = %opponent.active().name(),
            "team battle started"
        );

        let mut battle = Self {
            player,
            opponent,
            chart,
            behavior: Box::new(RandomBehavior),
            phase: BattlePhase::PlayerTurn,
            events,
            turn_number: 1,
            roster_indices: Vec::new(),
            rewards_applied: false,
        };

        if battle.player.is_defeated() {
            battle.finish(Side::Opponent, false);
        } else if battle.opponent.is_defeated() {
            battle.finish(Side::Player, false);
        }
        Ok(battle)
    }

    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = behavior;
        self
    }

    /// Remember which roster entries the player's team was copied from.
    pub fn with_roster_indices(mut self, indices: Vec<usize>) -> Self {
        self.roster_indices = indices;
        self
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn player_team(&self) -> &BattleTeam {
        &self.player
    }

    pub fn opponent_team(&self) -> &BattleTeam {
        &self.opponent
    }

    pub fn type_chart(&self) -> &TypeChart {
        &self.chart
    }

    pub fn roster_indices(&self) -> &[usize] {
        &self.roster_indices
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_since(&self, index: usize) -> &[BattleEvent] {
        let events = self.events.events();
        &events[index.min(events.len())..]
    }

    /// Actions the player may submit right now.
    pub fn valid_actions(&self) -> Vec<PlayerAction> {
        let switches = self
            .player
            .valid_switches()
            .into_iter()
            .map(|team_index| PlayerAction::SwitchCreature { team_index });

        match self.phase {
            BattlePhase::PlayerTurn => (0..self.player.active().moves().len())
                .map(|move_index| PlayerAction::UseMove { move_index })
                .chain(switches)
                .chain(std::iter::once(PlayerAction::Forfeit))
                .collect(),
            BattlePhase::ForcedSwitch => switches.collect(),
            BattlePhase::OpponentTurn | BattlePhase::Finished { .. } => Vec::new(),
        }
    }

    /// Apply a player action. Rejected actions leave the battle untouched.
    /// Returns the events the action produced.
    pub fn submit(&mut self, action: PlayerAction, rng: &mut TurnRng) -> BattleResult<Vec<BattleEvent>> {
        let start = self.events.len();

        match (self.phase, action) {
            (BattlePhase::Finished { .. }, _) => return Err(BattleStateError::BattleFinished.into()),
            (BattlePhase::PlayerTurn, PlayerAction::UseMove { move_index }) => {
                self.player_attack(move_index, rng)?;
            }
            (BattlePhase::PlayerTurn, PlayerAction::SwitchCreature { team_index }) => {
                self.switch_player(team_index, false)?;
                self.set_phase(BattlePhase::OpponentTurn);
            }
            (BattlePhase::PlayerTurn, PlayerAction::Forfeit) => {
                self.events.push(BattleEvent::Forfeited { side: Side::Player });
                self.finish(Side::Opponent, true);
            }
            (BattlePhase::ForcedSwitch, PlayerAction::SwitchCreature { team_index }) => {
                self.switch_player(team_index, true)?;
                self.next_turn();
            }
            (phase, action) => {
                return Err(BattleStateError::NotAllowedInPhase {
                    action: action.name(),
                    phase: phase.name(),
                }
                .into())
            }
        }

        Ok(self.events_since(start).to_vec())
    }

    /// Let the opponent act. Only valid in `OpponentTurn`.
    pub fn resolve_opponent_turn(&mut self, rng: &mut TurnRng) -> BattleResult<Vec<BattleEvent>> {
        match self.phase {
            BattlePhase::OpponentTurn => {}
            BattlePhase::Finished { .. } => return Err(BattleStateError::BattleFinished.into()),
            phase => {
                return Err(BattleStateError::NotAllowedInPhase {
                    action: "OpponentAttack",
                    phase: phase.name(),
                }
                .into())
            }
        }

        let start = self.events.len();
        let choice = self.behavior.choose_move(
            self.opponent.active(),
            self.player.active(),
            &self.chart,
            rng,
        );
        let Some(move_used) = choice.and_then(|index| self.opponent.active().move_at(index).cloned()) else {
            self.next_turn();
            return Ok(self.events_since(start).to_vec());
        };

        let result = resolve_attack(
            &self.chart,
            self.opponent.active(),
            self.player.active_mut(),
            &move_used,
            rng,
        );
        self.events.push(BattleEvent::AttackResolved {
            side: Side::Opponent,
            attacker: self.opponent.active().name().to_string(),
            defender: self.player.active().name().to_string(),
            result: result.clone(),
        });

        if result.ko {
            self.events.push(BattleEvent::CreatureFainted {
                side: Side::Player,
                name: self.player.active().name().to_string(),
            });
            if self.player.is_defeated() {
                self.finish(Side::Opponent, false);
            } else {
                self.set_phase(BattlePhase::ForcedSwitch);
            }
        } else {
            self.next_turn();
        }

        Ok(self.events_since(start).to_vec())
    }

    /// Submit an action and, if it hands the turn over, let the opponent answer.
    pub fn play_turn(&mut self, action: PlayerAction, rng: &mut TurnRng) -> BattleResult<Vec<BattleEvent>> {
        let mut events = self.submit(action, rng)?;
        if self.phase == BattlePhase::OpponentTurn {
            events.extend(self.resolve_opponent_turn(rng)?);
        }
        Ok(events)
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        let BattlePhase::Finished { winner, forfeited } = self.phase else {
            return None;
        };
        let (winning, losing) = match winner {
            Side::Player => (&self.player, &self.opponent),
            Side::Opponent => (&self.opponent, &self.player),
        };
        let xp_reward = match winner {
            Side::Player => RewardCalculator.team_reward(self.opponent.members()),
            Side::Opponent => 0,
        };
        let defeated = self
            .opponent
            .members()
            .iter()
            .filter(|creature| !creature.is_alive())
            .map(|creature| creature.name().to_string())
            .collect();

        Some(BattleOutcome {
            winner,
            winner_name: winning.active().name().to_string(),
            loser_name: losing.active().name().to_string(),
            forfeited,
            xp_reward,
            defeated,
        })
    }

    /// Grant the outcome's XP to the player's active creature. Applies at
    /// most once; `Ok(None)` when there is nothing (more) to give.
    pub fn award_xp(&mut self) -> BattleResult<Option<RewardReport>> {
        let outcome = self
            .outcome()
            .ok_or(BattleStateError::NotAllowedInPhase {
                action: "AwardXp",
                phase: self.phase.name(),
            })?;
        if self.rewards_applied || outcome.xp_reward == 0 {
            return Ok(None);
        }
        self.rewards_applied = true;

        let creature = self.player.active_mut();
        let recipient = creature.name().to_string();
        let level_up = creature.gain_xp(outcome.xp_reward);
        info!(
            creature = %recipient,
            xp = outcome.xp_reward,
            levels = level_up.levels_gained,
            "battle XP awarded"
        );

        Ok(Some(RewardReport {
            recipient,
            amount: outcome.xp_reward,
            level_up,
        }))
    }

    /// Hand back both teams, player first.
    pub fn into_teams(self) -> (BattleTeam, BattleTeam) {
        (self.player, self.opponent)
    }

    fn player_attack(&mut self, move_index: usize, rng: &mut TurnRng) -> BattleResult<()> {
        let move_used = self
            .player
            .active()
            .move_at(move_index)
            .cloned()
            .ok_or(ActionError::InvalidMoveIndex(move_index))?;

        let result = resolve_attack(
            &self.chart,
            self.player.active(),
            self.opponent.active_mut(),
            &move_used,
            rng,
        );
        self.events.push(BattleEvent::AttackResolved {
            side: Side::Player,
            attacker: self.player.active().name().to_string(),
            defender: self.opponent.active().name().to_string(),
            result: result.clone(),
        });

        if result.ko {
            let fainted = self.opponent.active().name().to_string();
            self.events.push(BattleEvent::CreatureFainted {
                side: Side::Opponent,
                name: fainted.clone(),
            });
            if self.opponent.is_defeated() {
                self.finish(Side::Player, false);
                return Ok(());
            }
            if let Some(next) = self.opponent.advance() {
                self.events.push(BattleEvent::CreatureSwitched {
                    side: Side::Opponent,
                    from: fainted,
                    to: self.opponent.members()[next].name().to_string(),
                    forced: true,
                });
            }
        }

        self.set_phase(BattlePhase::OpponentTurn);
        Ok(())
    }

    fn switch_player(&mut self, team_index: usize, forced: bool) -> Result<(), ActionError> {
        let from = self.player.active().name().to_string();
        self.player.switch_to(team_index)?;
        self.events.push(BattleEvent::CreatureSwitched {
            side: Side::Player,
            from,
            to: self.player.active().name().to_string(),
            forced,
        });
        Ok(())
    }

    fn next_turn(&mut self) {
        self.turn_number += 1;
        self.set_phase(BattlePhase::PlayerTurn);
    }

    fn set_phase(&mut self, to: BattlePhase) {
        let from = self.phase;
        self.phase = to;
        debug!(from = from.name(), to = to.name(), turn = self.turn_number, "battle phase changed");
        self.events.push(BattleEvent::PhaseChanged { from, to });
    }

    fn finish(&mut self, winner: Side, forfeited: bool) {
        self.set_phase(BattlePhase::Finished { winner, forfeited });
        let (winning, losing) = match winner {
            Side::Player => (&self.player, &self.opponent),
            Side::Opponent => (&self.opponent, &self.player),
        };
        let winner_name = winning.active().name().to_string();
        let loser_name = losing.active().name().to_string();
        info!(
            winner = %winner,
            winner_name = %winner_name,
            forfeited,
            turns = self.turn_number,
            "team battle finished"
        );
        self.events.push(BattleEvent::BattleEnded {
            winner,
            winner_name,
            loser_name,
        });
    }
}
