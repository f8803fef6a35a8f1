//! Single-exchange combat between two creatures.
//!
//! `Combat` borrows one creature per side and the shared type chart, and holds
//! nothing else. All battle bookkeeping (turn order, event logs, switching)
//! belongs to the caller; see `battle::runner`.

use crate::battle::calculators::{self, Effectiveness};
use crate::battle::state::{Side, TurnRng};
use crate::creature::{Creature, LevelUpReport};
use crate::errors::ActionError;
use crate::moves::Move;
use crate::pokedex::Pokedex;
use crate::progression::RewardCalculator;
use crate::type_chart::TypeChart;
use schema::ElementType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything observable about one attack.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AttackResult {
    pub move_name: String,
    pub hit: bool,
    pub damage: u32,
    pub multiplier: f64,
    pub effectiveness: Effectiveness,
    pub ko: bool,
    pub message: String,
}

/// XP handed out by `Combat::award_xp_to_winner`.
#[derive(Debug, Clone, PartialEq)]
pub struct XpAward {
    pub winner: Side,
    pub amount: u32,
    pub report: LevelUpReport,
    pub message: String,
}

/// Resolve `move_used` from `attacker` against `defender`. Only the
/// defender's HP is mutated.
pub fn resolve_attack(
    chart: &TypeChart,
    attacker: &Creature,
    defender: &mut Creature,
    move_used: &Move,
    rng: &mut TurnRng,
) -> AttackResult {
    let roll = rng.next_outcome("Accuracy Check");
    if !calculators::move_hits(move_used.accuracy(), roll) {
        debug!(attacker = %attacker.name(), move_name = %move_used.name(), roll, "attack missed");
        return AttackResult {
            move_name: move_used.name().to_string(),
            hit: false,
            damage: 0,
            multiplier: 1.0,
            effectiveness: Effectiveness::Normal,
            ko: false,
            message: calculators::miss_message(attacker.name(), move_used.name()),
        };
    }

    let multiplier = chart.combined_multiplier(move_used.move_type(), defender.types());
    let effectiveness = Effectiveness::from_multiplier(multiplier);
    let damage = calculators::calculate_damage(attacker, defender, move_used, multiplier);

    defender.take_damage(damage);
    let ko = !defender.is_alive();

    debug!(
        attacker = %attacker.name(),
        defender = %defender.name(),
        move_name = %move_used.name(),
        damage,
        multiplier,
        remaining_hp = defender.hp(),
        "attack resolved"
    );

    AttackResult {
        move_name: move_used.name().to_string(),
        hit: true,
        damage,
        multiplier,
        effectiveness,
        ko,
        message: calculators::hit_message(
            attacker.name(),
            defender.name(),
            move_used.name(),
            damage,
            effectiveness,
            ko,
        ),
    }
}

pub struct Combat<'a> {
    player: &'a mut Creature,
    opponent: &'a mut Creature,
    chart: &'a TypeChart,
}

impl<'a> Combat<'a> {
    pub fn new(player: &'a mut Creature, opponent: &'a mut Creature, chart: &'a TypeChart) -> Self {
        Self {
            player,
            opponent,
            chart,
        }
    }

    pub fn player(&self) -> &Creature {
        self.player
    }

    pub fn opponent(&self) -> &Creature {
        self.opponent
    }

    pub fn creature(&self, side: Side) -> &Creature {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    /// `side` attacks the other side with `move_used`.
    pub fn attack(&mut self, side: Side, move_used: &Move, rng: &mut TurnRng) -> AttackResult {
        match side {
            Side::Player => resolve_attack(self.chart, self.player, self.opponent, move_used, rng),
            Side::Opponent => resolve_attack(self.chart, self.opponent, self.player, move_used, rng),
        }
    }

    /// Attack with the attacker's own move at `move_index`.
    pub fn use_move(
        &mut self,
        side: Side,
        move_index: usize,
        rng: &mut TurnRng,
    ) -> Result<AttackResult, ActionError> {
        let move_used = self
            .creature(side)
            .move_at(move_index)
            .cloned()
            .ok_or(ActionError::InvalidMoveIndex(move_index))?;
        Ok(self.attack(side, &move_used, rng))
    }

    /// Multiplier of `move_type` against the creature on `target`.
    pub fn type_multiplier(&self, move_type: ElementType, target: Side) -> f64 {
        self.chart
            .combined_multiplier(move_type, self.creature(target).types())
    }

    /// Damage `side` would deal with `move_used` on a hit.
    pub fn calculate_damage(&self, side: Side, move_used: &Move) -> u32 {
        let attacker = self.creature(side);
        let defender = self.creature(side.opposite());
        let multiplier = self.type_multiplier(move_used.move_type(), side.opposite());
        calculators::calculate_damage(attacker, defender, move_used, multiplier)
    }

    pub fn winner_side(&self) -> Option<Side> {
        if !self.opponent.is_alive() {
            Some(Side::Player)
        } else if !self.player.is_alive() {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner_side().map(|side| self.creature(side).name())
    }

    pub fn loser(&self) -> Option<&str> {
        self.winner_side()
            .map(|side| self.creature(side.opposite()).name())
    }

    /// Give the winner `20 + 2 * loser level` XP. `None` while both stand.
    pub fn award_xp_to_winner(&mut self) -> Option<XpAward> {
        let winner = self.winner_side()?;
        let amount = RewardCalculator.xp_for_defeating(self.creature(winner.opposite()));

        let creature = match winner {
            Side::Player => &mut *self.player,
            Side::Opponent => &mut *self.opponent,
        };
        let name_before = creature.name().to_string();
        let report = creature.gain_xp(amount);

        let mut message = format!("{} gained {} XP!", name_before, amount);
        if report.leveled_up() {
            message.push_str(&format!(
                " {} reached level {}!",
                creature.name(),
                creature.level()
            ));
        }

        Some(XpAward {
            winner,
            amount,
            report,
            message,
        })
    }

    /// Record the creature on `side` in the ledger. `false` if already known.
    pub fn register_to_pokedex(&self, side: Side, pokedex: &mut Pokedex) -> bool {
        pokedex.register(self.creature(side))
    }
}
