//! A module for defining AI behaviors for battle opponents.

use crate::battle::calculators;
use crate::battle::state::TurnRng;
use crate::creature::Creature;
use crate::type_chart::TypeChart;
use ordered_float::OrderedFloat;
use std::fmt::Debug;

/// A trait for any system that can pick the opponent's move.
/// This provides a common interface for different AI difficulties or strategies.
pub trait Behavior: Debug {
    /// Index into `attacker.moves()`, or `None` if it has nothing to use.
    fn choose_move(
        &self,
        attacker: &Creature,
        defender: &Creature,
        chart: &TypeChart,
        rng: &mut TurnRng,
    ) -> Option<usize>;
}

/// Picks uniformly among the attacker's moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBehavior;

impl Behavior for RandomBehavior {
    fn choose_move(
        &self,
        attacker: &Creature,
        _defender: &Creature,
        _chart: &TypeChart,
        rng: &mut TurnRng,
    ) -> Option<usize> {
        rng.choose_index(attacker.moves().len(), "Opponent Move Choice")
    }
}

/// Picks the move with the best expected damage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringBehavior;

impl ScoringBehavior {
    pub fn new() -> Self {
        Self
    }

    /// Expected damage: damage on hit scaled by the chance to hit.
    /// A move the defender is immune to scores below everything else.
    fn score_move(
        &self,
        move_index: usize,
        attacker: &Creature,
        defender: &Creature,
        chart: &TypeChart,
    ) -> f64 {
        let Some(move_used) = attacker.move_at(move_index) else {
            return f64::MIN;
        };
        let multiplier = chart.combined_multiplier(move_used.move_type(), defender.types());
        if multiplier == 0.0 {
            return -1.0;
        }
        let damage = calculators::calculate_damage(attacker, defender, move_used, multiplier) as f64;

        // Damage past the defender's remaining HP is wasted.
        let capped = damage.min(defender.hp() as f64);
        capped * move_used.accuracy() as f64 / 100.0
    }
}

impl Behavior for ScoringBehavior {
    fn choose_move(
        &self,
        attacker: &Creature,
        defender: &Creature,
        chart: &TypeChart,
        _rng: &mut TurnRng,
    ) -> Option<usize> {
        (0..attacker.moves().len())
            .max_by_key(|&index| OrderedFloat(self.score_move(index, attacker, defender, chart)))
    }
}
