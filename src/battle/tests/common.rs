use crate::battle::runner::TeamBattle;
use crate::battle::state::TurnRng;
use crate::creature::Creature;
use crate::errors::BattleResult;
use crate::moves::Move;
use crate::progression::PendingEvolution;
use crate::type_chart::TypeChart;
use schema::ElementType;
use std::sync::Arc;

/// A builder for creating test creatures with common defaults.
///
/// # Example
/// ```ignore
/// let creature = TestCreatureBuilder::new("Pikachu")
///     .with_types(vec![ElementType::Electric])
///     .with_level(10)
///     .with_hp(5)
///     .build();
/// ```
pub struct TestCreatureBuilder {
    name: String,
    level: u32,
    max_hp: u32,
    attack: u32,
    defense: u32,
    types: Vec<ElementType>,
    moves: Option<Vec<Move>>,
    evolution: Option<PendingEvolution>,
    current_hp: Option<u32>,
}

impl TestCreatureBuilder {
    /// Level 5, 50 HP, 50 attack, 50 defense, normal type, default moves.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 5,
            max_hp: 50,
            attack: 50,
            defense: 50,
            types: vec![ElementType::Normal],
            moves: None,
            evolution: None,
            current_hp: None,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn with_attack(mut self, attack: u32) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_defense(mut self, defense: u32) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_types(mut self, types: Vec<ElementType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn with_evolution(mut self, level: u32, target: &str) -> Self {
        self.evolution = Some(PendingEvolution::new(level, target));
        self
    }

    /// Sets the current HP. If not set, HP will be max. Zero builds a fainted creature.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> Creature {
        let mut creature = match Creature::new(
            self.name.clone(),
            self.max_hp,
            self.level,
            self.attack,
            self.defense,
            self.types,
        ) {
            Ok(creature) => creature,
            Err(err) => panic!("Failed to build test creature {}: {}", self.name, err),
        };
        if let Some(moves) = self.moves {
            creature = assert_ok(creature.with_moves(moves).map_err(Into::into));
        }
        if let Some(evolution) = self.evolution {
            creature = assert_ok(creature.with_evolution(evolution).map_err(Into::into));
        }
        if let Some(hp) = self.current_hp {
            creature.set_hp(hp);
        }
        creature
    }
}

/// A move that always hits.
pub fn sure_hit(name: &str, move_type: ElementType, power: u16) -> Move {
    assert_ok(Move::new(name, move_type, power, 100).map_err(Into::into))
}

/// A team battle over the standard chart with the default opponent policy.
pub fn create_team_battle(player: Vec<Creature>, opponent: Vec<Creature>) -> TeamBattle {
    assert_ok(
        TeamBattle::new(player, opponent, Arc::new(TypeChart::standard())).map_err(Into::into),
    )
}

/// Creates a `TurnRng` instance with a long list of default values (50).
/// Useful for tests where the specific RNG outcome is not important, preventing panics from exhaustion.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
