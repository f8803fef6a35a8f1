use crate::creature::Creature;
use crate::moves::Move;
use serde::{Deserialize, Serialize};

/// How a type multiplier reads to the player.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effectiveness {
    Normal,
    Super,
    NotVery,
    Immune,
}

impl Effectiveness {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier == 0.0 {
            Effectiveness::Immune
        } else if multiplier >= 2.0 {
            Effectiveness::Super
        } else if multiplier < 1.0 {
            Effectiveness::NotVery
        } else {
            Effectiveness::Normal
        }
    }

    pub fn message_suffix(&self) -> &'static str {
        match self {
            Effectiveness::Super => " Super effective!",
            Effectiveness::NotVery => " Not very effective...",
            Effectiveness::Normal | Effectiveness::Immune => "",
        }
    }
}

/// A move lands when the 1..=100 roll does not exceed its accuracy.
pub fn move_hits(accuracy: u8, roll: u8) -> bool {
    roll <= accuracy
}

/// Damage before the type multiplier, on a real-valued scale.
pub fn base_damage(level: u32, power: u16, attack: u32, defense: u32) -> f64 {
    let level_factor = 2.0 * level as f64 / 5.0 + 2.0;
    (level_factor * power as f64 * attack as f64 / defense.max(1) as f64) / 50.0 + 2.0
}

/// Final damage for a hit. Immunity deals nothing; every other hit deals at least 1.
pub fn calculate_damage(attacker: &Creature, defender: &Creature, move_used: &Move, multiplier: f64) -> u32 {
    if multiplier == 0.0 {
        return 0;
    }
    let base = base_damage(
        attacker.level(),
        move_used.power(),
        attacker.attack(),
        defender.defense(),
    );
    ((base * multiplier).floor() as u32).max(1)
}

pub fn miss_message(attacker: &str, move_name: &str) -> String {
    format!("{}'s {} missed!", attacker, move_name)
}

pub fn hit_message(
    attacker: &str,
    defender: &str,
    move_name: &str,
    damage: u32,
    effectiveness: Effectiveness,
    knocked_out: bool,
) -> String {
    let mut message = match effectiveness {
        Effectiveness::Immune => format!("{} used {}... No effect!", attacker, move_name),
        _ => format!(
            "{} used {}! {} damage!{}",
            attacker,
            move_name,
            damage,
            effectiveness.message_suffix()
        ),
    };
    if knocked_out {
        message.push_str(&format!(" {} fainted!", defender));
    }
    message
}
