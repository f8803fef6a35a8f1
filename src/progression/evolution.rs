use crate::creature::{sprite_path_for, validate_stat, validate_types, Creature};
use crate::errors::{ConstructionError, ConstructionResult};
use schema::EvolvedForm;
use serde::{Deserialize, Serialize};
use tracing::info;

/// An evolution that fires once the creature reaches `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEvolution {
    pub level: u32,
    pub target: String,
    pub form: Option<EvolvedForm>,
}

/// A completed evolution, reported back to the roster for unlock bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionRecord {
    pub from: String,
    pub to: String,
}

impl PendingEvolution {
    /// Name-only evolution: stats carry over, the sprite follows the new name.
    pub fn new(level: u32, target: impl Into<String>) -> Self {
        Self {
            level,
            target: target.into(),
            form: None,
        }
    }

    pub fn with_form(mut self, form: EvolvedForm) -> Self {
        self.form = Some(form);
        self
    }

    pub fn is_ready(&self, level: u32) -> bool {
        level >= self.level
    }

    pub(crate) fn validate(&self) -> ConstructionResult<()> {
        if self.target.trim().is_empty() {
            return Err(ConstructionError::EmptyName);
        }
        if self.level == 0 {
            return Err(ConstructionError::InvalidLevel);
        }
        if let Some(form) = &self.form {
            validate_stat(&self.target, "hp", form.hp)?;
            validate_stat(&self.target, "attack", form.attack)?;
            validate_stat(&self.target, "defense", form.defense)?;
            validate_types(&self.target, &form.types)?;
        }
        Ok(())
    }
}

impl Creature {
    /// Evolve if a pending evolution exists and its level has been reached.
    /// The pending evolution is consumed, so this can only fire once.
    pub fn try_evolve(&mut self) -> Option<EvolutionRecord> {
        if !self.evolution.as_ref()?.is_ready(self.level) {
            return None;
        }
        let pending = self.evolution.take()?;
        let from = std::mem::replace(&mut self.name, pending.target);

        match pending.form {
            Some(form) => {
                self.max_hp = form.hp;
                self.attack = form.attack;
                self.defense = form.defense;
                self.types = form.types;
                self.hp = self.max_hp;
                self.sprite_path = form
                    .sprite_path
                    .unwrap_or_else(|| sprite_path_for(&self.name));
            }
            None => self.sprite_path = sprite_path_for(&self.name),
        }

        info!(from = %from, to = %self.name, level = self.level, "creature evolved");
        Some(EvolutionRecord {
            from,
            to: self.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::xp_threshold_for;
    use pretty_assertions::assert_eq;
    use schema::ElementType;

    fn charmander() -> Creature {
        Creature::new("Charmander", 39, 15, 52, 43, vec![ElementType::Fire])
            .unwrap()
            .with_evolution(PendingEvolution::new(16, "Charmeleon"))
            .unwrap()
    }

    #[test]
    fn test_evolves_on_reaching_level() {
        let mut creature = charmander();
        let report = creature.gain_xp(xp_threshold_for(15));

        assert_eq!(creature.level(), 16);
        assert_eq!(creature.name(), "Charmeleon");
        assert_eq!(creature.sprite_path(), "assets/sprites/charmeleon.png");
        assert!(creature.pending_evolution().is_none());
        assert_eq!(
            report.evolution,
            Some(EvolutionRecord {
                from: "Charmander".to_string(),
                to: "Charmeleon".to_string()
            })
        );
        // Stats are the accumulated level-up values.
        assert_eq!(creature.attack(), 55);
    }

    #[test]
    fn test_evolution_is_one_shot() {
        let mut creature = charmander();
        creature.gain_xp(xp_threshold_for(15));
        let name_after_first = creature.name().to_string();

        let report = creature.gain_xp(xp_threshold_for(16));
        assert_eq!(creature.level(), 17);
        assert_eq!(creature.name(), name_after_first);
        assert!(report.evolution.is_none());
    }

    #[test]
    fn test_no_evolution_below_level() {
        let mut creature = Creature::new("Charmander", 39, 5, 52, 43, vec![ElementType::Fire])
            .unwrap()
            .with_evolution(PendingEvolution::new(16, "Charmeleon"))
            .unwrap();
        let report = creature.gain_xp(xp_threshold_for(5));
        assert_eq!(creature.level(), 6);
        assert_eq!(creature.name(), "Charmander");
        assert!(report.evolution.is_none());
        assert!(creature.pending_evolution().is_some());
    }

    #[test]
    fn test_evolution_with_form_replaces_stats_and_types() {
        let form = EvolvedForm {
            hp: 80,
            attack: 84,
            defense: 78,
            types: vec![ElementType::Fire, ElementType::Flying],
            sprite_path: Some("assets/sprites/custom.png".to_string()),
        };
        let mut creature = Creature::new("Charmeleon", 58, 35, 64, 58, vec![ElementType::Fire])
            .unwrap()
            .with_evolution(PendingEvolution::new(36, "Charizard").with_form(form))
            .unwrap();

        creature.gain_xp(xp_threshold_for(35));
        assert_eq!(creature.name(), "Charizard");
        assert_eq!(creature.max_hp(), 80);
        assert_eq!(creature.hp(), 80);
        assert_eq!(creature.attack(), 84);
        assert_eq!(
            creature.types(),
            &[ElementType::Fire, ElementType::Flying][..]
        );
        assert_eq!(creature.sprite_path(), "assets/sprites/custom.png");
    }

    #[test]
    fn test_invalid_pending_evolution_rejected() {
        let creature = Creature::new("Eevee", 55, 5, 55, 50, vec![ElementType::Normal]).unwrap();
        assert_eq!(
            creature.clone().with_evolution(PendingEvolution::new(20, " ")),
            Err(ConstructionError::EmptyName)
        );
        let bad_form = EvolvedForm {
            hp: 65,
            attack: 65,
            defense: 60,
            types: vec![],
            sprite_path: None,
        };
        assert!(creature
            .with_evolution(PendingEvolution::new(20, "Vaporeon").with_form(bad_form))
            .is_err());
    }
}
