use crate::errors::{ConstructionError, ConstructionResult};
use crate::moves::Move;
use crate::progression::evolution::{EvolutionRecord, PendingEvolution};
use schema::{CreatureTemplate, ElementType, MoveTemplate, PokedexEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAX_MOVES: usize = 4;
pub const MAX_TYPES: usize = 2;

const HP_PER_LEVEL: i64 = 5;
const ATTACK_PER_LEVEL: i64 = 3;
const DEFENSE_PER_LEVEL: i64 = 2;

/// XP needed to go from `level` to `level + 1`.
pub fn xp_threshold_for(level: u32) -> u32 {
    10 + level * 5
}

pub fn sprite_path_for(name: &str) -> String {
    format!("assets/sprites/{}.png", name.to_lowercase())
}

/// What happened during a single `gain_xp` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelUpReport {
    pub levels_gained: u32,
    pub evolution: Option<EvolutionRecord>,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// A battling entity. Roster entries and battle-scoped copies share this type;
/// which scope a value belongs to is decided by who owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CreatureTemplate", into = "CreatureTemplate")]
pub struct Creature {
    pub(crate) name: String,
    pub(crate) hp: u32,
    pub(crate) max_hp: u32,
    pub(crate) level: u32,
    pub(crate) attack: u32,
    pub(crate) defense: u32,
    pub(crate) types: Vec<ElementType>,
    pub(crate) moves: Vec<Move>,
    pub(crate) xp: u32,
    pub(crate) xp_to_next_level: u32,
    pub(crate) evolution: Option<PendingEvolution>,
    pub(crate) sprite_path: String,
    pub(crate) locked: bool,
}

pub(crate) fn validate_types(name: &str, types: &[ElementType]) -> ConstructionResult<()> {
    if types.is_empty() || types.len() > MAX_TYPES {
        return Err(ConstructionError::InvalidTypeCount {
            name: name.to_string(),
            count: types.len(),
        });
    }
    Ok(())
}

pub(crate) fn validate_stat(name: &str, stat: &'static str, value: u32) -> ConstructionResult<()> {
    if value == 0 {
        return Err(ConstructionError::InvalidStat {
            name: name.to_string(),
            stat,
        });
    }
    Ok(())
}

impl Creature {
    /// Create a creature at full HP with the default move set.
    pub fn new(
        name: impl Into<String>,
        hp: u32,
        level: u32,
        attack: u32,
        defense: u32,
        types: Vec<ElementType>,
    ) -> ConstructionResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConstructionError::EmptyName);
        }
        if level == 0 {
            return Err(ConstructionError::InvalidLevel);
        }
        validate_stat(&name, "hp", hp)?;
        validate_stat(&name, "attack", attack)?;
        validate_stat(&name, "defense", defense)?;
        validate_types(&name, &types)?;

        let moves = Move::default_moveset(types.first().copied());
        let sprite_path = sprite_path_for(&name);

        Ok(Self {
            name,
            hp,
            max_hp: hp,
            level,
            attack,
            defense,
            types,
            moves,
            xp: 0,
            xp_to_next_level: xp_threshold_for(level),
            evolution: None,
            sprite_path,
            locked: false,
        })
    }

    /// Replace the move set. An empty list falls back to the default moves.
    pub fn with_moves(mut self, moves: Vec<Move>) -> ConstructionResult<Self> {
        if moves.len() > MAX_MOVES {
            return Err(ConstructionError::TooManyMoves {
                name: self.name.clone(),
                count: moves.len(),
            });
        }
        self.moves = if moves.is_empty() {
            Move::default_moveset(self.primary_type())
        } else {
            moves
        };
        Ok(self)
    }

    pub fn with_evolution(mut self, evolution: PendingEvolution) -> ConstructionResult<Self> {
        evolution.validate()?;
        self.evolution = Some(evolution);
        Ok(self)
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn types(&self) -> &[ElementType] {
        &self.types
    }

    pub fn primary_type(&self) -> Option<ElementType> {
        self.types.first().copied()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn move_at(&self, index: usize) -> Option<&Move> {
        self.moves.get(index)
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn xp_to_next_level(&self) -> u32 {
        self.xp_to_next_level
    }

    pub fn pending_evolution(&self) -> Option<&PendingEvolution> {
        self.evolution.as_ref()
    }

    pub fn sprite_path(&self) -> &str {
        &self.sprite_path
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Reduce HP by the given amount, floored at 0.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Set current HP, capped at max HP.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    pub fn heal(&mut self) {
        self.hp = self.max_hp;
    }

    /// Add XP and apply every level-up it pays for.
    pub fn gain_xp(&mut self, amount: u32) -> LevelUpReport {
        let mut report = LevelUpReport::default();
        self.xp = self.xp.saturating_add(amount);

        while self.xp >= self.xp_to_next_level {
            self.xp -= self.xp_to_next_level;
            if let Some(record) = self.level_up() {
                report.evolution = Some(record);
            }
            report.levels_gained += 1;
        }

        report
    }

    fn level_up(&mut self) -> Option<EvolutionRecord> {
        self.level += 1;
        self.max_hp += HP_PER_LEVEL as u32;
        self.attack += ATTACK_PER_LEVEL as u32;
        self.defense += DEFENSE_PER_LEVEL as u32;
        self.hp = self.max_hp;
        self.xp_to_next_level = xp_threshold_for(self.level);
        debug!(creature = %self.name, level = self.level, "level up");
        self.try_evolve()
    }

    /// Resize stats to `target_level` without granting XP or evolving.
    pub fn scale_to_level(&mut self, target_level: u32) {
        if target_level == self.level || target_level == 0 {
            return;
        }
        let diff = target_level as i64 - self.level as i64;
        let scaled = |stat: u32, per_level: i64| (stat as i64 + diff * per_level).max(1) as u32;

        self.level = target_level;
        self.max_hp = scaled(self.max_hp, HP_PER_LEVEL);
        self.attack = scaled(self.attack, ATTACK_PER_LEVEL);
        self.defense = scaled(self.defense, DEFENSE_PER_LEVEL);
        self.hp = self.max_hp;
        self.xp_to_next_level = xp_threshold_for(self.level);
    }

    /// Take over the progression of a battle copy: level, XP, stats, identity
    /// and any remaining evolution. Current HP is reset to full.
    pub(crate) fn adopt_progress(&mut self, battle_copy: &Creature) {
        self.name = battle_copy.name.clone();
        self.level = battle_copy.level;
        self.max_hp = battle_copy.max_hp;
        self.attack = battle_copy.attack;
        self.defense = battle_copy.defense;
        self.types = battle_copy.types.clone();
        self.xp = battle_copy.xp;
        self.xp_to_next_level = battle_copy.xp_to_next_level;
        self.evolution = battle_copy.evolution.clone();
        self.sprite_path = battle_copy.sprite_path.clone();
        self.heal();
    }

    pub fn pokedex_entry(&self) -> PokedexEntry {
        PokedexEntry {
            name: self.name.clone(),
            types: self.types.clone(),
            hp: self.max_hp,
            attack: self.attack,
            defense: self.defense,
        }
    }

    pub fn to_template(&self) -> CreatureTemplate {
        CreatureTemplate::from(self.clone())
    }
}

impl TryFrom<CreatureTemplate> for Creature {
    type Error = ConstructionError;

    fn try_from(template: CreatureTemplate) -> Result<Self, Self::Error> {
        if template.moves.len() > MAX_MOVES {
            return Err(ConstructionError::TooManyMoves {
                name: template.name,
                count: template.moves.len(),
            });
        }
        let moves = template
            .moves
            .into_iter()
            .map(Move::try_from)
            .collect::<ConstructionResult<Vec<_>>>()?;

        let mut creature = Creature::new(
            template.name,
            template.hp,
            template.level,
            template.attack,
            template.defense,
            template.types,
        )?
        .with_moves(moves)?
        .with_locked(template.locked);

        if let Some(sprite_path) = template.sprite_path.filter(|p| !p.is_empty()) {
            creature.sprite_path = sprite_path;
        }
        creature.xp = template.xp;
        if let Some(threshold) = template.xp_to_next_level {
            creature.xp_to_next_level = threshold;
        }

        if let (Some(level), Some(target)) = (template.evolution_level, template.evolution_target) {
            creature = creature.with_evolution(PendingEvolution {
                level,
                target,
                form: template.evolution_form,
            })?;
        }

        Ok(creature)
    }
}

impl From<Creature> for CreatureTemplate {
    fn from(creature: Creature) -> Self {
        let (evolution_level, evolution_target, evolution_form) = match creature.evolution {
            Some(pending) => (Some(pending.level), Some(pending.target), pending.form),
            None => (None, None, None),
        };

        CreatureTemplate {
            name: creature.name,
            hp: creature.max_hp,
            level: creature.level,
            attack: creature.attack,
            defense: creature.defense,
            types: creature.types,
            sprite_path: Some(creature.sprite_path),
            xp: creature.xp,
            xp_to_next_level: Some(creature.xp_to_next_level),
            evolution_level,
            evolution_target,
            evolution_form,
            moves: creature.moves.into_iter().map(MoveTemplate::from).collect(),
            locked: creature.locked,
        }
    }
}
