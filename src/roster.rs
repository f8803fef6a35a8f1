//! The persistent creature list: the only owner of long-lived creature state.
//!
//! Battles never touch roster entries directly. They fight with copies from
//! `battle_copy`/`battle_team`, and the results come back in one batch through
//! `sync_from_battle`.

use crate::battle::state::TurnRng;
use crate::creature::Creature;
use crate::errors::{ConstructionResult, RosterError, RosterResult};
use crate::progression::{EvolutionRecord, UnlockProgress, UnlockRule};
use schema::CreatureTemplate;
use std::collections::HashSet;
use tracing::{debug, info};

/// What a reconciliation changed beyond plain stat updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub evolutions: Vec<EvolutionRecord>,
    /// Roster entries unlocked because a team member evolved into them.
    pub unlocked: Vec<String>,
}

impl SyncReport {
    pub fn messages(&self) -> Vec<String> {
        let evolved = self
            .evolutions
            .iter()
            .map(|record| format!("{} evolved into {}!", record.from, record.to));
        let unlocked = self
            .unlocked
            .iter()
            .map(|name| format!("{} has been unlocked!", name));
        evolved.chain(unlocked).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    creatures: Vec<Creature>,
    evolution_count: u32,
    unlock_rules: Vec<UnlockRule>,
}

impl Roster {
    pub fn new(creatures: Vec<Creature>) -> Self {
        Self {
            creatures,
            evolution_count: 0,
            unlock_rules: UnlockRule::default_rules(),
        }
    }

    pub fn from_templates(templates: Vec<CreatureTemplate>) -> ConstructionResult<Self> {
        let creatures = templates
            .into_iter()
            .map(Creature::try_from)
            .collect::<ConstructionResult<Vec<_>>>()?;
        Ok(Self::new(creatures))
    }

    pub fn with_unlock_rules(mut self, rules: Vec<UnlockRule>) -> Self {
        self.unlock_rules = rules;
        self
    }

    pub fn with_evolution_count(mut self, evolution_count: u32) -> Self {
        self.evolution_count = evolution_count;
        self
    }

    pub fn all(&self) -> &[Creature] {
        &self.creatures
    }

    /// Unlocked entries, in roster order.
    pub fn available(&self) -> Vec<&Creature> {
        self.creatures.iter().filter(|c| !c.is_locked()).collect()
    }

    pub fn available_indices(&self) -> Vec<usize> {
        self.creatures
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_locked())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&Creature> {
        self.creatures.get(index)
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.creatures
            .iter()
            .position(|c| c.name().eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn evolution_count(&self) -> u32 {
        self.evolution_count
    }

    pub fn unlock_rules(&self) -> &[UnlockRule] {
        &self.unlock_rules
    }

    fn entry(&self, index: usize) -> RosterResult<&Creature> {
        self.creatures.get(index).ok_or(RosterError::InvalidIndex {
            index,
            len: self.creatures.len(),
        })
    }

    /// An independent, fully healed copy of an unlocked entry.
    pub fn battle_copy(&self, index: usize) -> RosterResult<Creature> {
        let entry = self.entry(index)?;
        if entry.is_locked() {
            return Err(RosterError::Locked(entry.name().to_string()));
        }
        let mut copy = entry.clone();
        copy.heal();
        Ok(copy)
    }

    pub fn battle_team(&self, indices: &[usize]) -> RosterResult<Vec<Creature>> {
        if indices.is_empty() {
            return Err(RosterError::EmptyTeam);
        }
        check_unique(indices)?;
        indices.iter().map(|&index| self.battle_copy(index)).collect()
    }

    /// Add a new entry. Returns `false` when the name (ignoring case) is taken.
    pub fn add_creature(&mut self, template: CreatureTemplate) -> ConstructionResult<bool> {
        if self.find(&template.name).is_some() {
            return Ok(false);
        }
        let creature = Creature::try_from(template)?;
        info!(creature = %creature.name(), "creature added to roster");
        self.creatures.push(creature);
        Ok(true)
    }

    /// Unlock every locked entry with this name. Returns whether anything changed.
    pub fn unlock(&mut self, name: &str) -> bool {
        let mut changed = false;
        for creature in self
            .creatures
            .iter_mut()
            .filter(|c| c.is_locked() && c.name().eq_ignore_ascii_case(name))
        {
            creature.set_locked(false);
            changed = true;
        }
        if changed {
            info!(creature = %name, "creature unlocked");
        }
        changed
    }

    /// Rounded mean level of the given entries; `None` if none are valid.
    pub fn average_level(&self, indices: &[usize]) -> Option<u32> {
        let levels: Vec<u32> = indices
            .iter()
            .filter_map(|&index| self.creatures.get(index))
            .map(Creature::level)
            .collect();
        if levels.is_empty() {
            return None;
        }
        let mean = levels.iter().map(|&l| l as f64).sum::<f64>() / levels.len() as f64;
        Some((mean.round() as u32).max(1))
    }

    /// Uniform pick among unlocked entries, returned as a healed copy scaled
    /// to `target_level`.
    pub fn random_opponent(&self, rng: &mut TurnRng, target_level: u32) -> Option<Creature> {
        let available = self.available();
        let index = rng.choose_index(available.len(), "Random Opponent")?;
        let mut opponent = available[index].clone();
        opponent.scale_to_level(target_level);
        opponent.heal();
        debug!(opponent = %opponent.name(), level = opponent.level(), "random opponent selected");
        Some(opponent)
    }

    /// Fold battle results back onto the roster.
    ///
    /// Each roster index may appear once.
    ///
    /// `copies[i]` came from roster entry `indices[i]`. Every index is checked
    /// before anything is written, so a bad call leaves the roster untouched.
    /// Evolved copies bump the evolution counter and unlock the roster entry
    /// of their new name, if it is locked.
    pub fn sync_from_battle(
        &mut self,
        copies: &[Creature],
        indices: &[usize],
    ) -> RosterResult<SyncReport> {
        if copies.len() != indices.len() {
            return Err(RosterError::MismatchedSync {
                copies: copies.len(),
                indices: indices.len(),
            });
        }
        for &index in indices {
            self.entry(index)?;
        }
        check_unique(indices)?;

        let mut report = SyncReport::default();
        for (copy, &index) in copies.iter().zip(indices) {
            let entry = &mut self.creatures[index];
            if let Some(record) = evolution_between(entry, copy) {
                report.evolutions.push(record);
            }
            entry.adopt_progress(copy);
        }

        for record in &report.evolutions {
            self.evolution_count += 1;
            if self.unlock(&record.to) {
                report.unlocked.push(record.to.clone());
            }
        }

        info!(
            synced = copies.len(),
            evolutions = report.evolutions.len(),
            evolution_count = self.evolution_count,
            "roster synced from battle"
        );
        Ok(report)
    }

    /// Apply every unlock rule whose condition is met. Returns the unlock messages.
    pub fn check_unlocks(&mut self, pokedex_entries: usize) -> Vec<String> {
        let progress = UnlockProgress {
            evolution_count: self.evolution_count,
            pokedex_entries,
        };
        let ready: Vec<UnlockRule> = self
            .unlock_rules
            .iter()
            .filter(|rule| rule.is_met(&progress))
            .cloned()
            .collect();

        ready
            .into_iter()
            .filter(|rule| self.unlock(&rule.creature))
            .map(|rule| rule.unlock_message())
            .collect()
    }

    /// Reset to source data and zero the evolution counter.
    pub fn new_game(&mut self, templates: Vec<CreatureTemplate>) -> ConstructionResult<()> {
        let fresh = Self::from_templates(templates)?;
        self.creatures = fresh.creatures;
        self.evolution_count = 0;
        info!(creatures = self.creatures.len(), "roster reset for new game");
        Ok(())
    }

    pub fn to_templates(&self) -> Vec<CreatureTemplate> {
        self.creatures.iter().map(Creature::to_template).collect()
    }
}

fn check_unique(indices: &[usize]) -> RosterResult<()> {
    let mut seen = HashSet::with_capacity(indices.len());
    match indices.iter().find(|&&index| !seen.insert(index)) {
        Some(&index) => Err(RosterError::DuplicateIndex(index)),
        None => Ok(()),
    }
}

/// The evolution a battle copy went through, if any: the entry's pending
/// evolution was consumed and the copy carries its target name.
fn evolution_between(entry: &Creature, copy: &Creature) -> Option<EvolutionRecord> {
    let pending = entry.pending_evolution()?;
    let consumed = copy.pending_evolution() != Some(pending);
    if !consumed || !copy.name().eq_ignore_ascii_case(&pending.target) {
        return None;
    }
    Some(EvolutionRecord {
        from: entry.name().to_string(),
        to: copy.name().to_string(),
    })
}
