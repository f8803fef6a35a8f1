//! Encounter ledger: an append-only record of first-seen creatures.

use crate::creature::Creature;
use schema::PokedexEntry;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Serialized as a plain list. Loading goes through `FromIterator`, so
/// case-insensitive duplicates in saved data collapse to the first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PokedexEntry>", into = "Vec<PokedexEntry>")]
pub struct Pokedex {
    entries: Vec<PokedexEntry>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a creature. Returns `false` if a creature with the same name
    /// (ignoring case) is already registered.
    pub fn register(&mut self, creature: &Creature) -> bool {
        self.insert(creature.pokedex_entry())
    }

    /// Restore an entry from saved state. Duplicates are skipped.
    pub fn add_raw_entry(&mut self, entry: PokedexEntry) -> bool {
        self.insert(entry)
    }

    fn insert(&mut self, entry: PokedexEntry) -> bool {
        if self.contains(&entry.name) {
            return false;
        }
        debug!(creature = %entry.name, "registered in pokedex");
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, name: &str) -> Option<&PokedexEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn entries(&self) -> &[PokedexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries (new game).
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<PokedexEntry> for Pokedex {
    fn from_iter<I: IntoIterator<Item = PokedexEntry>>(iter: I) -> Self {
        let mut pokedex = Pokedex::new();
        for entry in iter {
            pokedex.add_raw_entry(entry);
        }
        pokedex
    }
}

impl From<Vec<PokedexEntry>> for Pokedex {
    fn from(entries: Vec<PokedexEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<Pokedex> for Vec<PokedexEntry> {
    fn from(pokedex: Pokedex) -> Self {
        pokedex.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::ElementType;

    fn creature(name: &str) -> Creature {
        Creature::new(name, 45, 5, 49, 49, vec![ElementType::Grass, ElementType::Poison]).unwrap()
    }

    #[test]
    fn test_register_new_creature() {
        let mut pokedex = Pokedex::new();
        assert!(pokedex.register(&creature("Bulbasaur")));
        assert_eq!(pokedex.len(), 1);

        let entry = pokedex.get("bulbasaur").unwrap();
        assert_eq!(entry.hp, 45);
        assert_eq!(entry.types, vec![ElementType::Grass, ElementType::Poison]);
    }

    #[test]
    fn test_register_is_case_insensitive_unique() {
        let mut pokedex = Pokedex::new();
        assert!(pokedex.register(&creature("Bulbasaur")));
        assert!(!pokedex.register(&creature("BULBASAUR")));
        assert!(!pokedex.register(&creature("bulbasaur")));
        assert_eq!(pokedex.len(), 1);
    }

    #[test]
    fn test_entry_snapshot_uses_max_hp() {
        let mut pokedex = Pokedex::new();
        let mut wounded = creature("Oddish");
        wounded.take_damage(40);
        pokedex.register(&wounded);
        assert_eq!(pokedex.get("Oddish").unwrap().hp, 45);
    }

    #[test]
    fn test_order_is_preserved() {
        let mut pokedex = Pokedex::new();
        for name in ["Zubat", "Abra", "Meowth"] {
            pokedex.register(&creature(name));
        }
        let names: Vec<_> = pokedex.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Zubat", "Abra", "Meowth"]);
    }

    #[test]
    fn test_raw_entries_skip_duplicates() {
        let entries = vec![
            creature("Abra").pokedex_entry(),
            creature("ABRA").pokedex_entry(),
            creature("Kadabra").pokedex_entry(),
        ];
        let pokedex: Pokedex = entries.into_iter().collect();
        assert_eq!(pokedex.len(), 2);
    }

    #[test]
    fn test_deserialize_collapses_case_duplicates() {
        let json = r#"[
            {"name": "pikachu", "types": ["electric"], "hp": 35, "attack": 55, "defense": 40},
            {"name": "Pikachu", "types": ["electric"], "hp": 35, "attack": 55, "defense": 40},
            {"name": "Abra", "types": ["psychic"], "hp": 25, "attack": 20, "defense": 15}
        ]"#;
        let pokedex: Pokedex = serde_json::from_str(json).unwrap();
        assert_eq!(pokedex.len(), 2);
        assert_eq!(pokedex.entries()[0].name, "pikachu");

        let round_trip: Pokedex = serde_json::from_str(&serde_json::to_string(&pokedex).unwrap()).unwrap();
        assert_eq!(round_trip, pokedex);
    }

    #[test]
    fn test_reset() {
        let mut pokedex = Pokedex::new();
        pokedex.register(&creature("Abra"));
        pokedex.reset();
        assert!(pokedex.is_empty());
        assert!(pokedex.register(&creature("Abra")));
    }
}
